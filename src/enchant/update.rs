//! The aura/enchantment recompute pass.
//!
//! Runs only at the boundary of each outermost event, twice: once for
//! attack/health before the death sweep, once for everything else after
//! it. Repeated calls with no intervening state change are idempotent.

use log::debug;

use crate::core::{EntityId, OrderOfPlay};
use crate::game::Game;
use crate::zones::ZoneKind;

use super::enchantment::{EnchantId, Enchantment};

/// Which slice of the stat block a recompute writes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatPass {
    /// Attack and maximum health. Runs before the death sweep.
    AttackHealth,
    /// Cost and grantable flags. Runs after the death sweep, so dead
    /// entities are excluded.
    Other,
}

impl Game {
    /// Recompute attack and health from auras and enchantments.
    pub(crate) fn aura_update_attack_health(&mut self) {
        self.refresh_aura_grants();
        self.recompute_stats(StatPass::AttackHealth);
    }

    /// Recompute the remaining derived attributes.
    pub(crate) fn aura_update_other(&mut self) {
        self.refresh_aura_grants();
        self.recompute_stats(StatPass::Other);
    }

    /// Drop every aura-granted enchantment and re-derive the lot from the
    /// auras currently radiating in play.
    fn refresh_aura_grants(&mut self) {
        self.enchantments.retain(|e| !e.from_aura);

        let mut radiators: Vec<EntityId> = Vec::new();
        for player in crate::core::PlayerId::both() {
            radiators.extend_from_slice(
                self.zones
                    .entities(crate::zones::ZoneRef::new(player, ZoneKind::Play)),
            );
        }
        radiators.sort_by_key(|&id| self.play_order_key(id));

        let candidates = self.battle_entities();
        let mut grants: Vec<(EntityId, EntityId, OrderOfPlay, super::EnchantEffect)> = Vec::new();

        for &source in &radiators {
            let Some(entity) = self.entity(source) else {
                continue;
            };
            let auras = self.content.behavior(entity.card).auras();
            if auras.is_empty() {
                continue;
            }
            // Entities in play always carry an order-of-play.
            let order = entity.order_of_play.unwrap_or(OrderOfPlay(u64::MAX));
            for aura in auras {
                for &candidate in &candidates {
                    if aura.admits(self, source, candidate) {
                        grants.push((candidate, source, order, aura.effect));
                    }
                }
            }
        }

        if !grants.is_empty() {
            debug!("aura pass re-derived {} grant(s)", grants.len());
        }

        for (target, source, order, effect) in grants {
            let id = EnchantId(self.next_enchant);
            self.next_enchant += 1;
            self.enchantments.push(Enchantment {
                id,
                target,
                source,
                order,
                from_aura: true,
                effect,
            });
        }
    }

    /// Rebuild working stats for every battle entity: template base, then
    /// attached enchantments in `(from_aura, order)` order.
    fn recompute_stats(&mut self, pass: StatPass) {
        for id in self.battle_entities() {
            let Some(entity) = self.entity(id) else {
                continue;
            };
            if pass == StatPass::Other && entity.is_mortally_wounded() {
                continue;
            }

            let mut snapshot = entity.base;
            let mut attached: Vec<&Enchantment> = self
                .enchantments
                .iter()
                .filter(|e| e.target == id)
                .collect();
            attached.sort_by_key(|e| e.apply_key());
            for enchantment in attached {
                enchantment.effect.apply(&mut snapshot);
            }

            if let Some(entity) = self.entities.get_mut(&id) {
                match pass {
                    StatPass::AttackHealth => {
                        entity.current.attack = snapshot.attack;
                        entity.current.max_health = snapshot.max_health;
                    }
                    StatPass::Other => {
                        entity.current.cost = snapshot.cost;
                        entity.current.taunt = snapshot.taunt;
                        entity.current.charge = snapshot.charge;
                        entity.current.stealth = snapshot.stealth;
                        entity.current.windfury = snapshot.windfury;
                    }
                }
            }
        }
    }

    /// Drop enchantments attached to an entity that left the battle.
    pub(crate) fn prune_enchantments_on(&mut self, target: EntityId) {
        self.enchantments.retain(|e| e.target != target);
    }
}
