//! Auras: ongoing effects that continuously re-grant enchantments.
//!
//! An aura is a `(scope, effect)` pair radiating from an entity in play.
//! Every update pass re-evaluates the scope against all candidates and
//! grants the companion enchantment to whoever qualifies *this* pass —
//! entities that entered or left the scope since the last pass are picked
//! up or dropped in the same recompute cycle.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::EntityId;
use crate::game::Game;
use crate::zones::ZoneKind;

use super::enchantment::EnchantEffect;

/// Which entities an aura reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraScope {
    /// Friendly minions in play, excluding the radiating entity.
    OtherFriendlyMinions,
    /// Friendly minions in play, including the radiating entity.
    FriendlyMinions,
    /// Enemy minions in play.
    EnemyMinions,
    /// Every minion in play on either side.
    AllMinions,
    /// The radiating entity's own hero.
    FriendlyHero,
}

/// An ongoing effect granted to all currently-qualifying entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aura {
    pub scope: AuraScope,
    pub effect: EnchantEffect,
}

impl Aura {
    /// Create an aura.
    #[must_use]
    pub const fn new(scope: AuraScope, effect: EnchantEffect) -> Self {
        Self { scope, effect }
    }

    /// Does `candidate` qualify for this aura radiating from `source`?
    #[must_use]
    pub fn admits(&self, game: &Game, source: EntityId, candidate: EntityId) -> bool {
        let Some(src) = game.entity(source) else {
            return false;
        };
        let Some(cand) = game.entity(candidate) else {
            return false;
        };

        match self.scope {
            AuraScope::OtherFriendlyMinions => {
                candidate != source
                    && cand.kind == CardKind::Minion
                    && cand.owner == src.owner
                    && cand.zone.kind == ZoneKind::Play
            }
            AuraScope::FriendlyMinions => {
                cand.kind == CardKind::Minion
                    && cand.owner == src.owner
                    && cand.zone.kind == ZoneKind::Play
            }
            AuraScope::EnemyMinions => {
                cand.kind == CardKind::Minion
                    && cand.owner != src.owner
                    && cand.zone.kind == ZoneKind::Play
            }
            AuraScope::AllMinions => {
                cand.kind == CardKind::Minion && cand.zone.kind == ZoneKind::Play
            }
            AuraScope::FriendlyHero => {
                cand.kind == CardKind::Hero
                    && cand.owner == src.owner
                    && cand.zone.kind == ZoneKind::Hero
            }
        }
    }
}
