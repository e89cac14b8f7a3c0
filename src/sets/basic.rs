//! The basic set: fixture content exercising every behavior hook.

use std::sync::Arc;

use crate::cards::{CardBehavior, CardId, CardKind, CardTemplate, ContentRegistry};
use crate::core::EntityId;
use crate::enchant::{Aura, AuraScope, EnchantEffect};
use crate::events::{Event, EventKind, EventPayload};
use crate::game::Game;
use crate::triggers::{TriggerHandler, TriggerSpec};
use crate::zones::ZoneKind;

// === Card ids ===

pub const HERO: CardId = CardId(1);
pub const HERO_POWER: CardId = CardId(2);

pub const CLOCKWORK_RECRUIT: CardId = CardId(10);
pub const BOG_LURKER: CardId = CardId(11);
pub const SHIELD_BEARER: CardId = CardId(12);
pub const SWIFT_RAIDER: CardId = CardId(13);
pub const FROSTBORN_ELEMENTAL: CardId = CardId(14);
pub const BROODMOTHER: CardId = CardId(15);
pub const HATCHLING: CardId = CardId(16);
pub const VOLATILE_IMP: CardId = CardId(17);
pub const BANNER_CAPTAIN: CardId = CardId(18);
pub const GLEAMING_SENTRY: CardId = CardId(19);
pub const SHADOW_PROWLER: CardId = CardId(20);

pub const SCORCH: CardId = CardId(30);
pub const CINDER_NOVA: CardId = CardId(31);
pub const RALLY: CardId = CardId(32);
pub const MIRROR_WARD: CardId = CardId(33);

pub const RUSTY_CLEAVER: CardId = CardId(40);

/// Build the basic set registry.
#[must_use]
pub fn content() -> ContentRegistry {
    let mut registry = ContentRegistry::new();

    registry.register(CardTemplate::hero(HERO, "Adventurer", 30));
    registry.register_with_behavior(
        CardTemplate::hero_power(HERO_POWER, "Ember Jab", 2),
        Arc::new(EmberJab),
    );

    registry.register(CardTemplate::minion(CLOCKWORK_RECRUIT, "Clockwork Recruit", 1, 1, 1));
    registry.register(CardTemplate::minion(BOG_LURKER, "Bog Lurker", 2, 2, 3));
    registry.register(
        CardTemplate::minion(SHIELD_BEARER, "Shield Bearer", 1, 0, 4).with_taunt(),
    );
    registry.register(
        CardTemplate::minion(SWIFT_RAIDER, "Swift Raider", 3, 3, 2).with_charge(),
    );
    registry.register_with_behavior(
        CardTemplate::minion(FROSTBORN_ELEMENTAL, "Frostborn Elemental", 3, 2, 2),
        Arc::new(FrostbornElemental),
    );
    registry.register_with_behavior(
        CardTemplate::minion(BROODMOTHER, "Broodmother", 3, 2, 1),
        Arc::new(Broodmother),
    );
    registry.register(CardTemplate::minion(HATCHLING, "Hatchling", 1, 1, 1));
    registry.register_with_behavior(
        CardTemplate::minion(VOLATILE_IMP, "Volatile Imp", 1, 1, 1),
        Arc::new(VolatileImp),
    );
    registry.register_with_behavior(
        CardTemplate::minion(BANNER_CAPTAIN, "Banner Captain", 3, 2, 2),
        Arc::new(BannerCaptain),
    );
    registry.register(
        CardTemplate::minion(GLEAMING_SENTRY, "Gleaming Sentry", 3, 2, 2).with_divine_shield(),
    );
    registry.register(
        CardTemplate::minion(SHADOW_PROWLER, "Shadow Prowler", 2, 3, 2).with_stealth(),
    );

    registry.register_with_behavior(CardTemplate::spell(SCORCH, "Scorch", 2), Arc::new(Scorch));
    registry.register_with_behavior(
        CardTemplate::spell(CINDER_NOVA, "Cinder Nova", 3),
        Arc::new(CinderNova),
    );
    registry.register_with_behavior(CardTemplate::spell(RALLY, "Rally", 2), Arc::new(Rally));
    registry.register_with_behavior(
        CardTemplate::spell(MIRROR_WARD, "Mirror Ward", 2).as_secret(),
        Arc::new(MirrorWard),
    );

    registry.register(CardTemplate::weapon(RUSTY_CLEAVER, "Rusty Cleaver", 2, 2, 2));

    registry
}

// === Hero power ===

/// Ember Jab: deal 1 damage to any character.
struct EmberJab;

impl CardBehavior for EmberJab {
    fn requires_target(&self) -> bool {
        true
    }

    fn cast(&self, _game: &Game, source: EntityId, target: Option<EntityId>) -> Vec<Event> {
        match target {
            Some(target) => vec![Event::damage(source, target, 1)],
            None => Vec::new(),
        }
    }
}

// === Minions ===

/// Frostborn Elemental: after this minion deals damage, freeze the victim.
struct FrostbornElemental;

impl CardBehavior for FrostbornElemental {
    fn triggers(&self) -> Vec<TriggerSpec> {
        vec![TriggerSpec::after(EventKind::Damage, Arc::new(FreezeOnDamage))]
    }
}

struct FreezeOnDamage;

impl TriggerHandler for FreezeOnDamage {
    fn queue_condition(&self, _game: &Game, event: &Event, owner: EntityId) -> bool {
        event.source == owner && matches!(event.payload, EventPayload::Damage { .. })
    }

    fn fire(&self, _game: &Game, event: &Event, owner: EntityId) -> Vec<Event> {
        match event.payload {
            EventPayload::Damage { target, .. } => vec![Event::freeze(owner, target)],
            _ => Vec::new(),
        }
    }
}

/// Broodmother: deathrattle, summon two Hatchlings.
struct Broodmother;

impl CardBehavior for Broodmother {
    fn deathrattle(&self, game: &Game, source: EntityId) -> Vec<Event> {
        let Some(owner) = game.entity(source).map(|e| e.owner) else {
            return Vec::new();
        };
        vec![
            Event::summon_token(source, owner, HATCHLING),
            Event::summon_token(source, owner, HATCHLING),
        ]
    }
}

/// Volatile Imp: deathrattle, deal 1 damage to the enemy hero.
struct VolatileImp;

impl CardBehavior for VolatileImp {
    fn deathrattle(&self, game: &Game, source: EntityId) -> Vec<Event> {
        let Some(owner) = game.entity(source).map(|e| e.owner) else {
            return Vec::new();
        };
        let enemy_hero = game.hero(owner.opponent());
        vec![Event::damage(source, enemy_hero, 1)]
    }
}

/// Banner Captain: your other minions have +1 attack.
struct BannerCaptain;

impl CardBehavior for BannerCaptain {
    fn auras(&self) -> Vec<Aura> {
        vec![Aura::new(
            AuraScope::OtherFriendlyMinions,
            EnchantEffect::StatsDelta { attack: 1, health: 0 },
        )]
    }
}

// === Spells ===

/// Scorch: deal 2 damage to any character.
struct Scorch;

impl CardBehavior for Scorch {
    fn requires_target(&self) -> bool {
        true
    }

    fn cast(&self, _game: &Game, source: EntityId, target: Option<EntityId>) -> Vec<Event> {
        match target {
            Some(target) => vec![Event::damage(source, target, 2)],
            None => Vec::new(),
        }
    }
}

/// Cinder Nova: deal 1 damage to all minions.
struct CinderNova;

impl CardBehavior for CinderNova {
    fn cast(&self, game: &Game, source: EntityId, _target: Option<EntityId>) -> Vec<Event> {
        let mut targets = Vec::new();
        for player in crate::core::PlayerId::both() {
            targets.extend_from_slice(game.board(player));
        }
        vec![Event::area_damage(source, targets, 1)]
    }
}

/// Rally: give a minion +1/+1.
struct Rally;

impl CardBehavior for Rally {
    fn requires_target(&self) -> bool {
        true
    }

    fn check_target(&self, game: &Game, _source: EntityId, candidate: EntityId) -> bool {
        game.entity(candidate)
            .is_some_and(|e| e.kind == CardKind::Minion && e.zone.kind == ZoneKind::Play)
    }

    fn cast(&self, _game: &Game, source: EntityId, target: Option<EntityId>) -> Vec<Event> {
        match target {
            Some(target) => vec![Event::enchant(
                source,
                target,
                EnchantEffect::StatsDelta { attack: 1, health: 1 },
            )],
            None => Vec::new(),
        }
    }
}

/// Mirror Ward: secret — when your opponent casts a spell, counter it.
struct MirrorWard;

impl CardBehavior for MirrorWard {
    fn triggers(&self) -> Vec<TriggerSpec> {
        vec![
            TriggerSpec::before(EventKind::PlayCard, Arc::new(MirrorWardTrigger))
                .active_in(&[ZoneKind::Secret])
                .one_shot(),
        ]
    }
}

struct MirrorWardTrigger;

impl TriggerHandler for MirrorWardTrigger {
    fn queue_condition(&self, game: &Game, event: &Event, owner: EntityId) -> bool {
        match event.payload {
            EventPayload::PlayCard { player, entity, .. } => {
                game.entity(owner).is_some_and(|o| o.owner != player)
                    && game.entity(entity).is_some_and(|e| e.kind == CardKind::Spell)
            }
            _ => false,
        }
    }

    fn cancels(&self, _game: &Game, _event: &Event, _owner: EntityId) -> bool {
        true
    }

    fn fire(&self, _game: &Game, event: &Event, owner: EntityId) -> Vec<Event> {
        let mut out = vec![Event::new(owner, EventPayload::SecretReveal { secret: owner })];
        // The countered spell is spent, not returned to hand.
        if let EventPayload::PlayCard { entity, .. } = event.payload {
            out.push(Event::new(owner, EventPayload::Discard { entity }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_registers() {
        let registry = content();

        assert!(registry.contains(HERO));
        assert!(registry.contains(SCORCH));
        assert!(registry.contains(RUSTY_CLEAVER));
        assert_eq!(registry.template(BOG_LURKER).unwrap().attack, 2);
        assert!(registry.template(MIRROR_WARD).unwrap().secret);
        assert!(registry.template(SHIELD_BEARER).unwrap().taunt);
    }

    #[test]
    fn test_targeted_content_requires_targets() {
        let registry = content();

        assert!(registry.behavior(SCORCH).requires_target());
        assert!(registry.behavior(RALLY).requires_target());
        assert!(!registry.behavior(CINDER_NOVA).requires_target());
    }
}
