//! Game events: the closed payload enum and the ancestor table.
//!
//! An event is an immutable-once-queued description of something the
//! simulation proposes to happen. Resolution is the only way game state
//! changes after setup: player actions expand into events, triggers return
//! more events, and each event's [`apply`](Event::apply) performs the
//! actual mutation.
//!
//! ## Kinds and ancestry
//!
//! Triggers declare interest in [`EventKind`]s. Kinds form a shallow
//! hierarchy expressed as an explicit [`ancestors`](EventKind::ancestors)
//! table — a trigger watching [`EventKind::Death`] sees minion, hero, and
//! weapon deaths alike, and [`EventKind::Any`] sees everything. Matching
//! is a slice lookup, never type introspection.
//!
//! ## Lifecycle
//!
//! created → queued → before-triggers → own effect (if still enabled) →
//! follow-up events, depth-first → after-triggers → discarded. An event
//! whose precondition went stale *fizzles*: it disables itself, produces
//! nothing, and resolution continues.

pub mod apply;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::enchant::EnchantEffect;
use crate::zones::ZonePosition;

/// The closed set of event kinds, including the two umbrella kinds that
/// exist only for trigger registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    TurnBegin,
    TurnEnd,
    DrawCard,
    Discard,
    Damage,
    AreaDamage,
    Heal,
    Freeze,
    Enchant,
    Summon,
    PlayCard,
    Attack,
    UseHeroPower,
    EquipWeapon,
    SecretReveal,
    MinionDeath,
    HeroDeath,
    WeaponDeath,
    DeathPhase,
    /// Umbrella kind covering all three death kinds. Never instantiated.
    Death,
    /// Umbrella kind covering every event. Never instantiated.
    Any,
}

impl EventKind {
    /// The ancestor chain of this kind, starting with the kind itself and
    /// ending with [`EventKind::Any`].
    ///
    /// Trigger lookup unions the registry buckets of every ancestor, so a
    /// trigger registered for an umbrella kind also sees its descendants.
    #[must_use]
    pub const fn ancestors(self) -> &'static [EventKind] {
        match self {
            EventKind::TurnBegin => &[EventKind::TurnBegin, EventKind::Any],
            EventKind::TurnEnd => &[EventKind::TurnEnd, EventKind::Any],
            EventKind::DrawCard => &[EventKind::DrawCard, EventKind::Any],
            EventKind::Discard => &[EventKind::Discard, EventKind::Any],
            EventKind::Damage => &[EventKind::Damage, EventKind::Any],
            EventKind::AreaDamage => &[EventKind::AreaDamage, EventKind::Any],
            EventKind::Heal => &[EventKind::Heal, EventKind::Any],
            EventKind::Freeze => &[EventKind::Freeze, EventKind::Any],
            EventKind::Enchant => &[EventKind::Enchant, EventKind::Any],
            EventKind::Summon => &[EventKind::Summon, EventKind::Any],
            EventKind::PlayCard => &[EventKind::PlayCard, EventKind::Any],
            EventKind::Attack => &[EventKind::Attack, EventKind::Any],
            EventKind::UseHeroPower => &[EventKind::UseHeroPower, EventKind::Any],
            EventKind::EquipWeapon => &[EventKind::EquipWeapon, EventKind::Any],
            EventKind::SecretReveal => &[EventKind::SecretReveal, EventKind::Any],
            EventKind::MinionDeath => {
                &[EventKind::MinionDeath, EventKind::Death, EventKind::Any]
            }
            EventKind::HeroDeath => &[EventKind::HeroDeath, EventKind::Death, EventKind::Any],
            EventKind::WeaponDeath => {
                &[EventKind::WeaponDeath, EventKind::Death, EventKind::Any]
            }
            EventKind::DeathPhase => &[EventKind::DeathPhase, EventKind::Any],
            EventKind::Death => &[EventKind::Death, EventKind::Any],
            EventKind::Any => &[EventKind::Any],
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Event-specific data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Start of a player's turn: mana ramp, readying, then a draw.
    TurnBegin { player: PlayerId },

    /// End of a player's turn: thaw, then the opponent's turn begins.
    TurnEnd { player: PlayerId },

    /// Draw one card; an empty deck deals fatigue damage instead.
    DrawCard { player: PlayerId },

    /// Discard a card from hand to the graveyard.
    Discard { entity: EntityId },

    /// Deal damage to one character.
    Damage { target: EntityId, amount: i64 },

    /// Deal damage to several characters at once; expands into one
    /// `Damage` event per target in order of play.
    AreaDamage { targets: Vec<EntityId>, amount: i64 },

    /// Restore health to one character.
    Heal { target: EntityId, amount: i64 },

    /// Freeze one character.
    Freeze { target: EntityId },

    /// Permanently attach an enchantment to one character.
    Enchant {
        target: EntityId,
        effect: EnchantEffect,
    },

    /// Put a minion into play. `entity` is an existing card when played
    /// from hand, or `None` for tokens created from `card` on the fly.
    Summon {
        player: PlayerId,
        card: CardId,
        entity: Option<EntityId>,
        position: ZonePosition,
    },

    /// A card leaves the hand: minions summon, spells cast, weapons equip.
    PlayCard {
        player: PlayerId,
        entity: EntityId,
        target: Option<EntityId>,
        position: ZonePosition,
    },

    /// Declared combat between two characters.
    Attack { attacker: EntityId, defender: EntityId },

    /// The active player's hero power fires.
    UseHeroPower {
        player: PlayerId,
        target: Option<EntityId>,
    },

    /// Equip a weapon, destroying any currently equipped one.
    EquipWeapon {
        player: PlayerId,
        card: CardId,
        entity: Option<EntityId>,
    },

    /// A secret triggered and flips to the graveyard.
    SecretReveal { secret: EntityId },

    /// A minion died. `index` is its board position before removal, kept
    /// for deathrattles that care about placement.
    MinionDeath { entity: EntityId, index: usize },

    /// A hero died; the game ends once resolution unwinds.
    HeroDeath { player: PlayerId },

    /// A weapon broke or was destroyed.
    WeaponDeath { entity: EntityId },

    /// Container for all deaths found in one sweep. Its own effect just
    /// releases the typed death events, which the resolver records as a
    /// batch before resolving any of them.
    DeathPhase { deaths: Vec<Event> },
}

impl EventPayload {
    /// The kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::TurnBegin { .. } => EventKind::TurnBegin,
            EventPayload::TurnEnd { .. } => EventKind::TurnEnd,
            EventPayload::DrawCard { .. } => EventKind::DrawCard,
            EventPayload::Discard { .. } => EventKind::Discard,
            EventPayload::Damage { .. } => EventKind::Damage,
            EventPayload::AreaDamage { .. } => EventKind::AreaDamage,
            EventPayload::Heal { .. } => EventKind::Heal,
            EventPayload::Freeze { .. } => EventKind::Freeze,
            EventPayload::Enchant { .. } => EventKind::Enchant,
            EventPayload::Summon { .. } => EventKind::Summon,
            EventPayload::PlayCard { .. } => EventKind::PlayCard,
            EventPayload::Attack { .. } => EventKind::Attack,
            EventPayload::UseHeroPower { .. } => EventKind::UseHeroPower,
            EventPayload::EquipWeapon { .. } => EventKind::EquipWeapon,
            EventPayload::SecretReveal { .. } => EventKind::SecretReveal,
            EventPayload::MinionDeath { .. } => EventKind::MinionDeath,
            EventPayload::HeroDeath { .. } => EventKind::HeroDeath,
            EventPayload::WeaponDeath { .. } => EventKind::WeaponDeath,
            EventPayload::DeathPhase { .. } => EventKind::DeathPhase,
        }
    }
}

/// An event in flight.
///
/// `source` is the entity the event belongs to; events sort by their
/// source's order-of-play wherever simultaneous events must be linearized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub source: EntityId,
    pub payload: EventPayload,
    /// Cleared when the event fizzles or a before-trigger cancels it.
    pub enabled: bool,
}

impl Event {
    /// Create an enabled event.
    #[must_use]
    pub fn new(source: EntityId, payload: EventPayload) -> Self {
        Self {
            source,
            payload,
            enabled: true,
        }
    }

    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Disable this event. It will produce no effect and no follow-ups.
    pub fn fizzle(&mut self) {
        self.enabled = false;
    }

    /// Create a damage event.
    #[must_use]
    pub fn damage(source: EntityId, target: EntityId, amount: i64) -> Self {
        Self::new(source, EventPayload::Damage { target, amount })
    }

    /// Create an area damage event.
    #[must_use]
    pub fn area_damage(source: EntityId, targets: Vec<EntityId>, amount: i64) -> Self {
        Self::new(source, EventPayload::AreaDamage { targets, amount })
    }

    /// Create a heal event.
    #[must_use]
    pub fn heal(source: EntityId, target: EntityId, amount: i64) -> Self {
        Self::new(source, EventPayload::Heal { target, amount })
    }

    /// Create a freeze event.
    #[must_use]
    pub fn freeze(source: EntityId, target: EntityId) -> Self {
        Self::new(source, EventPayload::Freeze { target })
    }

    /// Create a permanent enchantment event.
    #[must_use]
    pub fn enchant(source: EntityId, target: EntityId, effect: EnchantEffect) -> Self {
        Self::new(source, EventPayload::Enchant { target, effect })
    }

    /// Create a token summon event.
    #[must_use]
    pub fn summon_token(source: EntityId, player: PlayerId, card: CardId) -> Self {
        Self::new(
            source,
            EventPayload::Summon {
                player,
                card,
                entity: None,
                position: ZonePosition::Top,
            },
        )
    }
}

/// One entry in the append-only event history.
///
/// Fizzled events stay visible here — silent to the player, but available
/// to debugging and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    pub source: EntityId,
    pub payload: EventPayload,
    pub fizzled: bool,
}

impl EventRecord {
    /// Snapshot an event for the history.
    #[must_use]
    pub fn of(event: &Event) -> Self {
        Self {
            kind: event.kind(),
            source: event.source,
            payload: event.payload.clone(),
            fizzled: !event.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_include_self_and_any() {
        for kind in [EventKind::Damage, EventKind::TurnBegin, EventKind::Summon] {
            let ancestors = kind.ancestors();
            assert_eq!(ancestors[0], kind);
            assert_eq!(*ancestors.last().unwrap(), EventKind::Any);
        }
    }

    #[test]
    fn test_death_kinds_share_umbrella() {
        for kind in [
            EventKind::MinionDeath,
            EventKind::HeroDeath,
            EventKind::WeaponDeath,
        ] {
            assert!(kind.ancestors().contains(&EventKind::Death));
        }
        assert!(!EventKind::DeathPhase.ancestors().contains(&EventKind::Death));
        assert!(!EventKind::Damage.ancestors().contains(&EventKind::Death));
    }

    #[test]
    fn test_payload_kind() {
        let payload = EventPayload::Damage {
            target: EntityId(5),
            amount: 3,
        };
        assert_eq!(payload.kind(), EventKind::Damage);

        let payload = EventPayload::DeathPhase { deaths: Vec::new() };
        assert_eq!(payload.kind(), EventKind::DeathPhase);
    }

    #[test]
    fn test_fizzle() {
        let mut event = Event::damage(EntityId(1), EntityId(2), 3);
        assert!(event.enabled);

        event.fizzle();
        assert!(!event.enabled);

        let record = EventRecord::of(&event);
        assert!(record.fizzled);
        assert_eq!(record.kind, EventKind::Damage);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::area_damage(EntityId(1), vec![EntityId(2), EntityId(3)], 1);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_nested_death_phase_serialization() {
        let phase = Event::new(
            EntityId(1),
            EventPayload::DeathPhase {
                deaths: vec![Event::new(
                    EntityId(2),
                    EventPayload::MinionDeath {
                        entity: EntityId(2),
                        index: 0,
                    },
                )],
            },
        );
        let bytes = bincode::serialize(&phase).unwrap();
        let deserialized: Event = bincode::deserialize(&bytes).unwrap();
        assert_eq!(phase, deserialized);
    }
}
