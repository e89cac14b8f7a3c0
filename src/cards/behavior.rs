//! The card behavior hook interface.
//!
//! Every card template may register a `CardBehavior` alongside its data.
//! The engine calls these hooks at well-defined points and resolves the
//! events they return; it never looks inside. Cards with no behavior get
//! [`NullBehavior`] — a vanilla minion is exactly its stat line.
//!
//! All hooks take the game read-only. Content cannot mutate state
//! directly; every change flows through the returned events so ordering,
//! triggers, and the history see it.

use crate::core::EntityId;
use crate::enchant::Aura;
use crate::events::Event;
use crate::game::Game;
use crate::triggers::TriggerSpec;

/// How a card's action button should present itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayReadiness {
    /// Playable right now.
    Active,
    /// Not playable (cost, condition, wrong turn).
    Inactive,
    /// Playable and especially relevant (UI hint, e.g. combo ready).
    Highlighted,
}

/// Hook interface implemented by card content.
pub trait CardBehavior: Send + Sync {
    /// Extra playability constraints beyond mana and turn checks.
    fn readiness(&self, _game: &Game, _entity: EntityId) -> PlayReadiness {
        PlayReadiness::Active
    }

    /// Does playing this card require choosing a target?
    fn requires_target(&self) -> bool {
        false
    }

    /// Is `candidate` a legal target for this card?
    ///
    /// Only consulted when [`requires_target`](Self::requires_target) is
    /// true or a target was supplied anyway.
    fn check_target(&self, _game: &Game, _source: EntityId, _candidate: EntityId) -> bool {
        true
    }

    /// Battlecry: runs when the card is played from hand, after the minion
    /// has entered play.
    fn battlecry(&self, _game: &Game, _source: EntityId, _target: Option<EntityId>) -> Vec<Event> {
        Vec::new()
    }

    /// Spell and hero power effect.
    fn cast(&self, _game: &Game, _source: EntityId, _target: Option<EntityId>) -> Vec<Event> {
        Vec::new()
    }

    /// Deathrattle: runs when the entity dies, before it reaches the
    /// graveyard. Simultaneous casualties are already observable as dead.
    fn deathrattle(&self, _game: &Game, _source: EntityId) -> Vec<Event> {
        Vec::new()
    }

    /// Authored triggers to register when an entity of this card is
    /// created. They activate and deactivate with the entity's zone.
    fn triggers(&self) -> Vec<TriggerSpec> {
        Vec::new()
    }

    /// Ongoing auras radiating from this entity while it is in play.
    fn auras(&self) -> Vec<Aura> {
        Vec::new()
    }
}

/// The behavior of a card with no ability text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBehavior;

impl CardBehavior for NullBehavior {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_behavior_defaults() {
        let behavior = NullBehavior;

        assert!(!behavior.requires_target());
        assert!(behavior.triggers().is_empty());
        assert!(behavior.auras().is_empty());
    }
}
