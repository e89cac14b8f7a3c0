//! Error types for the rules engine.
//!
//! Errors come in two tiers with very different meanings:
//!
//! - [`ActionError`]: a player action was rejected during validation.
//!   Nothing has been mutated; the caller can show the reason and let the
//!   player pick something else.
//!
//! - [`EngineError`]: a structural invariant was violated mid-resolution.
//!   This indicates an engine or content bug. `Game::submit` rolls the
//!   state back to the pre-action snapshot before surfacing it, so the
//!   last committed state stays consistent.
//!
//! Fizzles are deliberately *not* errors: an event whose precondition went
//! stale disables itself, shows up in the event history with a fizzle mark,
//! and resolution continues.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::zones::{ZoneKind, ZoneRef};

/// A player action was rejected before any event was queued.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough mana: need {need}, have {have}")]
    InsufficientMana { need: i64, have: i64 },

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("the game is already over")]
    GameFinished,

    #[error("the mulligan has not been resolved yet")]
    MulliganPending,

    #[error("the mulligan is already resolved")]
    MulliganClosed,

    #[error("no entity {0}")]
    UnknownEntity(EntityId),

    #[error("{entity} is in {found}, expected {expected:?}")]
    WrongZone {
        entity: EntityId,
        found: ZoneRef,
        expected: ZoneKind,
    },

    #[error("this card requires a target")]
    TargetRequired,

    #[error("{0} is not a legal target")]
    InvalidTarget(EntityId),

    #[error("the board is full")]
    BoardFull,

    #[error("that secret is already in play")]
    DuplicateSecret,

    #[error("the hero power was already used this turn")]
    HeroPowerSpent,

    #[error("{0} cannot attack")]
    CannotAttack(EntityId),

    #[error("{0} has no attacks left this turn")]
    NoAttacksLeft(EntityId),

    #[error("a taunt minion is in the way")]
    TauntInTheWay,
}

/// A structural invariant was violated. Fatal for the in-flight action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("entity {0} missing from the arena")]
    EntityMissing(EntityId),

    #[error("entity {0} already exists in the zone manager")]
    DuplicateEntity(EntityId),

    #[error("entity {entity} not present in its recorded zone {zone}")]
    ZoneDesync { entity: EntityId, zone: ZoneRef },

    #[error("entity {0} entered play without an order of play")]
    MissingOrderOfPlay(EntityId),

    #[error("no card template registered for {0}")]
    UnknownCard(CardId),

    #[error("event cascade exceeded depth {0}")]
    CascadeOverflow(usize),
}

/// Either rejection at validation or a structural fault during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] ActionError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::InsufficientMana { need: 5, have: 3 };
        assert_eq!(err.to_string(), "not enough mana: need 5, have 3");

        let err = ActionError::NotYourTurn(PlayerId::new(1));
        assert_eq!(err.to_string(), "it is not Player 1's turn");
    }

    #[test]
    fn test_engine_error_messages() {
        let err = EngineError::CascadeOverflow(128);
        assert_eq!(err.to_string(), "event cascade exceeded depth 128");
    }

    #[test]
    fn test_submit_error_from() {
        let err: SubmitError = ActionError::BoardFull.into();
        assert!(matches!(err, SubmitError::Rejected(ActionError::BoardFull)));

        let err: SubmitError = EngineError::EntityMissing(EntityId(7)).into();
        assert!(matches!(err, SubmitError::Engine(_)));
    }
}
