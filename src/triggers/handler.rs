//! The trigger hook interface and the spec content uses to declare one.

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::core::EntityId;
use crate::events::{Event, EventKind};
use crate::game::Game;
use crate::zones::ZoneKind;

use super::registry::TriggerTiming;

/// The opaque hook a card ability implements to react to events.
///
/// All methods take the game read-only; mutations happen exclusively
/// through the events `fire` returns.
///
/// Conditions are checked twice by design: `queue_condition` when the
/// related set for an event is computed, and `trigger_condition` again
/// right before this trigger actually runs — an earlier sibling's side
/// effects may have invalidated it in between (the attacker that died
/// mid-combat must not land its second hit).
pub trait TriggerHandler: Send + Sync {
    /// Should this trigger join the queue for `event`?
    fn queue_condition(&self, _game: &Game, _event: &Event, _owner: EntityId) -> bool {
        true
    }

    /// Re-checked immediately before firing.
    fn trigger_condition(&self, _game: &Game, _event: &Event, _owner: EntityId) -> bool {
        true
    }

    /// Before-timing only: returning true disables the event before its
    /// own effect runs (counter-style abilities).
    fn cancels(&self, _game: &Game, _event: &Event, _owner: EntityId) -> bool {
        false
    }

    /// React to the event. Returned events resolve immediately,
    /// depth-first, before the next related trigger runs.
    fn fire(&self, game: &Game, event: &Event, owner: EntityId) -> Vec<Event>;
}

/// How content declares a trigger on its card.
///
/// Converted into a live [`Trigger`](super::Trigger) registration when the
/// owning entity is created.
#[derive(Clone)]
pub struct TriggerSpec {
    /// When in event resolution the trigger fires.
    pub timing: TriggerTiming,

    /// Event kinds watched. Umbrella kinds match all their descendants.
    pub watched: SmallVec<[EventKind; 2]>,

    /// Zones in which the trigger is live. Defaults to the board.
    pub active_in: SmallVec<[ZoneKind; 2]>,

    /// Disable after firing once (deathrattle-style).
    pub one_shot: bool,

    pub handler: Arc<dyn TriggerHandler>,
}

impl TriggerSpec {
    /// Declare an after-trigger watching one event kind, live in Play.
    #[must_use]
    pub fn after(kind: EventKind, handler: Arc<dyn TriggerHandler>) -> Self {
        Self {
            timing: TriggerTiming::After,
            watched: smallvec![kind],
            active_in: smallvec![ZoneKind::Play],
            one_shot: false,
            handler,
        }
    }

    /// Declare a before-trigger watching one event kind, live in Play.
    #[must_use]
    pub fn before(kind: EventKind, handler: Arc<dyn TriggerHandler>) -> Self {
        Self {
            timing: TriggerTiming::Before,
            ..Self::after(kind, handler)
        }
    }

    /// Watch an additional event kind (builder pattern).
    #[must_use]
    pub fn also_on(mut self, kind: EventKind) -> Self {
        if !self.watched.contains(&kind) {
            self.watched.push(kind);
        }
        self
    }

    /// Override the zones this trigger is live in (builder pattern).
    #[must_use]
    pub fn active_in(mut self, zones: &[ZoneKind]) -> Self {
        self.active_in = SmallVec::from_slice(zones);
        self
    }

    /// Disable after the first firing (builder pattern).
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }
}

impl std::fmt::Debug for TriggerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerSpec")
            .field("timing", &self.timing)
            .field("watched", &self.watched)
            .field("active_in", &self.active_in)
            .field("one_shot", &self.one_shot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl TriggerHandler for Silent {
        fn fire(&self, _game: &Game, _event: &Event, _owner: EntityId) -> Vec<Event> {
            Vec::new()
        }
    }

    #[test]
    fn test_spec_defaults() {
        let spec = TriggerSpec::after(EventKind::Damage, Arc::new(Silent));

        assert_eq!(spec.timing, TriggerTiming::After);
        assert_eq!(spec.watched.as_slice(), &[EventKind::Damage]);
        assert_eq!(spec.active_in.as_slice(), &[ZoneKind::Play]);
        assert!(!spec.one_shot);
    }

    #[test]
    fn test_spec_builders() {
        let spec = TriggerSpec::before(EventKind::Attack, Arc::new(Silent))
            .also_on(EventKind::UseHeroPower)
            .also_on(EventKind::Attack) // duplicate ignored
            .active_in(&[ZoneKind::Secret])
            .one_shot();

        assert_eq!(spec.timing, TriggerTiming::Before);
        assert_eq!(
            spec.watched.as_slice(),
            &[EventKind::Attack, EventKind::UseHeroPower]
        );
        assert_eq!(spec.active_in.as_slice(), &[ZoneKind::Secret]);
        assert!(spec.one_shot);
    }
}
