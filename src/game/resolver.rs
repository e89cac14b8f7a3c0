//! The event resolver: depth-first cascade resolution and boundary
//! maintenance.
//!
//! One call to [`Game::run_events`] drains the top-level queue. Each event
//! resolves fully — before-triggers, own effect, follow-ups recursively,
//! after-triggers, trigger sweep — and only when control returns to depth
//! zero does boundary maintenance run: attack/health recompute, the death
//! sweep (looped until no new deaths), the remaining-attribute recompute,
//! and finally the terminal check once the queue is empty.

use std::sync::Arc;

use log::{debug, trace};

use crate::core::{EntityId, PlayerId};
use crate::error::EngineError;
use crate::events::{Event, EventKind, EventRecord};
use crate::triggers::TriggerTiming;
use crate::zones::ZoneKind;

use super::{Game, GameOutcome};

/// Upper bound on legitimate cause-and-effect chains. Exceeding it means
/// content is generating an unbounded cascade.
pub(crate) const MAX_CASCADE_DEPTH: usize = 128;

impl Game {
    /// Feed events into the queue and resolve until it drains.
    pub(crate) fn run_events(&mut self, initial: Vec<Event>) -> Result<(), EngineError> {
        self.queue.extend(initial);
        while let Some(event) = self.queue.pop_front() {
            self.resolve_event(event, 0, true)?;
            self.boundary_maintenance()?;
        }
        self.check_outcome();
        Ok(())
    }

    /// Resolve one event and its entire follow-up tree.
    ///
    /// `record` is false only for the individual death events inside a
    /// death phase, which were already recorded as a batch.
    fn resolve_event(
        &mut self,
        mut event: Event,
        depth: usize,
        record: bool,
    ) -> Result<(), EngineError> {
        if depth >= MAX_CASCADE_DEPTH {
            return Err(EngineError::CascadeOverflow(depth));
        }
        trace!("depth {depth}: resolving {}", event.kind());

        self.fire_triggers(TriggerTiming::Before, &mut event, depth)?;

        let follow_ups = if event.enabled {
            event.apply(self)?
        } else {
            Vec::new()
        };

        if record {
            self.record(&event);
        }

        if event.kind() == EventKind::DeathPhase {
            // Simultaneity: every death in the sweep enters the history
            // before any individual death's rattle follow-ups resolve.
            for death in &follow_ups {
                self.record(death);
            }
            for death in follow_ups {
                self.resolve_event(death, depth + 1, false)?;
            }
        } else {
            for follow_up in follow_ups {
                self.resolve_event(follow_up, depth + 1, true)?;
            }
        }

        self.fire_triggers(TriggerTiming::After, &mut event, depth)?;
        self.triggers.sweep_dead();
        Ok(())
    }

    /// Run the related triggers for an event at one timing.
    ///
    /// The related set is computed once, condition-filtered, and sorted by
    /// owner order-of-play. Each trigger's liveness and condition are then
    /// re-checked right before it fires: an earlier sibling may have
    /// flipped them.
    fn fire_triggers(
        &mut self,
        timing: TriggerTiming,
        event: &mut Event,
        depth: usize,
    ) -> Result<(), EngineError> {
        if !event.enabled {
            return Ok(());
        }

        let mut related = self.triggers.live_for(event.kind(), timing);
        related.retain(|&id| {
            self.triggers
                .get(id)
                .is_some_and(|t| t.handler.queue_condition(self, event, t.owner))
        });
        related.sort_by_key(|&id| {
            let owner = self
                .triggers
                .get(id)
                .map_or(EntityId(u32::MAX), |t| t.owner);
            (self.play_order_key(owner), id.0)
        });

        for id in related {
            let Some(trigger) = self.triggers.get(id) else {
                continue;
            };
            if !trigger.is_live() {
                continue;
            }
            let owner = trigger.owner;
            let one_shot = trigger.one_shot;
            let handler = Arc::clone(&trigger.handler);

            if !handler.trigger_condition(self, event, owner) {
                continue;
            }
            if timing == TriggerTiming::Before && handler.cancels(self, event, owner) {
                debug!("{owner} cancelled {}", event.kind());
                event.fizzle();
            }

            let follow_ups = handler.fire(self, event, owner);
            if one_shot {
                self.triggers.disable(id);
            }
            for follow_up in follow_ups {
                self.resolve_event(follow_up, depth + 1, true)?;
            }
        }
        Ok(())
    }

    /// Aura recompute and death creation, run only between outermost
    /// events. Death phases loop until a sweep finds nothing: a
    /// deathrattle can kill more minions.
    fn boundary_maintenance(&mut self) -> Result<(), EngineError> {
        self.aura_update_attack_health();

        while let Some(phase) = self.collect_deaths() {
            debug!("death phase at turn {}", self.turn);
            self.resolve_event(phase, 1, true)?;
            self.aura_update_attack_health();
        }

        self.aura_update_other();
        Ok(())
    }

    /// Append an event to the history and notify observers.
    fn record(&mut self, event: &Event) {
        let record = EventRecord::of(event);
        if record.fizzled {
            debug!("fizzled: {} from {}", record.kind, record.source);
        }
        for observer in &self.observers {
            observer(&record);
        }
        self.history.push_back(record);
    }

    /// Terminal detection, checked at depth zero once the queue drains.
    fn check_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let dead = |game: &Game, player: PlayerId| {
            let hero = game.players[player].hero;
            game.entity(hero).is_none_or(|e| {
                e.zone.kind == ZoneKind::Graveyard || e.is_mortally_wounded()
            })
        };
        let first_dead = dead(self, PlayerId::new(0));
        let second_dead = dead(self, PlayerId::new(1));

        self.outcome = match (first_dead, second_dead) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::Winner(PlayerId::new(1))),
            (false, true) => Some(GameOutcome::Winner(PlayerId::new(0))),
            (false, false) => None,
        };
    }
}
