//! The death creation step.
//!
//! After each outermost event (and after each death phase, until the
//! board settles), the engine scans every death-tracked entity — minions
//! on the board, both heroes, equipped weapons — for zero health or a
//! destruction flag. All simultaneous deaths are collected *before* any
//! resolves, ordered by order-of-play, and wrapped in one `DeathPhase`
//! container event whose own effect releases the typed death events.

use crate::cards::CardKind;
use crate::core::{EntityId, PlayerId};
use crate::events::{Event, EventPayload};
use crate::zones::{ZoneKind, ZoneRef};

use super::Game;

impl Game {
    /// Collect every pending death into a single death phase event.
    ///
    /// Returns `None` when nothing is dying.
    pub(crate) fn collect_deaths(&self) -> Option<Event> {
        let mut dying: Vec<EntityId> = Vec::new();

        for player in PlayerId::both() {
            for kind in [ZoneKind::Play, ZoneKind::Hero, ZoneKind::Weapon] {
                for &id in self.zones.entities(ZoneRef::new(player, kind)) {
                    if self
                        .entity(id)
                        .is_some_and(|e| e.is_mortally_wounded())
                    {
                        dying.push(id);
                    }
                }
            }
        }

        if dying.is_empty() {
            return None;
        }
        dying.sort_by_key(|&id| self.play_order_key(id));

        let deaths: Vec<Event> = dying
            .iter()
            .filter_map(|&id| {
                let entity = self.entity(id)?;
                let payload = match entity.kind {
                    CardKind::Minion => EventPayload::MinionDeath {
                        entity: id,
                        index: self.zones.index_of(id).unwrap_or(0),
                    },
                    CardKind::Hero => EventPayload::HeroDeath {
                        player: entity.owner,
                    },
                    CardKind::Weapon => EventPayload::WeaponDeath { entity: id },
                    // Spells and hero powers have no death events.
                    CardKind::Spell | CardKind::HeroPower => return None,
                };
                Some(Event::new(id, payload))
            })
            .collect();

        let source = dying[0];
        Some(Event::new(source, EventPayload::DeathPhase { deaths }))
    }
}
