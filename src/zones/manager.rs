//! Zone manager: entity locations and movement.
//!
//! The `ZoneManager` is the single source of truth for which container each
//! entity occupies. It enforces per-zone capacity: a move into a full zone
//! is redirected to the mover's graveyard (the card "burns"), reported via
//! [`MoveOutcome::success`] being false.
//!
//! The manager only tracks membership. Trigger activation on zone change
//! and order-of-play assignment are layered on top by `Game::move_entity`,
//! which is the operation the rest of the engine calls.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::error::EngineError;

use super::zone::{ZoneKind, ZoneRef};

/// Position for inserting an entity into a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to the top of the zone (end of the container). The default.
    #[default]
    Top,
    /// Add to the bottom of the zone.
    Bottom,
    /// Insert at a specific index, clamped to the container length.
    Index(usize),
}

/// Where a move actually landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// False when the destination was full and the entity was redirected
    /// to the graveyard instead.
    pub success: bool,
    /// The zone the entity came from, if it had one.
    pub from: Option<ZoneRef>,
    /// The zone the entity ended up in.
    pub to: ZoneRef,
    /// Index within the destination container.
    pub index: usize,
}

/// Tracks entity locations across all zones of both players.
#[derive(Clone, Debug)]
pub struct ZoneManager {
    /// entity -> current zone
    locations: FxHashMap<EntityId, ZoneRef>,

    /// zone -> ordered occupants
    containers: FxHashMap<ZoneRef, Vec<EntityId>>,
}

impl ZoneManager {
    /// Create a manager with every zone of both players initialized empty.
    #[must_use]
    pub fn new() -> Self {
        let mut containers = FxHashMap::default();
        for player in PlayerId::both() {
            for kind in ZoneKind::ALL {
                containers.insert(ZoneRef::new(player, kind), Vec::new());
            }
        }
        Self {
            locations: FxHashMap::default(),
            containers,
        }
    }

    /// Place a freshly created entity into a zone.
    ///
    /// Unlike [`move_entity`](Self::move_entity), this does not apply
    /// capacity redirects: placement of starting entities (heroes, deck
    /// cards) is driven by setup code that must not overflow.
    pub fn place(
        &mut self,
        entity: EntityId,
        zone: ZoneRef,
        position: ZonePosition,
    ) -> Result<(), EngineError> {
        if self.locations.contains_key(&entity) {
            return Err(EngineError::DuplicateEntity(entity));
        }
        self.insert(entity, zone, position);
        Ok(())
    }

    /// Move an entity to a new zone.
    ///
    /// If the destination is at capacity, the move is redirected to the
    /// destination player's graveyard and `outcome.success` is false.
    ///
    /// Returns an error if the entity's recorded zone does not actually
    /// contain it — that means the data model is corrupted.
    pub fn move_entity(
        &mut self,
        entity: EntityId,
        to: ZoneRef,
        position: ZonePosition,
    ) -> Result<MoveOutcome, EngineError> {
        let from = self.locations.get(&entity).copied();

        if let Some(old) = from {
            let container = self
                .containers
                .get_mut(&old)
                .ok_or(EngineError::ZoneDesync { entity, zone: old })?;
            let pos = container
                .iter()
                .position(|&e| e == entity)
                .ok_or(EngineError::ZoneDesync { entity, zone: old })?;
            container.remove(pos);
        }

        let (dest, success) = if self.is_full(to) {
            (ZoneRef::new(to.player, ZoneKind::Graveyard), false)
        } else {
            (to, true)
        };

        let index = self.insert(entity, dest, position);

        Ok(MoveOutcome {
            success,
            from,
            to: dest,
            index,
        })
    }

    fn insert(&mut self, entity: EntityId, zone: ZoneRef, position: ZonePosition) -> usize {
        self.locations.insert(entity, zone);
        let container = self.containers.entry(zone).or_default();
        let index = match position {
            ZonePosition::Top => container.len(),
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) => i.min(container.len()),
        };
        container.insert(index, entity);
        index
    }

    /// The zone an entity is in.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<ZoneRef> {
        self.locations.get(&entity).copied()
    }

    /// Is the entity in this specific zone?
    #[must_use]
    pub fn is_in(&self, entity: EntityId, zone: ZoneRef) -> bool {
        self.locations.get(&entity) == Some(&zone)
    }

    /// The ordered occupants of a zone.
    #[must_use]
    pub fn entities(&self, zone: ZoneRef) -> &[EntityId] {
        self.containers.get(&zone).map_or(&[], |v| v.as_slice())
    }

    /// The index of an entity within its zone.
    #[must_use]
    pub fn index_of(&self, entity: EntityId) -> Option<usize> {
        let zone = self.zone_of(entity)?;
        self.entities(zone).iter().position(|&e| e == entity)
    }

    /// Number of entities in a zone.
    #[must_use]
    pub fn len(&self, zone: ZoneRef) -> usize {
        self.entities(zone).len()
    }

    /// Is a zone at capacity?
    #[must_use]
    pub fn is_full(&self, zone: ZoneRef) -> bool {
        match zone.kind.capacity() {
            Some(cap) => self.len(zone) >= cap,
            None => false,
        }
    }

    /// Remove and return the top entity of a zone (e.g. a deck draw).
    pub fn pop_top(&mut self, zone: ZoneRef) -> Option<EntityId> {
        let container = self.containers.get_mut(&zone)?;
        let entity = container.pop()?;
        self.locations.remove(&entity);
        Some(entity)
    }

    /// Shuffle a zone in place.
    pub fn shuffle(&mut self, zone: ZoneRef, rng: &mut crate::core::GameRng) {
        if let Some(container) = self.containers.get_mut(&zone) {
            rng.shuffle(container);
        }
    }

    /// Total number of entities tracked.
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.locations.len()
    }

    /// Does the manager track this entity at all?
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }
}

impl Default for ZoneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p0(kind: ZoneKind) -> ZoneRef {
        ZoneRef::new(PlayerId::new(0), kind)
    }

    #[test]
    fn test_place_and_lookup() {
        let mut zones = ZoneManager::new();

        zones.place(EntityId(10), p0(ZoneKind::Hand), ZonePosition::Top).unwrap();
        zones.place(EntityId(11), p0(ZoneKind::Hand), ZonePosition::Top).unwrap();

        assert_eq!(zones.zone_of(EntityId(10)), Some(p0(ZoneKind::Hand)));
        assert!(zones.is_in(EntityId(11), p0(ZoneKind::Hand)));
        assert_eq!(zones.zone_of(EntityId(99)), None);
        assert_eq!(zones.len(p0(ZoneKind::Hand)), 2);
    }

    #[test]
    fn test_duplicate_place_fails() {
        let mut zones = ZoneManager::new();

        zones.place(EntityId(10), p0(ZoneKind::Hand), ZonePosition::Top).unwrap();
        let err = zones.place(EntityId(10), p0(ZoneKind::Deck), ZonePosition::Top);

        assert_eq!(err, Err(EngineError::DuplicateEntity(EntityId(10))));
    }

    #[test]
    fn test_positions() {
        let mut zones = ZoneManager::new();
        let deck = p0(ZoneKind::Deck);

        zones.place(EntityId(10), deck, ZonePosition::Top).unwrap();
        zones.place(EntityId(11), deck, ZonePosition::Bottom).unwrap();
        zones.place(EntityId(12), deck, ZonePosition::Top).unwrap();
        zones.place(EntityId(13), deck, ZonePosition::Index(1)).unwrap();

        // Bottom to top: 11, 13, 10, 12
        assert_eq!(
            zones.entities(deck),
            &[EntityId(11), EntityId(13), EntityId(10), EntityId(12)]
        );
    }

    #[test]
    fn test_move_between_zones() {
        let mut zones = ZoneManager::new();
        let hand = p0(ZoneKind::Hand);
        let play = p0(ZoneKind::Play);

        zones.place(EntityId(10), hand, ZonePosition::Top).unwrap();

        let outcome = zones.move_entity(EntityId(10), play, ZonePosition::Top).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.from, Some(hand));
        assert_eq!(outcome.to, play);
        assert_eq!(zones.len(hand), 0);
        assert_eq!(zones.len(play), 1);
    }

    #[test]
    fn test_full_zone_redirects_to_graveyard() {
        let mut zones = ZoneManager::new();
        let play = p0(ZoneKind::Play);
        let hand = p0(ZoneKind::Hand);

        for i in 0..7 {
            zones.place(EntityId(i), play, ZonePosition::Top).unwrap();
        }
        zones.place(EntityId(100), hand, ZonePosition::Top).unwrap();

        let outcome = zones.move_entity(EntityId(100), play, ZonePosition::Top).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.to, p0(ZoneKind::Graveyard));
        assert_eq!(zones.len(play), 7);
        assert!(zones.is_in(EntityId(100), p0(ZoneKind::Graveyard)));
    }

    #[test]
    fn test_desync_detected() {
        let mut zones = ZoneManager::new();
        let hand = p0(ZoneKind::Hand);

        zones.place(EntityId(10), hand, ZonePosition::Top).unwrap();
        // Corrupt the container behind the location map's back.
        zones.containers.get_mut(&hand).unwrap().clear();

        let err = zones.move_entity(EntityId(10), p0(ZoneKind::Play), ZonePosition::Top);
        assert!(matches!(err, Err(EngineError::ZoneDesync { .. })));
    }

    #[test]
    fn test_pop_top() {
        let mut zones = ZoneManager::new();
        let deck = p0(ZoneKind::Deck);

        zones.place(EntityId(10), deck, ZonePosition::Top).unwrap();
        zones.place(EntityId(11), deck, ZonePosition::Top).unwrap();

        assert_eq!(zones.pop_top(deck), Some(EntityId(11)));
        assert!(!zones.contains(EntityId(11)));
        assert_eq!(zones.pop_top(deck), Some(EntityId(10)));
        assert_eq!(zones.pop_top(deck), None);
    }

    #[test]
    fn test_shuffle() {
        let mut zones = ZoneManager::new();
        let deck = p0(ZoneKind::Deck);

        for i in 0..20 {
            zones.place(EntityId(i), deck, ZonePosition::Top).unwrap();
        }

        let before: Vec<_> = zones.entities(deck).to_vec();
        let mut rng = crate::core::GameRng::new(42);
        zones.shuffle(deck, &mut rng);
        let after: Vec<_> = zones.entities(deck).to_vec();

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    fn test_index_of() {
        let mut zones = ZoneManager::new();
        let play = p0(ZoneKind::Play);

        zones.place(EntityId(10), play, ZonePosition::Top).unwrap();
        zones.place(EntityId(11), play, ZonePosition::Top).unwrap();

        assert_eq!(zones.index_of(EntityId(10)), Some(0));
        assert_eq!(zones.index_of(EntityId(11)), Some(1));
        assert_eq!(zones.index_of(EntityId(99)), None);
    }

    #[test]
    fn test_total_entities() {
        let mut zones = ZoneManager::new();

        assert_eq!(zones.total_entities(), 0);
        zones.place(EntityId(10), p0(ZoneKind::Deck), ZonePosition::Top).unwrap();
        zones.place(EntityId(11), p0(ZoneKind::Hand), ZonePosition::Top).unwrap();
        assert_eq!(zones.total_entities(), 2);
    }
}
