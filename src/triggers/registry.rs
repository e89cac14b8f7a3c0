//! Trigger registry: bucketed storage and ancestor-aware lookup.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;
use crate::events::EventKind;
use crate::zones::ZoneKind;

use super::handler::{TriggerHandler, TriggerSpec};

/// Unique identifier for a trigger registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// When in event resolution a trigger fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerTiming {
    /// Before the event's own effect (can cancel it).
    Before,
    /// After the event's own effect (most common).
    #[default]
    After,
}

/// A live trigger registration.
pub struct Trigger {
    pub id: TriggerId,

    /// The entity this trigger belongs to. Sorting among simultaneous
    /// triggers follows the owner's order-of-play.
    pub owner: EntityId,

    pub timing: TriggerTiming,

    /// Event kinds watched, as declared (umbrella kinds allowed).
    pub watched: SmallVec<[EventKind; 2]>,

    /// Zones in which this trigger is live.
    pub active_in: SmallVec<[ZoneKind; 2]>,

    /// Tracks whether the owner currently occupies an active zone.
    /// Updated synchronously by zone moves.
    pub active: bool,

    /// Cleared to cancel the trigger; swept from the registry afterwards.
    pub enabled: bool,

    /// Disable after firing once.
    pub one_shot: bool,

    pub handler: Arc<dyn TriggerHandler>,
}

impl Trigger {
    /// Can this trigger currently fire?
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.active && self.enabled
    }
}

impl Clone for Trigger {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            owner: self.owner,
            timing: self.timing,
            watched: self.watched.clone(),
            active_in: self.active_in.clone(),
            active: self.active,
            enabled: self.enabled,
            one_shot: self.one_shot,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("timing", &self.timing)
            .field("watched", &self.watched)
            .field("active", &self.active)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Storage and lookup for triggers.
///
/// Triggers are bucketed by the event kinds they declare. Lookup for an
/// event unions the buckets of every ancestor of the event's kind, so a
/// trigger registered for an umbrella kind sees all of its descendants.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    triggers: FxHashMap<TriggerId, Trigger>,

    /// kind -> triggers registered under that kind, in registration order.
    buckets: FxHashMap<EventKind, Vec<TriggerId>>,

    /// owner -> that entity's triggers, for zone-change synchronization.
    by_owner: FxHashMap<EntityId, SmallVec<[TriggerId; 2]>>,

    next_id: u32,
}

impl TriggerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger for `owner` currently occupying `zone`.
    ///
    /// The trigger starts active iff `zone` is one of its active zones.
    pub fn register(&mut self, owner: EntityId, spec: TriggerSpec, zone: ZoneKind) -> TriggerId {
        let id = TriggerId::new(self.next_id);
        self.next_id += 1;

        let trigger = Trigger {
            id,
            owner,
            timing: spec.timing,
            watched: spec.watched,
            active_in: spec.active_in,
            active: false,
            enabled: true,
            one_shot: spec.one_shot,
            handler: spec.handler,
        };

        for kind in &trigger.watched {
            self.buckets.entry(*kind).or_default().push(id);
        }
        self.by_owner.entry(owner).or_default().push(id);

        let active = trigger.active_in.contains(&zone);
        self.triggers.insert(id, trigger);
        if active {
            self.set_active(id, true);
        }

        id
    }

    /// Get a trigger by ID.
    #[must_use]
    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(&id)
    }

    /// Live triggers (active and enabled) matching an event kind at the
    /// given timing, in registration order.
    ///
    /// Includes triggers registered under any ancestor of `kind`.
    #[must_use]
    pub fn live_for(&self, kind: EventKind, timing: TriggerTiming) -> Vec<TriggerId> {
        let mut found = Vec::new();
        for ancestor in kind.ancestors() {
            let Some(bucket) = self.buckets.get(ancestor) else {
                continue;
            };
            for &id in bucket {
                let Some(trigger) = self.triggers.get(&id) else {
                    continue;
                };
                if trigger.timing == timing && trigger.is_live() && !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Synchronize the active flags of an entity's triggers after it
    /// moved to `zone`. Called from inside the move itself.
    pub fn sync_zone(&mut self, owner: EntityId, zone: ZoneKind) {
        let ids: SmallVec<[TriggerId; 2]> =
            self.by_owner.get(&owner).cloned().unwrap_or_default();
        for id in ids {
            let active = self
                .triggers
                .get(&id)
                .is_some_and(|t| t.active_in.contains(&zone));
            self.set_active(id, active);
        }
    }

    fn set_active(&mut self, id: TriggerId, active: bool) {
        if let Some(trigger) = self.triggers.get_mut(&id) {
            trigger.active = active;
        }
    }

    /// Disable a trigger. It stops matching immediately and is physically
    /// removed by the next sweep.
    pub fn disable(&mut self, id: TriggerId) {
        if let Some(trigger) = self.triggers.get_mut(&id) {
            trigger.enabled = false;
        }
    }

    /// Remove every disabled trigger from all buckets.
    ///
    /// Invoked once after each event fully resolves — never while the
    /// related set for an event is being iterated.
    pub fn sweep_dead(&mut self) {
        let dead: Vec<TriggerId> = self
            .triggers
            .values()
            .filter(|t| !t.enabled)
            .map(|t| t.id)
            .collect();

        for id in dead {
            self.remove(id);
        }
    }

    /// Remove all triggers owned by an entity (e.g. when it leaves the
    /// game for good).
    pub fn remove_for_owner(&mut self, owner: EntityId) {
        let ids: SmallVec<[TriggerId; 2]> =
            self.by_owner.get(&owner).cloned().unwrap_or_default();
        for id in ids {
            self.remove(id);
        }
    }

    fn remove(&mut self, id: TriggerId) {
        let Some(trigger) = self.triggers.remove(&id) else {
            return;
        };
        for kind in &trigger.watched {
            if let Some(bucket) = self.buckets.get_mut(kind) {
                bucket.retain(|&t| t != id);
                if bucket.is_empty() {
                    self.buckets.remove(kind);
                }
            }
        }
        if let Some(owned) = self.by_owner.get_mut(&trigger.owner) {
            owned.retain(|t| *t != id);
            if owned.is_empty() {
                self.by_owner.remove(&trigger.owner);
            }
        }
    }

    /// Total registered triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::game::Game;

    struct Silent;

    impl TriggerHandler for Silent {
        fn fire(&self, _game: &Game, _event: &Event, _owner: EntityId) -> Vec<Event> {
            Vec::new()
        }
    }

    fn spec(kind: EventKind) -> TriggerSpec {
        TriggerSpec::after(kind, Arc::new(Silent))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TriggerRegistry::new();

        let id = registry.register(EntityId(10), spec(EventKind::Damage), ZoneKind::Play);

        assert_eq!(registry.len(), 1);
        assert!(registry.get(id).unwrap().is_live());
        assert_eq!(registry.live_for(EventKind::Damage, TriggerTiming::After), vec![id]);
        assert!(registry.live_for(EventKind::Heal, TriggerTiming::After).is_empty());
    }

    #[test]
    fn test_timing_filter() {
        let mut registry = TriggerRegistry::new();

        let before = registry.register(
            EntityId(10),
            TriggerSpec::before(EventKind::Attack, Arc::new(Silent)),
            ZoneKind::Play,
        );
        let after = registry.register(EntityId(11), spec(EventKind::Attack), ZoneKind::Play);

        assert_eq!(registry.live_for(EventKind::Attack, TriggerTiming::Before), vec![before]);
        assert_eq!(registry.live_for(EventKind::Attack, TriggerTiming::After), vec![after]);
    }

    #[test]
    fn test_umbrella_kind_sees_descendants() {
        let mut registry = TriggerRegistry::new();

        let id = registry.register(EntityId(10), spec(EventKind::Death), ZoneKind::Play);

        for kind in [
            EventKind::MinionDeath,
            EventKind::HeroDeath,
            EventKind::WeaponDeath,
        ] {
            assert_eq!(registry.live_for(kind, TriggerTiming::After), vec![id]);
        }
        assert!(registry.live_for(EventKind::Damage, TriggerTiming::After).is_empty());
    }

    #[test]
    fn test_multi_kind_no_duplicates() {
        let mut registry = TriggerRegistry::new();

        // Watches both a leaf kind and its umbrella; must appear once.
        let id = registry.register(
            EntityId(10),
            spec(EventKind::MinionDeath).also_on(EventKind::Death),
            ZoneKind::Play,
        );

        assert_eq!(registry.live_for(EventKind::MinionDeath, TriggerTiming::After), vec![id]);
    }

    #[test]
    fn test_zone_activation() {
        let mut registry = TriggerRegistry::new();

        // Registered while still in hand: inactive.
        let id = registry.register(EntityId(10), spec(EventKind::Damage), ZoneKind::Hand);
        assert!(registry.live_for(EventKind::Damage, TriggerTiming::After).is_empty());

        registry.sync_zone(EntityId(10), ZoneKind::Play);
        assert_eq!(registry.live_for(EventKind::Damage, TriggerTiming::After), vec![id]);

        registry.sync_zone(EntityId(10), ZoneKind::Graveyard);
        assert!(registry.live_for(EventKind::Damage, TriggerTiming::After).is_empty());
    }

    #[test]
    fn test_sweep_removes_disabled_permanently() {
        let mut registry = TriggerRegistry::new();

        let id = registry.register(EntityId(10), spec(EventKind::Damage), ZoneKind::Play);

        registry.disable(id);
        // Disabled triggers stop matching even before the sweep.
        assert!(registry.live_for(EventKind::Damage, TriggerTiming::After).is_empty());

        registry.sweep_dead();
        assert_eq!(registry.len(), 0);
        assert!(registry.get(id).is_none());

        // Re-activating the owner's zone must not resurrect it.
        registry.sync_zone(EntityId(10), ZoneKind::Play);
        assert!(registry.live_for(EventKind::Damage, TriggerTiming::After).is_empty());
    }

    #[test]
    fn test_remove_for_owner() {
        let mut registry = TriggerRegistry::new();

        registry.register(EntityId(10), spec(EventKind::Damage), ZoneKind::Play);
        registry.register(EntityId(10), spec(EventKind::Heal), ZoneKind::Play);
        let other = registry.register(EntityId(20), spec(EventKind::Damage), ZoneKind::Play);

        registry.remove_for_owner(EntityId(10));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.live_for(EventKind::Damage, TriggerTiming::After), vec![other]);
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = TriggerRegistry::new();

        let a = registry.register(EntityId(10), spec(EventKind::Damage), ZoneKind::Play);
        let b = registry.register(EntityId(11), spec(EventKind::Damage), ZoneKind::Play);
        let c = registry.register(EntityId(12), spec(EventKind::Any), ZoneKind::Play);

        assert_eq!(
            registry.live_for(EventKind::Damage, TriggerTiming::After),
            vec![a, b, c]
        );
    }
}
