//! Entity identification.
//!
//! Every simulated object (hero, hero power, minion, spell, weapon) has a
//! unique `EntityId` allocated by the `Game` arena. All cross-references in
//! the engine — a trigger's owner, an enchantment's target, an aura's
//! source — are stored as ids, never as direct references.
//!
//! Ids are allocated in creation order and never reused, so they double as
//! a stable fallback ordering for entities that have not yet been assigned
//! an order-of-play.

use serde::{Deserialize, Serialize};

/// Unique identifier for any simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
