//! # hearth-sim
//!
//! A deterministic rules engine for Hearthstone-style card battles.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same seed and the same action sequence produce
//!    byte-identical event histories. All tie-breaks go through the
//!    order-of-play counter; the RNG is seeded and serializable.
//!
//! 2. **Content Is Opaque**: Card abilities live behind the `CardBehavior`
//!    and `TriggerHandler` traits. The core invokes hooks and resolves the
//!    events they return; it never inspects their implementation.
//!
//! 3. **Injection Over Globals**: All content is registered into a
//!    `ContentRegistry` built once at startup and passed into `Game`.
//!    Fixture content for tests is three lines away.
//!
//! ## Architecture
//!
//! - **Event cascade**: A player action expands into initial events. Each
//!   event runs its before-triggers, applies its own effect, resolves
//!   follow-up events depth-first, then runs its after-triggers. Boundary
//!   maintenance (aura recompute, death creation) runs only once the
//!   outermost event has fully unwound.
//!
//! - **Arena of entities**: Everything simulated (heroes, minions, spells,
//!   weapons, hero powers) is an `Entity` keyed by `EntityId`. Triggers,
//!   enchantments, and auras reference entities by id, never by pointer.
//!
//! ## Modules
//!
//! - `core`: Entity ids, order-of-play, players, RNG
//! - `zones`: The fixed zone set and the zone manager
//! - `cards`: Templates, runtime entities, behavior hooks, content registry
//! - `events`: The closed event enum, ancestor table, and event effects
//! - `triggers`: Trigger registry and dispatch
//! - `enchant`: Enchantments, auras, and the stat recompute pass
//! - `game`: The `Game` aggregate, resolver loop, and player-action facade
//! - `sets`: A small built-in content set used by tests and demos

pub mod core;
pub mod error;
pub mod zones;
pub mod cards;
pub mod events;
pub mod triggers;
pub mod enchant;
pub mod game;
pub mod sets;

// Re-export commonly used types
pub use crate::core::{
    EntityId, OrderOfPlay, PlaySequencer,
    PlayerId, PlayerMap,
    GameRng, GameRngState,
};

pub use crate::error::{ActionError, EngineError, SubmitError};

pub use crate::zones::{MoveOutcome, ZoneKind, ZoneManager, ZonePosition, ZoneRef};

pub use crate::cards::{
    CardBehavior, CardId, CardKind, CardTemplate, ContentRegistry,
    Entity, PlayReadiness, StatBlock,
};

pub use crate::events::{Event, EventKind, EventPayload, EventRecord};

pub use crate::triggers::{
    Trigger, TriggerHandler, TriggerId, TriggerRegistry, TriggerSpec, TriggerTiming,
};

pub use crate::enchant::{
    Aura, AuraScope, EnchantEffect, EnchantId, Enchantment,
};

pub use crate::game::{Game, GameBuilder, GameOutcome, PlayerAction, PlayerState};
