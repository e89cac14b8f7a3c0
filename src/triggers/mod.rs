//! Trigger system: standing registrations that react to events.
//!
//! A trigger belongs to one entity and watches one or more event kinds.
//! When a matching event resolves, the trigger's handler runs and returns
//! follow-up events, which the resolver settles depth-first before the
//! next trigger in line gets its turn.
//!
//! ## Key Components
//!
//! - [`TriggerHandler`]: the opaque hook interface implemented by content
//! - [`TriggerSpec`]: how content declares a trigger (timing, watched
//!   kinds, active zones)
//! - [`Trigger`]: a live registration owned by the registry
//! - [`TriggerRegistry`]: bucketed storage with ancestor-aware lookup
//!
//! ## Lifecycle
//!
//! Authored triggers are registered when their owning entity is created
//! and flip between active and inactive as the entity moves zones — the
//! flip happens synchronously inside the move, so observers immediately
//! see the post-move truth. A disabled trigger is physically removed by
//! `sweep_dead()`, which the resolver calls once after each event fully
//! resolves (never mid-iteration).

pub mod handler;
pub mod registry;

pub use handler::{TriggerHandler, TriggerSpec};
pub use registry::{Trigger, TriggerId, TriggerRegistry, TriggerTiming};
