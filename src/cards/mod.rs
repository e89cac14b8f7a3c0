//! Card system: templates, runtime entities, behavior hooks, and the
//! content registry.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for a card template
//! - `CardKind`: the closed set of playable kinds
//! - `CardTemplate`: immutable per-card data, resolved once at registration
//! - `Entity`: a runtime instance with recomputed stats and combat state
//! - `CardBehavior`: the opaque hook interface implemented by content
//! - `ContentRegistry`: template and behavior lookup, injected into `Game`
//!
//! The core never interprets what a card *does* — it reads templates for
//! base stats and calls behavior hooks for everything else.

pub mod behavior;
pub mod instance;
pub mod registry;
pub mod template;

pub use behavior::{CardBehavior, NullBehavior, PlayReadiness};
pub use instance::Entity;
pub use registry::ContentRegistry;
pub use template::{CardId, CardKind, CardTemplate, StatBlock};
