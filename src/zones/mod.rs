//! Zone system: the fixed set of per-player containers and the manager
//! that moves entities between them.
//!
//! Unlike the card templates and abilities, zones are *not* content-defined:
//! the rules fix the zone set, each zone's capacity, and what happens when a
//! move would overflow one (the moved card is destroyed instead).
//!
//! ## Key Types
//!
//! - [`ZoneKind`]: the closed zone enumeration
//! - [`ZoneRef`]: a `(player, kind)` pair naming one concrete container
//! - [`ZoneManager`]: membership tracking and movement
//! - [`ZonePosition`]: position specifier for ordered zones
//! - [`MoveOutcome`]: where a move actually landed

pub mod manager;
pub mod zone;

pub use manager::{MoveOutcome, ZoneManager, ZonePosition};
pub use zone::{ZoneKind, ZoneRef};
