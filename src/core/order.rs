//! Order-of-play: the engine's universal tie-breaker.
//!
//! Whenever several things happen "at the same time" — two minions dying in
//! one sweep, an area spell hitting a full board, two triggers reacting to
//! one event — the engine linearizes them by order-of-play: a strictly
//! increasing counter assigned once per entity when it first enters an
//! ordered-play zone, and never changed afterwards.
//!
//! Events and triggers do not carry their own counter value; they sort by
//! their owning entity's, so everything attached to one entity resolves as
//! a block.
//!
//! The sequencer is owned by `Game`, not process-global, so independent
//! games never observe each other's counters and replays stay exact.

use serde::{Deserialize, Serialize};

/// A position in the order of play.
///
/// Values are only meaningful relative to other values issued by the same
/// [`PlaySequencer`]. Lower means earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderOfPlay(pub u64);

impl OrderOfPlay {
    /// Get the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderOfPlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic issuer of [`OrderOfPlay`] values.
///
/// Values start at 1 and strictly increase; a value is never reissued.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySequencer {
    next: u64,
}

impl PlaySequencer {
    /// Create a sequencer that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next order-of-play value.
    pub fn assign_next(&mut self) -> OrderOfPlay {
        let value = OrderOfPlay(self.next);
        // A u64 cannot plausibly wrap within one game; treat it as corruption.
        self.next = self.next.checked_add(1).expect("order-of-play counter overflow");
        value
    }

    /// How many values have been issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_increasing() {
        let mut seq = PlaySequencer::new();
        let a = seq.assign_next();
        let b = seq.assign_next();
        let c = seq.assign_next();

        assert!(a < b);
        assert!(b < c);
        assert_eq!(seq.issued(), 3);
    }

    #[test]
    fn test_never_reissued() {
        let mut seq = PlaySequencer::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(seq.assign_next()));
        }
    }

    #[test]
    fn test_independent_sequencers() {
        let mut a = PlaySequencer::new();
        let mut b = PlaySequencer::new();

        assert_eq!(a.assign_next(), b.assign_next());
        a.assign_next();
        assert_ne!(a.issued(), b.issued());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut seq = PlaySequencer::new();
        seq.assign_next();
        seq.assign_next();

        let json = serde_json::to_string(&seq).unwrap();
        let mut restored: PlaySequencer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.assign_next(), OrderOfPlay(3));
    }
}
