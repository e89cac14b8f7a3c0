//! The closed zone enumeration.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// The zones an entity can occupy.
///
/// Every entity is in exactly one zone at all times; "exists but in no
/// zone" is not a valid state once an entity has been created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Ordered stack; draws come off the top (the end of the container).
    Deck,
    /// Ordered list, capacity 10. Overflowing draws destroy the card.
    Hand,
    /// Ordered list, capacity 7. The board.
    Play,
    /// Ordered list, capacity 5.
    Secret,
    /// Unbounded discard pile.
    Graveyard,
    /// Singleton slot for the equipped weapon.
    Weapon,
    /// Singleton slot for the hero.
    Hero,
    /// Singleton slot for the hero power.
    HeroPower,
    /// Unbounded; entities here are permanently out of the game.
    RemovedFromGame,
}

impl ZoneKind {
    /// All zone kinds, in a fixed order used for deterministic iteration.
    pub const ALL: [ZoneKind; 9] = [
        ZoneKind::Deck,
        ZoneKind::Hand,
        ZoneKind::Play,
        ZoneKind::Secret,
        ZoneKind::Graveyard,
        ZoneKind::Weapon,
        ZoneKind::Hero,
        ZoneKind::HeroPower,
        ZoneKind::RemovedFromGame,
    ];

    /// Maximum entities this zone holds, or `None` for unbounded.
    #[must_use]
    pub const fn capacity(self) -> Option<usize> {
        match self {
            ZoneKind::Hand => Some(10),
            ZoneKind::Play => Some(7),
            ZoneKind::Secret => Some(5),
            ZoneKind::Weapon | ZoneKind::Hero | ZoneKind::HeroPower => Some(1),
            ZoneKind::Deck | ZoneKind::Graveyard | ZoneKind::RemovedFromGame => None,
        }
    }

    /// Does entering this zone assign an order-of-play?
    ///
    /// These are the zones whose occupants participate in tie-breaking:
    /// the board, the hero slots, the weapon slot, and secrets.
    #[must_use]
    pub const fn assigns_order_of_play(self) -> bool {
        matches!(
            self,
            ZoneKind::Play
                | ZoneKind::Hero
                | ZoneKind::HeroPower
                | ZoneKind::Weapon
                | ZoneKind::Secret
        )
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One concrete zone container: a kind belonging to one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRef {
    pub player: PlayerId,
    pub kind: ZoneKind,
}

impl ZoneRef {
    /// Create a zone reference.
    #[must_use]
    pub const fn new(player: PlayerId, kind: ZoneKind) -> Self {
        Self { player, kind }
    }
}

impl std::fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'s {}", self.player, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities() {
        assert_eq!(ZoneKind::Hand.capacity(), Some(10));
        assert_eq!(ZoneKind::Play.capacity(), Some(7));
        assert_eq!(ZoneKind::Secret.capacity(), Some(5));
        assert_eq!(ZoneKind::Hero.capacity(), Some(1));
        assert_eq!(ZoneKind::Deck.capacity(), None);
        assert_eq!(ZoneKind::Graveyard.capacity(), None);
    }

    #[test]
    fn test_order_of_play_zones() {
        assert!(ZoneKind::Play.assigns_order_of_play());
        assert!(ZoneKind::Hero.assigns_order_of_play());
        assert!(ZoneKind::Weapon.assigns_order_of_play());
        assert!(!ZoneKind::Hand.assigns_order_of_play());
        assert!(!ZoneKind::Deck.assigns_order_of_play());
        assert!(!ZoneKind::Graveyard.assigns_order_of_play());
    }

    #[test]
    fn test_all_is_complete() {
        assert_eq!(ZoneKind::ALL.len(), 9);
        let mut seen = std::collections::HashSet::new();
        for kind in ZoneKind::ALL {
            assert!(seen.insert(kind));
        }
    }

    #[test]
    fn test_zone_ref_display() {
        let zone = ZoneRef::new(PlayerId::new(0), ZoneKind::Play);
        assert_eq!(format!("{}", zone), "Player 0's Play");
    }
}
