//! Runtime entities.
//!
//! An `Entity` is one concrete simulated object: a hero, a hero power, a
//! minion copy, a spell being played, or an equipped weapon. It carries
//! two stat blocks — `base`, resolved once from the template, and
//! `current`, rebuilt by every aura update pass — plus the stateful
//! properties a recompute must never touch (damage taken, frozen, divine
//! shield, exhaustion).

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, OrderOfPlay, PlayerId};
use crate::zones::ZoneRef;

use super::template::{CardId, CardKind, CardTemplate, StatBlock};

/// A simulated object in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Arena key, allocated at creation, never reused.
    pub id: EntityId,

    /// The template this entity was instantiated from.
    pub card: CardId,

    pub kind: CardKind,

    /// Controlling player. Reassigned when a move crosses sides.
    pub owner: PlayerId,

    /// Mirror of the zone manager's record for cheap access.
    pub zone: ZoneRef,

    /// Assigned once, on first entry to an ordered-play zone.
    pub order_of_play: Option<OrderOfPlay>,

    /// Stats straight from the template. Only changes through permanent
    /// effects that rewrite the baseline (e.g. stealth breaking).
    pub base: StatBlock,

    /// Working stats, rebuilt from `base` plus enchantments each pass.
    pub current: StatBlock,

    /// Damage taken. `health() = current.max_health - damage`.
    /// For weapons this is durability spent.
    pub damage: i64,

    pub frozen: bool,
    pub divine_shield: bool,

    /// Summoning sickness: set when entering play, cleared at the owner's
    /// next turn begin. Charge bypasses it at attack time.
    pub exhausted: bool,

    pub attacks_this_turn: i64,

    /// Flagged for the next death sweep regardless of health.
    pub to_be_destroyed: bool,
}

impl Entity {
    /// Instantiate an entity from a template.
    #[must_use]
    pub fn from_template(id: EntityId, template: &CardTemplate, owner: PlayerId, zone: ZoneRef) -> Self {
        let base = template.base_stats();
        Self {
            id,
            card: template.id,
            kind: template.kind,
            owner,
            zone,
            order_of_play: None,
            base,
            current: base,
            damage: 0,
            frozen: false,
            divine_shield: template.divine_shield,
            exhausted: false,
            attacks_this_turn: 0,
            to_be_destroyed: false,
        }
    }

    /// Remaining health (or durability, for weapons).
    #[must_use]
    pub fn health(&self) -> i64 {
        self.current.max_health - self.damage
    }

    /// Current attack value.
    #[must_use]
    pub fn attack(&self) -> i64 {
        self.current.attack
    }

    /// Dead or flagged for destruction. Checked by the death sweep, and by
    /// deathrattles asking about their simultaneous casualties.
    #[must_use]
    pub fn is_mortally_wounded(&self) -> bool {
        self.health() <= 0 || self.to_be_destroyed
    }

    /// Attacks this entity may still make this turn.
    #[must_use]
    pub fn attacks_allowed(&self) -> i64 {
        if self.current.windfury {
            2
        } else {
            1
        }
    }

    /// Reset per-turn combat state at the owner's turn begin.
    pub fn ready(&mut self) {
        self.exhausted = false;
        self.attacks_this_turn = 0;
    }
}
