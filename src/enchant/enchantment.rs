//! Enchantment records and their effects on a stat block.

use serde::{Deserialize, Serialize};

use crate::cards::StatBlock;
use crate::core::{EntityId, OrderOfPlay};

/// Unique identifier for an enchantment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnchantId(pub u32);

impl EnchantId {
    /// Create a new enchantment ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EnchantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enchant({})", self.0)
    }
}

/// The closed set of stat modifications an enchantment can make.
///
/// Effects write into the working stat snapshot during recompute; they
/// never touch an entity's base values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnchantEffect {
    /// Add to attack and maximum health.
    StatsDelta { attack: i64, health: i64 },
    /// Overwrite attack.
    SetAttack(i64),
    /// Overwrite maximum health.
    SetHealth(i64),
    /// Add to cost (negative makes the card cheaper; floor of zero).
    CostDelta(i64),
    GrantTaunt,
    GrantCharge,
    GrantStealth,
    GrantWindfury,
}

impl EnchantEffect {
    /// Apply this effect to a working stat snapshot.
    pub fn apply(&self, stats: &mut StatBlock) {
        match *self {
            EnchantEffect::StatsDelta { attack, health } => {
                stats.attack += attack;
                stats.max_health += health;
            }
            EnchantEffect::SetAttack(value) => stats.attack = value,
            EnchantEffect::SetHealth(value) => stats.max_health = value,
            EnchantEffect::CostDelta(delta) => {
                stats.cost = (stats.cost + delta).max(0);
            }
            EnchantEffect::GrantTaunt => stats.taunt = true,
            EnchantEffect::GrantCharge => stats.charge = true,
            EnchantEffect::GrantStealth => stats.stealth = true,
            EnchantEffect::GrantWindfury => stats.windfury = true,
        }
    }
}

/// A modifier attached to exactly one target entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    pub id: EnchantId,

    /// The entity whose stats this modifies.
    pub target: EntityId,

    /// The entity (or spell) that granted it.
    pub source: EntityId,

    /// Ordering within the recompute pass. Permanent enchantments get
    /// their own order-of-play at grant time; aura grants reuse their
    /// source's, so re-derivation keeps a stable order.
    pub order: OrderOfPlay,

    /// Granted by an aura this pass; dropped and re-derived next pass.
    pub from_aura: bool,

    pub effect: EnchantEffect,
}

impl Enchantment {
    /// Sort key for the recompute pass: permanent first, then by order.
    #[must_use]
    pub fn apply_key(&self) -> (bool, OrderOfPlay, EnchantId) {
        (self.from_aura, self.order, self.id)
    }
}
