//! Card templates: immutable per-card data.
//!
//! A `CardTemplate` is resolved once, at registration, into a plain value.
//! Runtime entities keep a `CardId` back to their template and rebuild
//! their working stats from it on every aura update pass.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template.
///
/// Identifies the *kind* of card ("Frostborn Elemental"), not a specific
/// copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The closed set of card kinds the rules know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Hero,
    HeroPower,
    Minion,
    Spell,
    Weapon,
}

/// The derived attributes recomputed by the aura update pass.
///
/// `max_health` doubles as weapon durability and hero health. Stateful
/// properties that must *not* be restored by a recompute (damage taken,
/// frozen, divine shield) live on [`Entity`](super::Entity) instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: i64,
    pub max_health: i64,
    pub cost: i64,
    pub taunt: bool,
    pub charge: bool,
    pub stealth: bool,
    pub windfury: bool,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use hearth_sim::cards::{CardTemplate, CardId, CardKind};
///
/// let croc = CardTemplate::minion(CardId::new(7), "Bog Lurker", 2, 2, 3);
/// assert_eq!(croc.base_stats().attack, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub cost: i64,
    pub attack: i64,
    /// Health for minions and heroes, durability for weapons.
    pub health: i64,
    pub taunt: bool,
    pub charge: bool,
    pub stealth: bool,
    pub windfury: bool,
    pub divine_shield: bool,
    /// Spells with this flag enter the secret zone instead of casting.
    pub secret: bool,
}

impl CardTemplate {
    /// Create a template with everything zeroed except identity.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost: 0,
            attack: 0,
            health: 0,
            taunt: false,
            charge: false,
            stealth: false,
            windfury: false,
            divine_shield: false,
            secret: false,
        }
    }

    /// Create a minion template with the usual cost/attack/health triple.
    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: i64, attack: i64, health: i64) -> Self {
        let mut t = Self::new(id, name, CardKind::Minion);
        t.cost = cost;
        t.attack = attack;
        t.health = health;
        t
    }

    /// Create a spell template.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        let mut t = Self::new(id, name, CardKind::Spell);
        t.cost = cost;
        t
    }

    /// Create a weapon template (`health` is durability).
    #[must_use]
    pub fn weapon(id: CardId, name: impl Into<String>, cost: i64, attack: i64, durability: i64) -> Self {
        let mut t = Self::new(id, name, CardKind::Weapon);
        t.cost = cost;
        t.attack = attack;
        t.health = durability;
        t
    }

    /// Create a hero template.
    #[must_use]
    pub fn hero(id: CardId, name: impl Into<String>, health: i64) -> Self {
        let mut t = Self::new(id, name, CardKind::Hero);
        t.health = health;
        t
    }

    /// Create a hero power template.
    #[must_use]
    pub fn hero_power(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        let mut t = Self::new(id, name, CardKind::HeroPower);
        t.cost = cost;
        t
    }

    /// Set the taunt flag (builder pattern).
    #[must_use]
    pub fn with_taunt(mut self) -> Self {
        self.taunt = true;
        self
    }

    /// Set the charge flag (builder pattern).
    #[must_use]
    pub fn with_charge(mut self) -> Self {
        self.charge = true;
        self
    }

    /// Set the stealth flag (builder pattern).
    #[must_use]
    pub fn with_stealth(mut self) -> Self {
        self.stealth = true;
        self
    }

    /// Set the windfury flag (builder pattern).
    #[must_use]
    pub fn with_windfury(mut self) -> Self {
        self.windfury = true;
        self
    }

    /// Set the divine shield flag (builder pattern).
    #[must_use]
    pub fn with_divine_shield(mut self) -> Self {
        self.divine_shield = true;
        self
    }

    /// Mark a spell as a secret (builder pattern).
    #[must_use]
    pub fn as_secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// The stat block an entity starts from before enchantments apply.
    #[must_use]
    pub fn base_stats(&self) -> StatBlock {
        StatBlock {
            attack: self.attack,
            max_health: self.health,
            cost: self.cost,
            taunt: self.taunt,
            charge: self.charge,
            stealth: self.stealth,
            windfury: self.windfury,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minion_template() {
        let t = CardTemplate::minion(CardId::new(1), "Bog Lurker", 2, 2, 3);

        assert_eq!(t.kind, CardKind::Minion);
        assert_eq!(t.cost, 2);
        assert_eq!(t.attack, 2);
        assert_eq!(t.health, 3);
        assert!(!t.taunt);
    }

    #[test]
    fn test_builder_flags() {
        let t = CardTemplate::minion(CardId::new(2), "Shield Bearer", 1, 0, 4)
            .with_taunt()
            .with_divine_shield();

        assert!(t.taunt);
        assert!(t.divine_shield);
        assert!(!t.charge);
    }

    #[test]
    fn test_base_stats() {
        let t = CardTemplate::minion(CardId::new(3), "Swift Raider", 3, 3, 2).with_charge();
        let stats = t.base_stats();

        assert_eq!(stats.attack, 3);
        assert_eq!(stats.max_health, 2);
        assert_eq!(stats.cost, 3);
        assert!(stats.charge);
        assert!(!stats.taunt);
    }

    #[test]
    fn test_weapon_durability() {
        let t = CardTemplate::weapon(CardId::new(4), "Rusty Cleaver", 2, 2, 2);
        assert_eq!(t.base_stats().max_health, 2);
    }

    #[test]
    fn test_serialization() {
        let t = CardTemplate::spell(CardId::new(5), "Scorch", 2);
        let json = serde_json::to_string(&t).unwrap();
        let deserialized: CardTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(t, deserialized);
    }
}
