//! Game setup.
//!
//! The builder wires a content registry, two hero loadouts, two decks,
//! and a seed into a ready `Game`: heroes and hero powers in their slots,
//! decks shuffled, opening hands drawn (three cards for the first player,
//! four for the second). By default the game then waits for both
//! mulligans; `skip_mulligan` starts the first turn immediately, which is
//! what most tests want.

use std::collections::VecDeque;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;

use crate::cards::{CardId, ContentRegistry};
use crate::core::{EntityId, GameRng, PlaySequencer, PlayerId, PlayerMap};
use crate::error::EngineError;
use crate::triggers::TriggerRegistry;
use crate::zones::{ZoneKind, ZoneManager, ZonePosition, ZoneRef};

use super::{Game, PlayerState};

/// One player's starting configuration.
#[derive(Clone, Debug)]
struct Loadout {
    hero: CardId,
    hero_power: CardId,
    deck: Vec<CardId>,
}

/// Builder for a two-player game.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use hearth_sim::core::PlayerId;
/// use hearth_sim::game::GameBuilder;
/// use hearth_sim::sets::basic;
///
/// let content = Arc::new(basic::content());
/// let game = GameBuilder::new(content)
///     .seed(42)
///     .hero(PlayerId::new(0), basic::HERO, basic::HERO_POWER)
///     .hero(PlayerId::new(1), basic::HERO, basic::HERO_POWER)
///     .deck(PlayerId::new(0), vec![basic::BOG_LURKER; 10])
///     .deck(PlayerId::new(1), vec![basic::BOG_LURKER; 10])
///     .skip_mulligan()
///     .build()
///     .unwrap();
/// ```
pub struct GameBuilder {
    content: Arc<ContentRegistry>,
    seed: u64,
    loadouts: PlayerMap<Option<Loadout>>,
    skip_mulligan: bool,
}

impl GameBuilder {
    /// Start building a game over the given content.
    #[must_use]
    pub fn new(content: Arc<ContentRegistry>) -> Self {
        Self {
            content,
            seed: 0,
            loadouts: PlayerMap::with_default(),
            skip_mulligan: false,
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set a player's hero and hero power.
    #[must_use]
    pub fn hero(mut self, player: PlayerId, hero: CardId, hero_power: CardId) -> Self {
        let loadout = self.loadouts[player].get_or_insert_with(|| Loadout {
            hero,
            hero_power,
            deck: Vec::new(),
        });
        loadout.hero = hero;
        loadout.hero_power = hero_power;
        self
    }

    /// Set a player's deck list, top of deck last.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, deck: Vec<CardId>) -> Self {
        let loadout = self
            .loadouts[player]
            .as_mut()
            .expect("set the hero before the deck");
        loadout.deck = deck;
        self
    }

    /// Skip the mulligan and start the first turn immediately.
    #[must_use]
    pub fn skip_mulligan(mut self) -> Self {
        self.skip_mulligan = true;
        self
    }

    /// Build the game.
    pub fn build(self) -> Result<Game, EngineError> {
        for player in PlayerId::both() {
            assert!(
                self.loadouts[player].is_some(),
                "no hero configured for {player}"
            );
        }

        let mut game = Game {
            content: Arc::clone(&self.content),
            entities: FxHashMap::default(),
            zones: ZoneManager::new(),
            triggers: TriggerRegistry::new(),
            enchantments: Vec::new(),
            players: PlayerMap::new(|_| PlayerState {
                hero: EntityId(0),
                hero_power: EntityId(0),
                mana: 0,
                max_mana: 0,
                fatigue: 0,
                hero_power_used: false,
                mulligan_done: false,
            }),
            seq: PlaySequencer::new(),
            rng: GameRng::new(self.seed),
            next_entity: 1,
            next_enchant: 1,
            active: PlayerId::new(0),
            turn: 1,
            queue: VecDeque::new(),
            history: Vector::new(),
            observers: Vec::new(),
            outcome: None,
            started: false,
        };

        for player in PlayerId::both() {
            let loadout = self.loadouts[player].clone().expect("checked above");

            let hero = game.create_entity(
                loadout.hero,
                player,
                ZoneRef::new(player, ZoneKind::Hero),
                ZonePosition::Top,
            )?;
            let hero_power = game.create_entity(
                loadout.hero_power,
                player,
                ZoneRef::new(player, ZoneKind::HeroPower),
                ZonePosition::Top,
            )?;
            game.players[player].hero = hero;
            game.players[player].hero_power = hero_power;

            let deck = ZoneRef::new(player, ZoneKind::Deck);
            for card in &loadout.deck {
                game.create_entity(*card, player, deck, ZonePosition::Top)?;
            }
            game.zones.shuffle(deck, &mut game.rng);
        }

        // First player draws three, second draws four.
        for (player, count) in [(PlayerId::new(0), 3), (PlayerId::new(1), 4)] {
            let deck = ZoneRef::new(player, ZoneKind::Deck);
            let hand = ZoneRef::new(player, ZoneKind::Hand);
            for _ in 0..count {
                let Some(&card) = game.zones.entities(deck).last() else {
                    break;
                };
                game.move_entity(card, hand, ZonePosition::Top)?;
            }
        }

        if self.skip_mulligan {
            for player in PlayerId::both() {
                game.players[player].mulligan_done = true;
            }
            game.start()?;
        }

        Ok(game)
    }
}
