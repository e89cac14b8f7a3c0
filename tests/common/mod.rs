//! Shared fixtures for the integration tests.
//!
//! Games are driven exclusively through the public `submit` API. Decks are
//! mono-card so hand contents stay predictable under any shuffle seed.

#![allow(dead_code)]

use std::sync::Arc;

use hearth_sim::cards::CardId;
use hearth_sim::core::{EntityId, PlayerId};
use hearth_sim::game::{Game, GameBuilder, PlayerAction};
use hearth_sim::sets::basic;

pub const P0: PlayerId = PlayerId(0);
pub const P1: PlayerId = PlayerId(1);

/// A started two-player game with twenty-card mono decks.
pub fn duel(deck0: CardId, deck1: CardId) -> Game {
    duel_seeded(42, deck0, deck1)
}

pub fn duel_seeded(seed: u64, deck0: CardId, deck1: CardId) -> Game {
    GameBuilder::new(Arc::new(basic::content()))
        .seed(seed)
        .hero(P0, basic::HERO, basic::HERO_POWER)
        .hero(P1, basic::HERO, basic::HERO_POWER)
        .deck(P0, vec![deck0; 20])
        .deck(P1, vec![deck1; 20])
        .skip_mulligan()
        .build()
        .unwrap()
}

/// A started game where both decks are empty (for fatigue tests).
pub fn empty_deck_duel() -> Game {
    GameBuilder::new(Arc::new(basic::content()))
        .seed(42)
        .hero(P0, basic::HERO, basic::HERO_POWER)
        .hero(P1, basic::HERO, basic::HERO_POWER)
        .deck(P0, Vec::new())
        .deck(P1, Vec::new())
        .skip_mulligan()
        .build()
        .unwrap()
}

/// End the active player's turn.
pub fn end_turn(game: &mut Game) {
    let player = game.active_player();
    game.submit(player, PlayerAction::EndTurn).unwrap();
}

/// Play the first card in the active player's hand.
pub fn play_first(game: &mut Game, target: Option<EntityId>) -> EntityId {
    let player = game.active_player();
    let card = game.zone(player, hearth_sim::zones::ZoneKind::Hand)[0];
    game.submit(
        player,
        PlayerAction::PlayCard {
            card,
            target,
            position: None,
        },
    )
    .unwrap();
    card
}

pub fn hero_health(game: &Game, player: PlayerId) -> i64 {
    game.entity(game.hero(player)).unwrap().health()
}
