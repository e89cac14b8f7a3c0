//! The two-phase mulligan protocol.

mod common;

use common::*;

use std::sync::Arc;

use hearth_sim::error::ActionError;
use hearth_sim::game::{GameBuilder, PlayerAction};
use hearth_sim::sets::basic;
use hearth_sim::zones::ZoneKind;

fn unstarted_game() -> hearth_sim::game::Game {
    GameBuilder::new(Arc::new(basic::content()))
        .seed(42)
        .hero(P0, basic::HERO, basic::HERO_POWER)
        .hero(P1, basic::HERO, basic::HERO_POWER)
        .deck(P0, vec![basic::BOG_LURKER; 20])
        .deck(P1, vec![basic::CLOCKWORK_RECRUIT; 20])
        .build()
        .unwrap()
}

#[test]
fn opening_hands_are_dealt_unevenly() {
    let game = unstarted_game();

    assert_eq!(game.zone(P0, ZoneKind::Hand).len(), 3);
    assert_eq!(game.zone(P1, ZoneKind::Hand).len(), 4);
    assert_eq!(game.zone(P0, ZoneKind::Deck).len(), 17);
    assert_eq!(game.zone(P1, ZoneKind::Deck).len(), 16);
}

#[test]
fn actions_are_rejected_until_both_players_resolve() {
    let mut game = unstarted_game();

    let err = game.submit(P0, PlayerAction::EndTurn).unwrap_err();
    assert_eq!(err, ActionError::MulliganPending.into());

    let offer = game.begin_mulligan(P0).unwrap();
    assert_eq!(offer.len(), 3);

    game.resolve_mulligan(P0, &offer).unwrap();
    // Replacements were drawn.
    assert_eq!(game.zone(P0, ZoneKind::Hand).len(), 3);

    // Still waiting on the second player.
    let err = game.submit(P0, PlayerAction::EndTurn).unwrap_err();
    assert_eq!(err, ActionError::MulliganPending.into());

    game.resolve_mulligan(P1, &[]).unwrap();

    // The first turn began: one mana, one draw.
    assert_eq!(game.active_player(), P0);
    assert_eq!(game.player(P0).mana, 1);
    assert_eq!(game.zone(P0, ZoneKind::Hand).len(), 4);
    game.submit(P0, PlayerAction::EndTurn).unwrap();
}

#[test]
fn mulligan_cannot_be_resolved_twice() {
    let mut game = unstarted_game();

    game.resolve_mulligan(P0, &[]).unwrap();
    let err = game.resolve_mulligan(P0, &[]).unwrap_err();
    assert_eq!(err, ActionError::MulliganClosed.into());
}

#[test]
fn mulligan_rejects_cards_outside_the_hand() {
    let mut game = unstarted_game();

    let deck_card = game.zone(P0, ZoneKind::Deck)[0];
    let err = game.resolve_mulligan(P0, &[deck_card]).unwrap_err();
    assert!(matches!(
        err,
        hearth_sim::error::SubmitError::Rejected(ActionError::WrongZone { .. })
    ));
    // Nothing moved.
    assert_eq!(game.zone(P0, ZoneKind::Hand).len(), 3);
    assert_eq!(game.zone(P0, ZoneKind::Deck).len(), 17);
}
