//! The player-action facade: the only entry point collaborators use to
//! drive a game forward.
//!
//! `submit` validates an action fully before queueing anything — a
//! rejected action mutates nothing. Once events start resolving, the only
//! way back out is completion or a structural fault, in which case the
//! pre-action snapshot is restored wholesale.
//!
//! The mulligan is an explicit two-phase protocol: `begin_mulligan`
//! returns the offer, `resolve_mulligan` applies the player's choice, and
//! the first turn starts once both players have resolved.

use log::debug;

use crate::cards::CardKind;
use crate::core::{EntityId, PlayerId};
use crate::error::{ActionError, EngineError, SubmitError};
use crate::events::{Event, EventPayload};
use crate::zones::{ZoneKind, ZonePosition, ZoneRef};

use super::{Game, GameOutcome};

/// The closed set of commands a player can submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    /// Play a card from hand: summon a minion, cast a spell, equip a
    /// weapon. `position` is the board slot for minions.
    PlayCard {
        card: EntityId,
        target: Option<EntityId>,
        position: Option<usize>,
    },
    /// Use the hero power (once per turn).
    UseHeroPower { target: Option<EntityId> },
    /// Attack with a character on the board or the hero.
    Attack {
        attacker: EntityId,
        defender: EntityId,
    },
    EndTurn,
    Concede,
}

impl Game {
    /// Submit one player action.
    ///
    /// Returns the terminal outcome once the game has ended, `None`
    /// otherwise. Validation failures leave the game untouched;
    /// structural faults roll back to the pre-action state.
    pub fn submit(
        &mut self,
        player: PlayerId,
        action: PlayerAction,
    ) -> Result<Option<GameOutcome>, SubmitError> {
        self.validate(player, &action)?;

        let checkpoint = self.clone();
        let events = self.expand(player, action);
        if let Err(fault) = self.run_events(events) {
            debug!("structural fault, rolling back: {fault}");
            *self = checkpoint;
            return Err(fault.into());
        }

        Ok(self.outcome)
    }

    fn validate(&self, player: PlayerId, action: &PlayerAction) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::GameFinished);
        }
        if !self.started {
            return Err(ActionError::MulliganPending);
        }
        if player != self.active {
            return Err(ActionError::NotYourTurn(player));
        }

        match action {
            PlayerAction::PlayCard { card, target, .. } => {
                self.validate_play_card(player, *card, *target)
            }
            PlayerAction::UseHeroPower { target } => self.validate_hero_power(player, *target),
            PlayerAction::Attack { attacker, defender } => {
                self.validate_attack(player, *attacker, *defender)
            }
            PlayerAction::EndTurn | PlayerAction::Concede => Ok(()),
        }
    }

    fn validate_play_card(
        &self,
        player: PlayerId,
        card: EntityId,
        target: Option<EntityId>,
    ) -> Result<(), ActionError> {
        let entity = self
            .entity(card)
            .ok_or(ActionError::UnknownEntity(card))?;
        let hand = ZoneRef::new(player, ZoneKind::Hand);
        if entity.zone != hand {
            return Err(ActionError::WrongZone {
                entity: card,
                found: entity.zone,
                expected: ZoneKind::Hand,
            });
        }

        let cost = entity.current.cost;
        let mana = self.players[player].mana;
        if cost > mana {
            return Err(ActionError::InsufficientMana { need: cost, have: mana });
        }

        match entity.kind {
            CardKind::Minion => {
                if self.zones.is_full(ZoneRef::new(player, ZoneKind::Play)) {
                    return Err(ActionError::BoardFull);
                }
            }
            CardKind::Spell => {
                let template = self.content.template(entity.card);
                if template.is_some_and(|t| t.secret) {
                    let secrets = ZoneRef::new(player, ZoneKind::Secret);
                    if self.zones.is_full(secrets) {
                        return Err(ActionError::BoardFull);
                    }
                    let duplicate = self
                        .zones
                        .entities(secrets)
                        .iter()
                        .any(|&s| self.entity(s).is_some_and(|e| e.card == entity.card));
                    if duplicate {
                        return Err(ActionError::DuplicateSecret);
                    }
                }
            }
            _ => {}
        }

        self.validate_target(player, card, target)
    }

    fn validate_hero_power(
        &self,
        player: PlayerId,
        target: Option<EntityId>,
    ) -> Result<(), ActionError> {
        let state = &self.players[player];
        if state.hero_power_used {
            return Err(ActionError::HeroPowerSpent);
        }
        let power = state.hero_power;
        let cost = self
            .entity(power)
            .ok_or(ActionError::UnknownEntity(power))?
            .current
            .cost;
        if cost > state.mana {
            return Err(ActionError::InsufficientMana {
                need: cost,
                have: state.mana,
            });
        }
        self.validate_target(player, power, target)
    }

    /// Target checks shared by cards and hero powers: presence, liveness,
    /// enemy stealth, and the content's own `check_target`.
    fn validate_target(
        &self,
        player: PlayerId,
        source: EntityId,
        target: Option<EntityId>,
    ) -> Result<(), ActionError> {
        let card = self
            .entity(source)
            .ok_or(ActionError::UnknownEntity(source))?
            .card;
        let behavior = self.content.behavior(card);

        let Some(target) = target else {
            if behavior.requires_target() {
                return Err(ActionError::TargetRequired);
            }
            return Ok(());
        };

        if !self.alive(target) {
            return Err(ActionError::InvalidTarget(target));
        }
        let victim = self
            .entity(target)
            .ok_or(ActionError::UnknownEntity(target))?;
        if victim.owner != player && victim.current.stealth {
            return Err(ActionError::InvalidTarget(target));
        }
        if !behavior.check_target(self, source, target) {
            return Err(ActionError::InvalidTarget(target));
        }
        Ok(())
    }

    fn validate_attack(
        &self,
        player: PlayerId,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<(), ActionError> {
        let entity = self
            .entity(attacker)
            .ok_or(ActionError::UnknownEntity(attacker))?;
        if entity.owner != player
            || !matches!(entity.zone.kind, ZoneKind::Play | ZoneKind::Hero)
        {
            return Err(ActionError::CannotAttack(attacker));
        }
        if self.effective_attack(attacker) <= 0 || entity.frozen {
            return Err(ActionError::CannotAttack(attacker));
        }
        if entity.kind == CardKind::Minion && entity.exhausted && !entity.current.charge {
            return Err(ActionError::CannotAttack(attacker));
        }
        if entity.attacks_this_turn >= entity.attacks_allowed() {
            return Err(ActionError::NoAttacksLeft(attacker));
        }

        let victim = self
            .entity(defender)
            .ok_or(ActionError::UnknownEntity(defender))?;
        if victim.owner == player
            || !self.alive(defender)
            || !matches!(victim.zone.kind, ZoneKind::Play | ZoneKind::Hero)
        {
            return Err(ActionError::InvalidTarget(defender));
        }
        if victim.current.stealth {
            return Err(ActionError::InvalidTarget(defender));
        }

        // Taunt minions must be attacked first.
        if !victim.current.taunt {
            let enemy = player.opponent();
            let taunt_up = self
                .board(enemy)
                .iter()
                .any(|&id| self.alive(id) && self.entity(id).is_some_and(|e| e.current.taunt));
            if taunt_up {
                return Err(ActionError::TauntInTheWay);
            }
        }
        Ok(())
    }

    /// Pay costs and expand a validated action into its initial events.
    fn expand(&mut self, player: PlayerId, action: PlayerAction) -> Vec<Event> {
        match action {
            PlayerAction::PlayCard {
                card,
                target,
                position,
            } => {
                let cost = self.entity(card).map_or(0, |e| e.current.cost);
                self.players[player].mana -= cost;
                let position = position.map_or(ZonePosition::Top, ZonePosition::Index);
                vec![Event::new(
                    card,
                    EventPayload::PlayCard {
                        player,
                        entity: card,
                        target,
                        position,
                    },
                )]
            }
            PlayerAction::UseHeroPower { target } => {
                let power = self.players[player].hero_power;
                let cost = self.entity(power).map_or(0, |e| e.current.cost);
                self.players[player].mana -= cost;
                self.players[player].hero_power_used = true;
                vec![Event::new(power, EventPayload::UseHeroPower { player, target })]
            }
            PlayerAction::Attack { attacker, defender } => {
                vec![Event::new(
                    attacker,
                    EventPayload::Attack { attacker, defender },
                )]
            }
            PlayerAction::EndTurn => {
                let hero = self.hero(player);
                vec![Event::new(hero, EventPayload::TurnEnd { player })]
            }
            PlayerAction::Concede => {
                self.outcome = Some(GameOutcome::Winner(player.opponent()));
                Vec::new()
            }
        }
    }

    // === Mulligan ===

    /// The cards a player may exchange before the game starts.
    pub fn begin_mulligan(&self, player: PlayerId) -> Result<Vec<EntityId>, ActionError> {
        if self.started || self.players[player].mulligan_done {
            return Err(ActionError::MulliganClosed);
        }
        Ok(self.zone(player, ZoneKind::Hand).to_vec())
    }

    /// Exchange the chosen cards and draw replacements. The first turn
    /// begins automatically once both players have resolved.
    pub fn resolve_mulligan(
        &mut self,
        player: PlayerId,
        replace: &[EntityId],
    ) -> Result<(), SubmitError> {
        if self.started || self.players[player].mulligan_done {
            return Err(ActionError::MulliganClosed.into());
        }
        let hand = ZoneRef::new(player, ZoneKind::Hand);
        for &card in replace {
            let zone = self.zones.zone_of(card);
            if zone != Some(hand) {
                return Err(ActionError::WrongZone {
                    entity: card,
                    found: zone.unwrap_or(hand),
                    expected: ZoneKind::Hand,
                }
                .into());
            }
        }

        let deck = ZoneRef::new(player, ZoneKind::Deck);
        for &card in replace {
            self.move_entity(card, deck, ZonePosition::Bottom)
                .map_err(SubmitError::Engine)?;
        }
        self.zones.shuffle(deck, &mut self.rng);
        for _ in 0..replace.len() {
            let Some(&card) = self.zones.entities(deck).last() else {
                break;
            };
            self.move_entity(card, hand, ZonePosition::Top)
                .map_err(SubmitError::Engine)?;
        }

        self.players[player].mulligan_done = true;
        debug!("{player} resolved mulligan, exchanged {}", replace.len());

        if self.players.iter().all(|(_, p)| p.mulligan_done) {
            self.start()?;
        }
        Ok(())
    }

    /// Begin the first turn.
    pub(crate) fn start(&mut self) -> Result<(), EngineError> {
        self.started = true;
        let first = self.active;
        let hero = self.hero(first);
        self.run_events(vec![Event::new(
            hero,
            EventPayload::TurnBegin { player: first },
        )])
    }
}
