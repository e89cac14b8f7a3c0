//! Event effects: what each event does when it resolves.
//!
//! An event's effect runs between its before- and after-trigger passes,
//! only if the event is still enabled. Effects either mutate the game and
//! return follow-up events, or detect a stale precondition and fizzle —
//! never both, and never an error for anything a legal game can reach.
//! Errors here are reserved for structural corruption.

use log::debug;

use crate::cards::CardKind;
use crate::core::{EntityId, PlayerId};
use crate::enchant::{EnchantEffect, EnchantId, Enchantment};
use crate::error::EngineError;
use crate::game::Game;
use crate::zones::{ZoneKind, ZonePosition, ZoneRef};

use super::{Event, EventPayload};

/// Outcome of running an event's effect.
enum Applied {
    /// Effect happened; resolve these follow-ups next.
    Done(Vec<Event>),
    /// Precondition went stale; the event disables itself.
    Fizzle,
}

impl Event {
    /// Run this event's own effect.
    pub(crate) fn apply(&mut self, game: &mut Game) -> Result<Vec<Event>, EngineError> {
        let source = self.source;
        let applied = match self.payload.clone() {
            EventPayload::TurnBegin { player } => turn_begin(game, player),
            EventPayload::TurnEnd { player } => turn_end(game, player),
            EventPayload::DrawCard { player } => draw_card(game, player),
            EventPayload::Discard { entity } => discard(game, entity),
            EventPayload::Damage { target, amount } => damage(game, target, amount),
            EventPayload::AreaDamage { targets, amount } => {
                area_damage(game, source, targets, amount)
            }
            EventPayload::Heal { target, amount } => heal(game, target, amount),
            EventPayload::Freeze { target } => freeze(game, target),
            EventPayload::Enchant { target, effect } => enchant(game, source, target, effect),
            EventPayload::Summon {
                player,
                card,
                entity,
                position,
            } => summon(game, player, card, entity, position),
            EventPayload::PlayCard {
                player,
                entity,
                target,
                position,
            } => play_card(game, player, entity, target, position),
            EventPayload::Attack { attacker, defender } => attack(game, attacker, defender),
            EventPayload::UseHeroPower { player, target } => use_hero_power(game, player, target),
            EventPayload::EquipWeapon {
                player,
                card,
                entity,
            } => equip_weapon(game, player, card, entity),
            EventPayload::SecretReveal { secret } => secret_reveal(game, secret),
            EventPayload::MinionDeath { entity, .. } => entity_death(game, entity),
            EventPayload::HeroDeath { player } => hero_death(game, player),
            EventPayload::WeaponDeath { entity } => entity_death(game, entity),
            EventPayload::DeathPhase { deaths } => Ok(Applied::Done(deaths)),
        }?;

        match applied {
            Applied::Done(follow_ups) => Ok(follow_ups),
            Applied::Fizzle => {
                self.fizzle();
                Ok(Vec::new())
            }
        }
    }
}

fn turn_begin(game: &mut Game, player: PlayerId) -> Result<Applied, EngineError> {
    {
        let state = &mut game.players[player];
        state.max_mana = (state.max_mana + 1).min(10);
        state.mana = state.max_mana;
        state.hero_power_used = false;
    }

    for id in game.characters(player) {
        game.entity_mut(id)?.ready();
    }

    let hero = game.hero(player);
    Ok(Applied::Done(vec![Event::new(
        hero,
        EventPayload::DrawCard { player },
    )]))
}

fn turn_end(game: &mut Game, player: PlayerId) -> Result<Applied, EngineError> {
    for id in game.characters(player) {
        game.entity_mut(id)?.frozen = false;
    }

    let next = player.opponent();
    game.active = next;
    game.turn += 1;

    let hero = game.hero(next);
    Ok(Applied::Done(vec![Event::new(
        hero,
        EventPayload::TurnBegin { player: next },
    )]))
}

fn draw_card(game: &mut Game, player: PlayerId) -> Result<Applied, EngineError> {
    let deck = ZoneRef::new(player, ZoneKind::Deck);
    let hand = ZoneRef::new(player, ZoneKind::Hand);

    let Some(&card) = game.zones.entities(deck).last() else {
        // Empty deck: fatigue ramps by one and burns the hero.
        game.players[player].fatigue += 1;
        let amount = game.players[player].fatigue;
        let hero = game.hero(player);
        debug!("{player} fatigues for {amount}");
        return Ok(Applied::Done(vec![Event::damage(hero, hero, amount)]));
    };

    let outcome = game.move_entity(card, hand, ZonePosition::Top)?;
    if !outcome.success {
        debug!("{player} overdraws; {card} burns");
    }
    Ok(Applied::Done(Vec::new()))
}

fn discard(game: &mut Game, entity: EntityId) -> Result<Applied, EngineError> {
    let Some(found) = game.entity(entity) else {
        return Ok(Applied::Fizzle);
    };
    if found.zone.kind != ZoneKind::Hand {
        return Ok(Applied::Fizzle);
    }
    let owner = found.owner;
    game.move_entity(
        entity,
        ZoneRef::new(owner, ZoneKind::Graveyard),
        ZonePosition::Top,
    )?;
    Ok(Applied::Done(Vec::new()))
}

fn damage(game: &mut Game, target: EntityId, amount: i64) -> Result<Applied, EngineError> {
    if amount <= 0 || !game.alive(target) {
        return Ok(Applied::Fizzle);
    }

    let entity = game.entity_mut(target)?;
    if entity.divine_shield {
        entity.divine_shield = false;
        return Ok(Applied::Done(Vec::new()));
    }
    entity.damage += amount;
    Ok(Applied::Done(Vec::new()))
}

fn area_damage(
    game: &mut Game,
    source: EntityId,
    targets: Vec<EntityId>,
    amount: i64,
) -> Result<Applied, EngineError> {
    let mut targets: Vec<EntityId> = targets
        .into_iter()
        .filter(|&t| game.alive(t))
        .collect();
    targets.sort_by_key(|&t| game.play_order_key(t));

    Ok(Applied::Done(
        targets
            .into_iter()
            .map(|t| Event::damage(source, t, amount))
            .collect(),
    ))
}

fn heal(game: &mut Game, target: EntityId, amount: i64) -> Result<Applied, EngineError> {
    if amount <= 0 || !game.alive(target) {
        return Ok(Applied::Fizzle);
    }
    let entity = game.entity_mut(target)?;
    entity.damage = (entity.damage - amount).max(0);
    Ok(Applied::Done(Vec::new()))
}

fn freeze(game: &mut Game, target: EntityId) -> Result<Applied, EngineError> {
    if !game.alive(target) {
        return Ok(Applied::Fizzle);
    }
    game.entity_mut(target)?.frozen = true;
    Ok(Applied::Done(Vec::new()))
}

fn enchant(
    game: &mut Game,
    source: EntityId,
    target: EntityId,
    effect: EnchantEffect,
) -> Result<Applied, EngineError> {
    if !game.alive(target) {
        return Ok(Applied::Fizzle);
    }
    let id = EnchantId(game.next_enchant);
    game.next_enchant += 1;
    let order = game.seq.assign_next();
    game.enchantments.push(Enchantment {
        id,
        target,
        source,
        order,
        from_aura: false,
        effect,
    });
    Ok(Applied::Done(Vec::new()))
}

fn summon(
    game: &mut Game,
    player: PlayerId,
    card: crate::cards::CardId,
    entity: Option<EntityId>,
    position: ZonePosition,
) -> Result<Applied, EngineError> {
    let play = ZoneRef::new(player, ZoneKind::Play);

    // Tokens are created off-board first so a full board sends them to
    // the graveyard through the same redirect as everything else.
    let id = match entity {
        Some(id) => id,
        None => game.create_entity(
            card,
            player,
            ZoneRef::new(player, ZoneKind::Graveyard),
            ZonePosition::Top,
        )?,
    };

    let outcome = game.move_entity(id, play, position)?;
    if !outcome.success {
        debug!("board full; {id} never enters play");
        return Ok(Applied::Fizzle);
    }

    let entity = game.entity_mut(id)?;
    entity.exhausted = !entity.current.charge;
    entity.attacks_this_turn = 0;
    Ok(Applied::Done(Vec::new()))
}

fn play_card(
    game: &mut Game,
    player: PlayerId,
    entity: EntityId,
    target: Option<EntityId>,
    position: ZonePosition,
) -> Result<Applied, EngineError> {
    let card = game.entity_checked(entity)?.card;
    let kind = game.entity_checked(entity)?.kind;

    // The chosen target may have been removed by a before-trigger.
    if let Some(t) = target {
        if !game.alive(t) {
            return Ok(Applied::Fizzle);
        }
    }

    let behavior = game.content.behavior(card);
    match kind {
        CardKind::Minion => {
            let mut follow_ups = vec![Event::new(
                entity,
                EventPayload::Summon {
                    player,
                    card,
                    entity: Some(entity),
                    position,
                },
            )];
            follow_ups.extend(behavior.battlecry(game, entity, target));
            Ok(Applied::Done(follow_ups))
        }
        CardKind::Spell => {
            let secret = game
                .content
                .template(card)
                .ok_or(EngineError::UnknownCard(card))?
                .secret;
            if secret {
                let outcome = game.move_entity(
                    entity,
                    ZoneRef::new(player, ZoneKind::Secret),
                    ZonePosition::Top,
                )?;
                if !outcome.success {
                    return Ok(Applied::Fizzle);
                }
                return Ok(Applied::Done(Vec::new()));
            }
            let follow_ups = behavior.cast(game, entity, target);
            game.move_entity(
                entity,
                ZoneRef::new(player, ZoneKind::Graveyard),
                ZonePosition::Top,
            )?;
            Ok(Applied::Done(follow_ups))
        }
        CardKind::Weapon => Ok(Applied::Done(vec![Event::new(
            entity,
            EventPayload::EquipWeapon {
                player,
                card,
                entity: Some(entity),
            },
        )])),
        CardKind::Hero | CardKind::HeroPower => Ok(Applied::Fizzle),
    }
}

fn attack(game: &mut Game, attacker: EntityId, defender: EntityId) -> Result<Applied, EngineError> {
    if !game.alive(attacker) || !game.alive(defender) {
        return Ok(Applied::Fizzle);
    }

    let attacker_kind = game.entity_checked(attacker)?.kind;
    {
        let entity = game.entity_mut(attacker)?;
        entity.attacks_this_turn += 1;
        // Attacking permanently breaks stealth.
        entity.base.stealth = false;
        entity.current.stealth = false;
    }

    // A hero swinging a weapon spends one durability.
    if attacker_kind == CardKind::Hero {
        let owner = game.entity_checked(attacker)?.owner;
        if let Some(weapon) = game.weapon(owner) {
            game.entity_mut(weapon)?.damage += 1;
        }
    }

    let attack_value = game.effective_attack(attacker);
    // Only minions strike back; a defending hero does not.
    let counter_value = match game.entity_checked(defender)?.kind {
        CardKind::Minion => game.effective_attack(defender),
        _ => 0,
    };

    let mut follow_ups = vec![Event::damage(attacker, defender, attack_value)];
    if counter_value > 0 {
        follow_ups.push(Event::damage(defender, attacker, counter_value));
    }
    Ok(Applied::Done(follow_ups))
}

fn use_hero_power(
    game: &mut Game,
    player: PlayerId,
    target: Option<EntityId>,
) -> Result<Applied, EngineError> {
    if let Some(t) = target {
        if !game.alive(t) {
            return Ok(Applied::Fizzle);
        }
    }
    let power = game.hero_power(player);
    let card = game.entity_checked(power)?.card;
    let follow_ups = game.content.behavior(card).cast(game, power, target);
    Ok(Applied::Done(follow_ups))
}

fn equip_weapon(
    game: &mut Game,
    player: PlayerId,
    card: crate::cards::CardId,
    entity: Option<EntityId>,
) -> Result<Applied, EngineError> {
    let slot = ZoneRef::new(player, ZoneKind::Weapon);

    // A replaced weapon is destroyed on the spot: its deathrattle runs as
    // follow-ups of the equip, and the singleton slot frees up before the
    // new weapon lands.
    let mut follow_ups = Vec::new();
    if let Some(old) = game.weapon(player) {
        let old_card = game.entity_checked(old)?.card;
        follow_ups.extend(game.content.behavior(old_card).deathrattle(game, old));
        game.move_entity(old, ZoneRef::new(player, ZoneKind::Graveyard), ZonePosition::Top)?;
    }

    let id = match entity {
        Some(id) => id,
        None => game.create_entity(
            card,
            player,
            ZoneRef::new(player, ZoneKind::Graveyard),
            ZonePosition::Top,
        )?,
    };
    game.move_entity(id, slot, ZonePosition::Top)?;

    Ok(Applied::Done(follow_ups))
}

fn secret_reveal(game: &mut Game, secret: EntityId) -> Result<Applied, EngineError> {
    let Some(entity) = game.entity(secret) else {
        return Ok(Applied::Fizzle);
    };
    if entity.zone.kind != ZoneKind::Secret {
        return Ok(Applied::Fizzle);
    }
    let owner = entity.owner;
    game.move_entity(
        secret,
        ZoneRef::new(owner, ZoneKind::Graveyard),
        ZonePosition::Top,
    )?;
    Ok(Applied::Done(Vec::new()))
}

/// Shared by minion and weapon deaths: deathrattle while the entity can
/// still see its simultaneous casualties, then the move to the graveyard.
fn entity_death(game: &mut Game, entity: EntityId) -> Result<Applied, EngineError> {
    let Some(found) = game.entity(entity) else {
        return Ok(Applied::Fizzle);
    };
    if found.zone.kind == ZoneKind::Graveyard {
        // Already resolved by an earlier death this phase.
        return Ok(Applied::Fizzle);
    }
    let owner = found.owner;
    let card = found.card;

    let rattle = game.content.behavior(card).deathrattle(game, entity);
    game.move_entity(
        entity,
        ZoneRef::new(owner, ZoneKind::Graveyard),
        ZonePosition::Top,
    )?;
    Ok(Applied::Done(rattle))
}

fn hero_death(game: &mut Game, player: PlayerId) -> Result<Applied, EngineError> {
    let hero = game.hero(player);
    if game.entity_checked(hero)?.zone.kind == ZoneKind::Graveyard {
        return Ok(Applied::Fizzle);
    }
    game.move_entity(
        hero,
        ZoneRef::new(player, ZoneKind::Graveyard),
        ZonePosition::Top,
    )?;
    Ok(Applied::Done(Vec::new()))
}
