//! The `Game` aggregate: the single root that owns all simulated state.
//!
//! Everything mutable lives here — the entity arena, zone manager, trigger
//! registry, enchantment list, per-player state, order-of-play sequencer,
//! RNG, event queue, and the append-only history. The aggregate is `Clone`
//! so `submit` can snapshot it before mutating and roll back on a
//! structural fault, leaving the last committed state intact.
//!
//! ## Submodules
//!
//! - `resolver`: the event cascade loop and boundary maintenance
//! - `deaths`: the death creation step
//! - `actions`: the player-action facade (`submit`, mulligan)
//! - `builder`: game setup

pub mod actions;
pub mod builder;
pub mod deaths;
pub mod resolver;

pub use actions::PlayerAction;
pub use builder::GameBuilder;

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, ContentRegistry, Entity, PlayReadiness};
use crate::core::{EntityId, GameRng, PlaySequencer, PlayerId, PlayerMap};
use crate::enchant::Enchantment;
use crate::error::EngineError;
use crate::events::{Event, EventRecord};
use crate::triggers::TriggerRegistry;
use crate::zones::{MoveOutcome, ZoneKind, ZoneManager, ZonePosition, ZoneRef};

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(PlayerId),
    Draw,
}

impl GameOutcome {
    /// Did this player win?
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameOutcome::Winner(p) if *p == player)
    }
}

/// Per-player engine state outside the zone containers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hero: EntityId,
    pub hero_power: EntityId,
    pub mana: i64,
    pub max_mana: i64,
    /// Damage dealt by the next draw from an empty deck.
    pub fatigue: i64,
    pub hero_power_used: bool,
    pub mulligan_done: bool,
}

/// Observer callback invoked once per resolved event.
pub type Observer = Rc<dyn Fn(&EventRecord)>;

/// One running game.
pub struct Game {
    pub(crate) content: Arc<ContentRegistry>,
    pub(crate) entities: FxHashMap<EntityId, Entity>,
    pub(crate) zones: ZoneManager,
    pub(crate) triggers: TriggerRegistry,
    pub(crate) enchantments: Vec<Enchantment>,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) seq: PlaySequencer,
    pub(crate) rng: GameRng,
    pub(crate) next_entity: u32,
    pub(crate) next_enchant: u32,
    pub(crate) active: PlayerId,
    pub(crate) turn: u32,
    pub(crate) queue: VecDeque<Event>,
    pub(crate) history: Vector<EventRecord>,
    pub(crate) observers: Vec<Observer>,
    pub(crate) outcome: Option<GameOutcome>,
    pub(crate) started: bool,
}

impl Clone for Game {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            entities: self.entities.clone(),
            zones: self.zones.clone(),
            triggers: self.triggers.clone(),
            enchantments: self.enchantments.clone(),
            players: self.players.clone(),
            seq: self.seq.clone(),
            rng: self.rng.clone(),
            next_entity: self.next_entity,
            next_enchant: self.next_enchant,
            active: self.active,
            turn: self.turn,
            queue: self.queue.clone(),
            history: self.history.clone(),
            observers: self.observers.clone(),
            outcome: self.outcome,
            started: self.started,
        }
    }
}

impl Game {
    // === Entity arena ===

    /// Get an entity by ID.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get an entity, treating absence as a structural fault.
    pub(crate) fn entity_checked(&self, id: EntityId) -> Result<&Entity, EngineError> {
        self.entities.get(&id).ok_or(EngineError::EntityMissing(id))
    }

    /// Get a mutable entity, treating absence as a structural fault.
    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EngineError> {
        self.entities
            .get_mut(&id)
            .ok_or(EngineError::EntityMissing(id))
    }

    /// Create an entity from a card template and place it in a zone.
    ///
    /// Registers the card's authored triggers; they start active only if
    /// the starting zone is one of their declared active zones.
    pub(crate) fn create_entity(
        &mut self,
        card: CardId,
        owner: PlayerId,
        zone: ZoneRef,
        position: ZonePosition,
    ) -> Result<EntityId, EngineError> {
        let template = self
            .content
            .template(card)
            .ok_or(EngineError::UnknownCard(card))?
            .clone();

        let id = EntityId(self.next_entity);
        self.next_entity += 1;

        let mut entity = Entity::from_template(id, &template, owner, zone);
        if zone.kind.assigns_order_of_play() {
            entity.order_of_play = Some(self.seq.assign_next());
        }
        self.zones.place(id, zone, position)?;
        self.entities.insert(id, entity);

        let behavior = self.content.behavior(card);
        for spec in behavior.triggers() {
            self.triggers.register(id, spec, zone.kind);
        }

        Ok(id)
    }

    /// Move an entity between zones, with every consequence the rules
    /// attach to a move: capacity redirect, ownership reassignment,
    /// order-of-play assignment on first entry to an ordered-play zone,
    /// and synchronous (de)activation of the entity's authored triggers.
    pub(crate) fn move_entity(
        &mut self,
        id: EntityId,
        to: ZoneRef,
        position: ZonePosition,
    ) -> Result<MoveOutcome, EngineError> {
        self.entity_checked(id)?;
        let outcome = self.zones.move_entity(id, to, position)?;

        let needs_order = outcome.to.kind.assigns_order_of_play()
            && self.entity_checked(id)?.order_of_play.is_none();
        let order = if needs_order {
            Some(self.seq.assign_next())
        } else {
            None
        };

        {
            let entity = self.entity_mut(id)?;
            entity.zone = outcome.to;
            entity.owner = outcome.to.player;
            if let Some(order) = order {
                entity.order_of_play = Some(order);
            }
            if outcome.to.kind == ZoneKind::Play && entity.order_of_play.is_none() {
                return Err(EngineError::MissingOrderOfPlay(id));
            }
        }

        // Observers checking trigger liveness right after a move must see
        // the post-move truth, so this happens before the move returns.
        self.triggers.sync_zone(id, outcome.to.kind);

        if matches!(outcome.to.kind, ZoneKind::Graveyard | ZoneKind::RemovedFromGame) {
            self.prune_enchantments_on(id);
        }
        if outcome.to.kind == ZoneKind::RemovedFromGame {
            self.triggers.remove_for_owner(id);
        }

        Ok(outcome)
    }

    /// Sort key linearizing entities by order-of-play, falling back to
    /// creation order for entities never assigned one.
    #[must_use]
    pub fn play_order_key(&self, id: EntityId) -> (u64, u32) {
        let order = self
            .entities
            .get(&id)
            .and_then(|e| e.order_of_play)
            .map_or(u64::MAX, |o| o.raw());
        (order, id.raw())
    }

    /// All entities in battle zones (board, heroes, weapons, hero powers),
    /// in a fixed deterministic order.
    #[must_use]
    pub(crate) fn battle_entities(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        for player in PlayerId::both() {
            for kind in [
                ZoneKind::Play,
                ZoneKind::Hero,
                ZoneKind::Weapon,
                ZoneKind::HeroPower,
            ] {
                out.extend_from_slice(self.zones.entities(ZoneRef::new(player, kind)));
            }
        }
        out
    }

    /// Characters (hero plus board minions) a damage spell could hit.
    #[must_use]
    pub(crate) fn characters(&self, player: PlayerId) -> Vec<EntityId> {
        let mut out = Vec::new();
        out.extend_from_slice(self.zones.entities(ZoneRef::new(player, ZoneKind::Hero)));
        out.extend_from_slice(self.zones.entities(ZoneRef::new(player, ZoneKind::Play)));
        out
    }

    /// Attack value a character swings with: its own attack, plus the
    /// equipped weapon's for heroes.
    #[must_use]
    pub fn effective_attack(&self, id: EntityId) -> i64 {
        let Some(entity) = self.entity(id) else {
            return 0;
        };
        let mut value = entity.attack();
        if entity.kind == crate::cards::CardKind::Hero {
            if let Some(weapon) = self.weapon(entity.owner) {
                value += self.entity(weapon).map_or(0, |w| w.attack());
            }
        }
        value
    }

    /// Is this entity in a battle zone and not mortally wounded?
    #[must_use]
    pub fn alive(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(|e| {
            matches!(
                e.zone.kind,
                ZoneKind::Play | ZoneKind::Hero | ZoneKind::Weapon | ZoneKind::HeroPower
            ) && !e.is_mortally_wounded()
        })
    }

    // === Observation API ===

    /// The ordered contents of one zone.
    #[must_use]
    pub fn zone(&self, player: PlayerId, kind: ZoneKind) -> &[EntityId] {
        self.zones.entities(ZoneRef::new(player, kind))
    }

    /// A player's board, in board order.
    #[must_use]
    pub fn board(&self, player: PlayerId) -> &[EntityId] {
        self.zone(player, ZoneKind::Play)
    }

    /// A player's hero entity.
    #[must_use]
    pub fn hero(&self, player: PlayerId) -> EntityId {
        self.players[player].hero
    }

    /// A player's hero power entity.
    #[must_use]
    pub fn hero_power(&self, player: PlayerId) -> EntityId {
        self.players[player].hero_power
    }

    /// A player's equipped weapon, if any.
    #[must_use]
    pub fn weapon(&self, player: PlayerId) -> Option<EntityId> {
        self.zone(player, ZoneKind::Weapon).first().copied()
    }

    /// Per-player state (mana, fatigue, flags).
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The append-only log of every resolved event.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Register a read-only callback invoked once per resolved event.
    pub fn add_observer(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// How a card in hand would present itself to its owner right now.
    #[must_use]
    pub fn card_readiness(&self, id: EntityId) -> PlayReadiness {
        let Some(entity) = self.entity(id) else {
            return PlayReadiness::Inactive;
        };
        if self.outcome.is_some()
            || entity.owner != self.active
            || entity.current.cost > self.players[entity.owner].mana
        {
            return PlayReadiness::Inactive;
        }
        self.content.behavior(entity.card).readiness(self, id)
    }

    // === Test support ===

    /// Sum of entities across all zones; the arena and the zone manager
    /// must always agree.
    #[must_use]
    pub fn total_zoned_entities(&self) -> usize {
        self.zones.total_entities()
    }

    /// Number of entities in the arena.
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.entities.len()
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.turn)
            .field("active", &self.active)
            .field("entities", &self.entities.len())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
