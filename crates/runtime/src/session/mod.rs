//! The resolution loop.
//!
//! A [`Session`] owns one level's [`GameState`] together with its oracles and
//! message log. Each [`Command`] is bound to an action for the player under
//! the current [`InteractionMode`], performed through [`GameEngine`], and
//! followed by a drain of the turn queue: every actor whose ticket comes due
//! before the player's next one chooses and performs its own action. The
//! session hands control back once the player's ticket is popped again.
mod command;

pub use command::{Command, InteractionMode, Submission};

use std::sync::Arc;

use game_core::{
    Action, ActionKind, ActionOutcome, ActionResult, EntityId, Entity, ExecuteError, GameConfig,
    GameEngine, GameError, GameState, MapOracle, RejectedMovePolicy, Tick, TurnError, take_turn,
};
use tracing::{debug, error, info, trace};

use crate::error::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::messages::{MessageLevel, MessageLog};
use crate::oracle::{GridMap, OracleManager};
use crate::repository::SaveGame;

const WELCOME: &str = "Hello and welcome, adventurer, to yet another dungeon!";

enum Binding {
    Act(Action),
    Mode(InteractionMode),
    Invalid,
}

pub struct Session {
    state: GameState,
    oracles: OracleManager,
    config: GameConfig,
    messages: MessageLog,
    mode: InteractionMode,
    /// Events raised by the latest submission.
    events: Vec<GameEvent>,
}

impl Session {
    /// Starts a level.
    ///
    /// Every living actor is scheduled at interval zero, the player first and
    /// the rest in id order, then the queue is drained up to the player's
    /// ticket.
    pub fn new(state: GameState, map: GridMap, config: GameConfig) -> Result<Self> {
        if !state.is_player_alive() {
            return Err(RuntimeError::NoPlayer(state.player));
        }
        let messages = MessageLog::new(config.message_capacity);
        let mut session = Self::assemble(state, map, config, messages)?;
        session.messages.push(WELCOME, MessageLevel::Welcome);

        let player = session.state.player;
        let others: Vec<EntityId> = session
            .state
            .entities
            .living_actors()
            .map(|entity| entity.id)
            .filter(|id| *id != player)
            .collect();
        {
            let mut engine = GameEngine::new(&mut session.state, &session.config);
            engine.schedule(player, 0)?;
            for actor in others {
                engine.schedule(actor, 0)?;
            }
        }

        info!(
            target: "runtime::session",
            seed = session.state.game_seed,
            actors = session.state.turn.queue.len(),
            "session started"
        );

        session.refresh_fov();
        session.advance_to_player()?;
        Ok(session)
    }

    /// Resumes a saved game exactly where it stopped.
    pub fn restore(save: SaveGame) -> Result<Self> {
        let SaveGame {
            config,
            state,
            map,
            messages,
        } = save;
        let mut session = Self::assemble(state, map, config, messages)?;
        if session.state.turn.current_actor.is_none() && session.state.is_player_alive() {
            session.advance_to_player()?;
        }
        session.refresh_fov();

        info!(
            target: "runtime::session",
            nonce = session.state.turn.nonce,
            clock = %session.state.clock(),
            "session restored"
        );
        Ok(session)
    }

    fn assemble(
        state: GameState,
        map: GridMap,
        config: GameConfig,
        messages: MessageLog,
    ) -> Result<Self> {
        let position = state
            .player_position()
            .ok_or(RuntimeError::NoPlayer(state.player))?;
        if !map.in_bounds(position) {
            let dimensions = map.dimensions();
            return Err(RuntimeError::PlayerOffMap {
                position,
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        Ok(Self {
            state,
            oracles: OracleManager::new(Arc::new(map)),
            config,
            messages,
            mode: InteractionMode::Normal,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &GridMap {
        self.oracles.map()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn clock(&self) -> Tick {
        self.state.clock()
    }

    pub fn is_game_over(&self) -> bool {
        !self.state.is_player_alive()
    }

    /// Items the player carries, in menu order.
    pub fn inventory(&self) -> Vec<&Entity> {
        self.state
            .player_actor()
            .map(|actor| {
                actor
                    .inventory
                    .items()
                    .iter()
                    .filter_map(|item| self.state.entities.get(*item))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Everything needed to resume this session later.
    pub fn snapshot(&self) -> SaveGame {
        SaveGame {
            config: self.config.clone(),
            state: self.state.clone(),
            map: self.oracles.map().clone(),
            messages: self.messages.clone(),
        }
    }

    /// Interprets one command and runs the world until the player is up again.
    pub fn submit(&mut self, command: Command) -> Result<Submission> {
        self.events.clear();
        if self.is_game_over() {
            return Ok(match command {
                Command::Escape => Submission::Quit,
                _ => Submission::GameOver,
            });
        }

        match self.bind(command) {
            Binding::Act(action) => self.play(action),
            Binding::Mode(mode) => {
                debug!(target: "runtime::session", ?mode, "interaction mode changed");
                self.mode = mode;
                if let InteractionMode::Targeting { item } = mode {
                    self.record(GameEvent::TargetRequested { item });
                }
                Ok(Submission::ModeChanged(mode))
            }
            Binding::Invalid => {
                self.messages.push("Invalid entry.", MessageLevel::Invalid);
                Ok(Submission::Rejected)
            }
        }
    }

    fn bind(&self, command: Command) -> Binding {
        use InteractionMode::{DropMenu, Inventory, Normal, Targeting};

        let player = self.state.player;
        match (self.mode, command) {
            (Normal, Command::Escape) => Binding::Act(Action::Escape { actor: player }),
            (_, Command::Escape) => Binding::Mode(Normal),
            (Normal, Command::Move(direction)) => Binding::Act(Action::bump(player, direction)),
            (Normal, Command::Wait) => Binding::Act(Action::wait(player)),
            (Normal, Command::Pickup) => Binding::Act(Action::pickup(player)),
            (Normal, Command::OpenInventory) => Binding::Mode(Inventory),
            (Normal, Command::OpenDropMenu) => Binding::Mode(DropMenu),
            (Normal | Inventory | DropMenu, Command::DropIndex(index))
            | (DropMenu, Command::SelectIndex(index)) => self
                .carried(index)
                .map_or(Binding::Invalid, |item| {
                    Binding::Act(Action::drop_item(player, item))
                }),
            (Inventory, Command::SelectIndex(index)) => self
                .carried(index)
                .map_or(Binding::Invalid, |item| self.bind_item(item)),
            (Targeting { item }, Command::ConfirmTarget(target)) => {
                Binding::Act(Action::consume(player, item, Some(target)))
            }
            _ => Binding::Invalid,
        }
    }

    /// Gear toggles, targeted consumables ask for a location, anything else
    /// is used outright and the engine judges whether that makes sense.
    fn bind_item(&self, item: EntityId) -> Binding {
        let player = self.state.player;
        match self.state.entities.item(item) {
            Some(state) if state.consumable.is_none() && state.equippable.is_some() => {
                Binding::Act(Action::equip(player, item))
            }
            Some(state) if state.consumable.is_some_and(|c| c.requires_target()) => {
                Binding::Mode(InteractionMode::Targeting { item })
            }
            _ => Binding::Act(Action::consume(player, item, None)),
        }
    }

    fn carried(&self, index: usize) -> Option<EntityId> {
        self.state.player_actor()?.inventory.get(index)
    }

    fn play(&mut self, action: Action) -> Result<Submission> {
        let player = self.state.player;
        match self.perform(&action) {
            Ok(outcome) if outcome.result == ActionResult::Escaped => {
                info!(target: "runtime::session", "player quit");
                Ok(Submission::Quit)
            }
            Ok(outcome) => {
                self.mode = InteractionMode::Normal;
                self.conclude(player, outcome)?;
                self.finish_round()
            }
            Err(error) if error.is_impossible() => {
                debug!(
                    target: "runtime::session",
                    code = error.error_code(),
                    "player action rejected: {error}"
                );
                self.record(GameEvent::ActionRejected {
                    actor: player,
                    reason: error.to_string(),
                });

                let spends = self.config.rejected_move == RejectedMovePolicy::Spend
                    && matches!(action.kind(), ActionKind::Move | ActionKind::Bump);
                if !spends {
                    return Ok(Submission::Rejected);
                }
                let cost = self.full_turn_cost(player);
                self.reschedule(player, cost)?;
                match self.finish_round()? {
                    Submission::GameOver => Ok(Submission::GameOver),
                    _ => Ok(Submission::Rejected),
                }
            }
            Err(error) => {
                error!(
                    target: "runtime::session",
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "player action failed: {error}"
                );
                Err(RuntimeError::Execute(error))
            }
        }
    }

    fn finish_round(&mut self) -> Result<Submission> {
        self.advance_to_player()?;
        self.refresh_fov();
        Ok(if self.is_game_over() {
            Submission::GameOver
        } else {
            Submission::TurnTaken
        })
    }

    /// Pops tickets until the player's comes up, letting every other actor
    /// take its turn on the way. Stops early once the player is dead.
    fn advance_to_player(&mut self) -> Result<()> {
        let player = self.state.player;
        while self.state.is_player_alive() {
            if self.state.turn.current_actor == Some(player) {
                return Ok(());
            }

            let next = GameEngine::new(&mut self.state, &self.config).prepare_next_turn();
            let actor = match next {
                Ok(actor) => actor,
                Err(TurnError::EmptyQueue) => {
                    debug!(target: "runtime::session", "turn queue drained");
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            };

            let clock = self.state.clock();
            trace!(target: "runtime::session", %actor, %clock, "ticket popped");
            self.record(GameEvent::TurnStarted { actor, clock });
            if actor != player {
                self.run_ai_turn(actor)?;
            }
        }
        Ok(())
    }

    /// AI `Impossible` failures are swallowed; the actor simply loses the
    /// turn and pays for it in full.
    fn run_ai_turn(&mut self, actor: EntityId) -> Result<()> {
        let action = {
            let env = self.oracles.as_game_env();
            take_turn(&self.state, &env, actor)
                .map_err(|source| RuntimeError::Ai { actor, source })?
        };
        trace!(target: "runtime::session", %actor, kind = %action.kind(), "ai chose action");

        match self.perform(&action) {
            Ok(outcome) => self.conclude(actor, outcome),
            Err(error) if error.is_impossible() => {
                debug!(
                    target: "runtime::session",
                    %actor,
                    code = error.error_code(),
                    "ai action impossible, turn wasted"
                );
                self.record(GameEvent::ActionRejected {
                    actor,
                    reason: error.to_string(),
                });
                let cost = self.full_turn_cost(actor);
                self.reschedule(actor, cost)
            }
            Err(error) => {
                error!(
                    target: "runtime::session",
                    %actor,
                    code = error.error_code(),
                    "ai action failed: {error}"
                );
                Err(RuntimeError::Execute(error))
            }
        }
    }

    fn perform(&mut self, action: &Action) -> std::result::Result<ActionOutcome, ExecuteError> {
        let env = self.oracles.as_game_env();
        GameEngine::new(&mut self.state, &self.config).execute(env, action)
    }

    fn conclude(&mut self, actor: EntityId, outcome: ActionOutcome) -> Result<()> {
        let ActionOutcome {
            result,
            cost,
            confusion_ended,
        } = outcome;
        self.record(GameEvent::ActionPerformed {
            actor,
            result,
            cost,
        });
        if confusion_ended {
            self.record(GameEvent::ConfusionEnded { actor });
        }
        self.resolve_deaths();
        self.reschedule(actor, cost)
    }

    /// Dead actors are never rescheduled.
    fn reschedule(&mut self, actor: EntityId, interval: u64) -> Result<()> {
        let alive = self
            .state
            .entities
            .actor(actor)
            .is_some_and(|state| state.is_alive());
        if !alive {
            return Ok(());
        }
        GameEngine::new(&mut self.state, &self.config).schedule(actor, interval)?;
        Ok(())
    }

    fn resolve_deaths(&mut self) {
        let deaths = GameEngine::new(&mut self.state, &self.config).resolve_deaths();
        for death in deaths {
            let was_player = death.was_player;
            if was_player {
                info!(target: "runtime::session", clock = %self.state.clock(), "game over");
            } else {
                debug!(target: "runtime::session", entity = %death.entity, name = %death.name, "actor died");
            }
            self.record(GameEvent::Died(death));
            if was_player {
                self.mode = InteractionMode::Normal;
                self.record(GameEvent::GameOver);
            }
        }
    }

    fn full_turn_cost(&self, actor: EntityId) -> u64 {
        self.state
            .entities
            .actor(actor)
            .map_or(self.config.turn_cost, |state| {
                state.scaled_cost(self.config.turn_cost)
            })
    }

    fn refresh_fov(&mut self) {
        if let Some(origin) = self.state.player_position() {
            let visible = self.oracles.visible_from(origin, self.config.fov_radius);
            self.state.world.update_visibility(visible);
        }
    }

    fn record(&mut self, event: GameEvent) {
        event.narrate(&self.state, &mut self.messages);
        self.events.push(event);
    }
}
