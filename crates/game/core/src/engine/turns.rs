use crate::combat::{self, Death};
use crate::state::{EntityId, Tick, Ticket, TurnError};

use super::GameEngine;

/// Turn scheduling methods for GameEngine.
impl GameEngine<'_> {
    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.state.turn.clock()
    }

    /// Returns the entity currently taking its turn.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.state.turn.current_actor
    }

    pub fn is_scheduled(&self, actor: EntityId) -> bool {
        self.state
            .turn
            .queue
            .tickets()
            .iter()
            .any(|ticket| ticket.payload == actor)
    }

    /// Gives `actor` its next wake-up `interval` ticks from now.
    ///
    /// Ends the actor's current turn if it had one. Dead actors and actors
    /// that already hold a ticket are refused, so no actor is ever queued
    /// twice or after death.
    pub fn schedule(&mut self, actor: EntityId, interval: u64) -> Result<Ticket<EntityId>, TurnError> {
        let state = self
            .state
            .entities
            .actor(actor)
            .ok_or(TurnError::UnknownActor(actor))?;
        if !state.is_alive() {
            return Err(TurnError::ActorNotAlive(actor));
        }
        if self.is_scheduled(actor) {
            return Err(TurnError::AlreadyScheduled(actor));
        }

        if self.state.turn.current_actor == Some(actor) {
            self.state.turn.current_actor = None;
        }
        Ok(self.state.turn.queue.schedule(interval, actor))
    }

    /// Pops tickets until one belongs to a living actor and makes it current.
    ///
    /// Tickets of actors that died after being queued are discarded. Fails
    /// with [`TurnError::EmptyQueue`] when nothing is left, and with
    /// [`TurnError::UnknownActor`] if a ticket names an entity that no longer
    /// exists.
    pub fn prepare_next_turn(&mut self) -> Result<EntityId, TurnError> {
        if let Some(actor) = self.state.turn.current_actor {
            return Err(TurnError::TurnInProgress(actor));
        }

        loop {
            let ticket = self.state.turn.queue.next()?;
            let actor = self
                .state
                .entities
                .actor(ticket.payload)
                .ok_or(TurnError::UnknownActor(ticket.payload))?;
            if !actor.is_alive() {
                continue;
            }
            self.state.turn.current_actor = Some(ticket.payload);
            return Ok(ticket.payload);
        }
    }

    /// Runs the death pass. A current actor that died loses its turn.
    pub fn resolve_deaths(&mut self) -> Vec<Death> {
        let deaths = combat::resolve_deaths(self.state);
        let current = self.state.turn.current_actor;
        if deaths.iter().any(|death| Some(death.entity) == current) {
            self.state.turn.current_actor = None;
        }
        deaths
    }
}
