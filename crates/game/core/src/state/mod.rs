//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, turn
//! bookkeeping, and player knowledge of the map. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActorState, Ai, Blueprint, Consumable, Drain, EntitiesState, Entity, EntityId, EntityKind,
    EquipSlot, Equipment, Equippable, Fighter, InventoryError, InventoryState, ItemState,
    NORMAL_SPEED, Placement, Position, RenderOrder, Rgb, Tick, Ticket, TurnError, TurnQueue,
    TurnState, WorldState,
};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn.nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    /// Turn bookkeeping: the queue, the acting entity and the action nonce.
    pub turn: TurnState,
    /// Every actor and item in the level.
    pub entities: EntitiesState,
    /// Player visibility and explored memory.
    pub world: WorldState,
    /// The entity controlled by external commands.
    pub player: EntityId,
}

impl GameState {
    /// Creates a state around already-spawned entities.
    pub fn new(game_seed: u64, entities: EntitiesState, player: EntityId) -> Self {
        Self {
            game_seed,
            turn: TurnState::new(),
            entities,
            world: WorldState::default(),
            player,
        }
    }

    pub fn clock(&self) -> Tick {
        self.turn.clock()
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.entities.get(self.player)
    }

    pub fn player_actor(&self) -> Option<&ActorState> {
        self.entities.actor(self.player)
    }

    pub fn player_position(&self) -> Option<Position> {
        self.entities.position(self.player)
    }

    pub fn is_player_alive(&self) -> bool {
        self.player_actor().is_some_and(ActorState::is_alive)
    }

    /// SHA-256 over the canonical bincode encoding of the state.
    ///
    /// Two states with equal digests replay identically.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    fn sample() -> GameState {
        let mut entities = EntitiesState::new();
        let player = entities.spawn(
            Blueprint::actor(
                "Player",
                '@',
                Rgb::WHITE,
                ActorState::new(Fighter::new(30, 2, 5), 26, Ai::Player),
            ),
            Position::new(5, 5),
        );
        let mut state = GameState::new(7, entities, player);
        state.turn.queue.schedule(0, player);
        state
    }

    #[test]
    fn digest_is_stable_for_equal_states() {
        let a = sample();
        let b = sample();
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }

    #[test]
    fn digest_tracks_state_changes() {
        let a = sample();
        let mut b = sample();
        b.turn.nonce += 1;
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    }

    #[test]
    fn bincode_round_trip_restores_queue() {
        let mut state = sample();
        let orc = state.entities.spawn(
            Blueprint::actor(
                "Orc",
                'o',
                Rgb(63, 127, 63),
                ActorState::new(Fighter::new(10, 0, 3), 0, Ai::Hostile),
            ),
            Position::new(6, 5),
        );
        state.turn.queue.schedule(100, orc);
        state.turn.queue.next().unwrap();

        let bytes = bincode::serialize(&state).unwrap();
        let restored: GameState = bincode::deserialize(&bytes).unwrap();

        assert_eq!(restored.entities, state.entities);
        assert_eq!(restored.turn.queue.current_time(), state.turn.queue.current_time());
        assert_eq!(restored.turn.queue.next_sequence(), 2);
        assert_eq!(restored.turn.queue.peek().map(|t| t.payload), Some(orc));
    }
}
