//! Save and restore of complete sessions.
//!
//! A [`SaveGame`] holds everything a session needs to resume bit-for-bit:
//! the game state (entities, turn queue, seed and action nonce), the static
//! map, the rules configuration and the message log. Repositories index
//! saves by the action nonce they were taken at.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;

use game_core::{GameConfig, GameState};

use crate::messages::MessageLog;
use crate::oracle::GridMap;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveGame {
    pub config: GameConfig,
    pub state: GameState,
    pub map: GridMap,
    pub messages: MessageLog,
}

impl SaveGame {
    pub fn nonce(&self) -> u64 {
        self.state.turn.nonce
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
