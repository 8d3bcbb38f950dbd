//! Repository contract for saving and loading sessions.

use super::{Result, SaveGame};

/// Persists [`SaveGame`]s indexed by action nonce.
pub trait StateRepository: Send + Sync {
    fn save(&self, nonce: u64, save: &SaveGame) -> Result<()>;

    fn load(&self, nonce: u64) -> Result<Option<SaveGame>>;

    fn exists(&self, nonce: u64) -> bool;

    fn delete(&self, nonce: u64) -> Result<()>;

    /// All stored nonces, ascending.
    fn list_nonces(&self) -> Result<Vec<u64>>;

    /// The save with the highest nonce, if any.
    fn latest(&self) -> Result<Option<SaveGame>> {
        match self.list_nonces()?.last() {
            Some(nonce) => self.load(*nonce),
            None => Ok(None),
        }
    }
}
