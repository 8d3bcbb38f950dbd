//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, SaveGame, StateRepository};

/// Keeps encoded saves in memory.
///
/// Saves are stored encoded rather than cloned so a round trip exercises
/// the same serialization as the file repository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    saves: RwLock<BTreeMap<u64, Vec<u8>>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, nonce: u64, save: &SaveGame) -> Result<()> {
        let bytes = save.encode()?;
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(nonce, bytes);
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveGame>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves
            .get(&nonce)
            .map(|bytes| SaveGame::decode(bytes))
            .transpose()
    }

    fn exists(&self, nonce: u64) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().copied().collect())
    }
}
