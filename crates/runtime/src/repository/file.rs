//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::GameError;

use super::{Result, SaveGame, StateRepository};

/// Stores each save as `save_{nonce}.bin` in bincode format.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save never leaves a truncated save behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn save_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("save_{}.bin", nonce))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, nonce: u64, save: &SaveGame) -> Result<()> {
        let path = self.save_path(nonce);
        let temp_path = path.with_extension("bin.tmp");

        fs::write(&temp_path, save.encode()?)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::repository", "Saved game[{}] to {}", nonce, path.display());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<SaveGame>> {
        let path = self.save_path(nonce);
        if !path.exists() {
            return Ok(None);
        }

        let save = SaveGame::decode(&fs::read(&path)?).inspect_err(|error| {
            tracing::error!(
                target: "runtime::repository",
                severity = error.severity().as_str(),
                code = error.error_code(),
                "Save game[{}] at {} is unreadable: {}",
                nonce,
                path.display(),
                error
            );
        })?;
        tracing::debug!(target: "runtime::repository", "Loaded game[{}] from {}", nonce, path.display());
        Ok(Some(save))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.save_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.save_path(nonce);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", "Deleted game[{}]", nonce);
        }
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(nonce_str) = filename
                    .strip_prefix("save_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(nonce) = nonce_str.parse::<u64>()
            {
                nonces.push(nonce);
            }
        }

        nonces.sort_unstable();
        Ok(nonces)
    }
}
