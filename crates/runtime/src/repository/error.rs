use game_core::{ErrorSeverity, GameError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save store lock was poisoned")]
    LockPoisoned,

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a save written by this version of the game.
    #[error("save encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encoding(_) => ErrorSeverity::Fatal,
            Self::LockPoisoned | Self::Io(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Encoding(_) => "REPOSITORY_CORRUPT_SAVE",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
