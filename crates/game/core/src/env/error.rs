use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal: the engine cannot proceed without them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("FovOracle not available")]
    FovNotAvailable,

    #[error("PathOracle not available")]
    PathNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            FovNotAvailable => "ORACLE_FOV_NOT_AVAILABLE",
            PathNotAvailable => "ORACLE_PATH_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
