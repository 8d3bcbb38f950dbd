//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `PickupError`) live beside the
//! actions that raise them. They all implement [`GameError`] so the runtime
//! can decide, from the severity alone, whether a failure is an ordinary
//! "you can't do that" or a reason to stop the session.

/// Severity level of an error, used to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Precondition not met. Expected during play.
    ///
    /// The error's `Display` text is shown to the player as-is, and the
    /// world is untouched.
    Impossible,

    /// Unexpected state inconsistency (a bug). The session should stop.
    Internal,

    /// Corrupted or unrestorable state. The session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Impossible => "impossible",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_impossible(&self) -> bool {
        matches!(self, Self::Impossible)
    }

    /// Returns true if the session must abort.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Error type for actions that never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("this error should never be constructed")]
pub enum NeverError {}

impl GameError for NeverError {
    fn severity(&self) -> ErrorSeverity {
        match *self {}
    }

    fn error_code(&self) -> &'static str {
        match *self {}
    }
}
