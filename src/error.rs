//! Error types for the jump engine

use thiserror::Error;

/// Error raised by a target while attaching, detaching or acting
pub type TargetError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum JumpError {
    /// The engine was invoked without anything to jump to
    #[error("Missing targets to jump")]
    EmptyTargetSet,

    #[error("Invalid hint keys: {0}")]
    InvalidHintKeys(String),

    /// A typed key matched no hint (only with the `report` policy)
    #[error("No target for given key '{pressed}'")]
    UnrecognizedKey { pressed: String },

    #[error("A jump is already in progress")]
    RoundInProgress,

    #[error("Failed to show hint '{hint}': {source}")]
    ShowHint {
        hint: String,
        #[source]
        source: TargetError,
    },

    #[error("Failed to clear hint '{hint}': {source}")]
    ClearHint {
        hint: String,
        #[source]
        source: TargetError,
    },

    #[error("Target action failed: {0}")]
    Action(#[source] TargetError),
}

impl JumpError {
    /// Whether this error is an informational message for the user
    /// rather than a fault.
    pub fn is_notification(&self) -> bool {
        matches!(self, JumpError::UnrecognizedKey { .. })
    }
}
