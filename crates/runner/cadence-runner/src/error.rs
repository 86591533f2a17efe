//! Errors raised by runners, drivers and runner configuration.

use cadence_core::CommandError;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RunnerError {
    /// A queue or scheduler rejected the tick.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("a global runner is already installed on this thread")]
    AlreadyInstalled,

    #[error("no global runner is installed on this thread")]
    NotInstalled,

    #[error("invalid runner config: {reason}")]
    Config { reason: String },

    #[error("runner config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
