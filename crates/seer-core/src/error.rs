//! Error types for the oracle engine.
//!
//! Only misuse is an error. Operational outcomes (an inactive or dead
//! oracle, an exhausted countdown, an unavailable parity, a random rejection)
//! are reported as `false` or an empty message.

use thiserror::Error;

/// Result type for oracle operations.
pub type SeerResult<T> = Result<T, SeerError>;

/// Errors that can occur when constructing or driving an oracle.
#[derive(Debug, Error)]
pub enum SeerError {
    /// A constructor argument is out of range (e.g. a zero flip threshold).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller broke an operation's precondition (e.g. an empty buffer).
    #[error("precondition violated: {0}")]
    PreconditionViolated(String),

    /// An oracle variant name could not be recognized.
    #[error("unknown oracle variant: {0}")]
    UnknownVariant(String),

    /// Journal serialization failed.
    #[error("journal export failed: {0}")]
    Json(#[from] serde_json::Error),
}
