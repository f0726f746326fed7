//! Cloud error types
//!
//! Benign-vs-fatal classification happens on these variants, never on
//! message substrings. Transport implementations are responsible for
//! mapping their SDK's error surface onto them.

use thiserror::Error;

/// Errors from remote collaborator operations
#[derive(Debug, Error)]
pub enum CloudError {
    /// The stack does not exist (a benign skip for batch processing)
    #[error("stack not found: {0}")]
    StackNotFound(String),

    /// The remote system rejected an update because it computes no actual
    /// resource change (two runtime identifiers it treats as equivalent can
    /// differ at the template layer). Benign.
    #[error("no updates to perform on stack {0}")]
    NoUpdates(String),

    /// The deployed function does not exist
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// Anything else the remote side reports
    #[error("cloud api error: {0}")]
    Api(String),
}

/// Result type for cloud operations
pub type Result<T> = std::result::Result<T, CloudError>;
