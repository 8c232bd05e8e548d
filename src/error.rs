use thiserror::Error;

/// Top-level error type for the transmat library.
#[derive(Debug, Error)]
pub enum TransmatError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("json mirroring failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by transform state management.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("restore called with an empty save stack")]
    StackUnderflow,
}

/// Convenience type alias for results using [`TransmatError`].
pub type Result<T> = std::result::Result<T, TransmatError>;
