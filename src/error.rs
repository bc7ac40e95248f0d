//! Error handling

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Crate-wide error taxonomy.
///
/// A feedback-digest mismatch is NOT an error: it is the `Anomalous`
/// verdict. Only malformed inputs and shape violations land here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid sample count, unknown parameter, malformed digest field.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Feature/label shape mismatch.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Attempted to fit a classifier on zero rows.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Trust-exchange transition attempted from the wrong state.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Dataset persistence errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset parse errors.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
