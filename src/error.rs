//! Error types for quboselect.

use thiserror::Error;

/// Error type for QUBO construction and solving.
#[derive(Debug, Error)]
pub enum QuboError {
  /// Input shapes disagree with the declared asset count.
  #[error("dimension mismatch: expected {expected}, got {got}")]
  DimensionMismatch { expected: String, got: String },

  /// A parameter lies outside its valid range.
  #[error("invalid parameter: {0}")]
  InvalidParameter(String),
}

/// Result type for quboselect operations.
pub type Result<T> = std::result::Result<T, QuboError>;
