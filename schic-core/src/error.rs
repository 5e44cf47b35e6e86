//! Structured error types for Hi-C distance computation.

use thiserror::Error;

/// Unified error type for all schic operations.
#[derive(Debug, Error)]
pub enum SchicError {
    /// Invalid input (unknown method, bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Strata or matrices whose shapes do not line up
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// Worker pool construction or task failure
    #[error("worker error: {0}")]
    Worker(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the schic crates.
pub type Result<T> = std::result::Result<T, SchicError>;
