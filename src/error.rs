//! Error types for grid encoding and query construction.

use crate::types::SpatialOperation;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridQueryError>;

/// Errors produced while encoding shapes or building queries.
#[derive(Debug, Error)]
pub enum GridQueryError {
    /// The requested spatial relationship has no prefix-grid translation.
    #[error("unsupported spatial operation: {0}")]
    UnsupportedOperation(SpatialOperation),

    /// Failure inside the geohash grid, surfaced unchanged.
    #[error("geohash error: {0}")]
    Geohash(#[from] geohash::GeohashError),

    /// Invalid configuration or input value.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
