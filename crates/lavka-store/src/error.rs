//! # Store Error Types
//!
//! Error types for snapshot persistence.
//!
//! Note that callers rarely see these: the cart store swallows save
//! failures (logging them) and the snapshot loader turns read failures
//! into an empty cart. The typed errors exist for the adapter boundary
//! and for tests.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read/write failure (quota, permissions, missing dir).
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized to JSON.
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
