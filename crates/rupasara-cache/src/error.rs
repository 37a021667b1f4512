//! Cache error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing file exists but could not be read or parsed.
    #[error("Failed to open store at {path}: {reason}")]
    OpenError { path: PathBuf, reason: String },

    /// Failed to (de)serialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to write the backing file.
    #[error("Store operation failed: {0}")]
    StoreError(#[from] std::io::Error),
}
