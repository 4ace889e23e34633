//! Error types
//!
//! Window operations never fail; only registration and decoding do.

use thiserror::Error;

/// Errors raised while registering applications
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The descriptor has an empty identifier
    #[error("application must include an id")]
    MissingId,

    /// An application with this identifier is already registered
    #[error("application already registered: {0}")]
    DuplicateApp(String),
}

/// Errors raised while decoding persisted state or configuration
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The input is not valid JSON for the expected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
