//! Error types for keepsake.

use thiserror::Error;

/// Errors produced by storage backends and configuration loading.
///
/// [`SessionStore`](crate::SessionStore) itself never returns these: it
/// recovers or logs them.
#[derive(Error, Debug)]
pub enum Error {
    /// Persisted text could not be decoded as a session state.
    #[error("malformed persisted state: {0}")]
    MalformedState(#[from] serde_json::Error),

    /// I/O error from a file-backed store or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// The backend refused or failed an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for keepsake operations.
pub type Result<T> = std::result::Result<T, Error>;
