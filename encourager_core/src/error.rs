//! Error types for the encourager_core library.

use crate::Language;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for encourager_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A language's verse list has no entries
    #[error("Verse catalog for '{0}' is empty")]
    EmptyCatalog(Language),

    /// The verse lookup could not be reached or answered badly
    #[error("Verse lookup unreachable: {0}")]
    LookupUnreachable(String),

    /// A persisted record could not be parsed
    #[error("Corrupt persisted state: {0}")]
    CorruptPersistedState(String),

    /// Writing persisted state failed
    #[error("Failed to persist state: {0}")]
    PersistWriteFailure(String),

    /// Intent not valid in the current state
    #[error("State error: {0}")]
    State(String),
}
