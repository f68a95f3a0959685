//! Error types for the sign gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the sign gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Sign dictionary could not be built (duplicate or malformed seed data)
    #[error("dictionary error: {0}")]
    Dictionary(String),

    /// Uploaded audio does not satisfy the PCM constraint
    #[error("{0}")]
    InvalidAudio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Grammar normalization error
    #[error("grammar error: {0}")]
    Grammar(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
