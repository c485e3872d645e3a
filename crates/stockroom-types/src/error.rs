//! Error types for stockroom

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Server error: {0}")]
    Server(String),

    /// Referenced row does not exist. The payload is the machine-readable
    /// detail code surfaced by the API, e.g. `po_not_found`.
    #[error("{0}")]
    NotFound(&'static str),

    /// Request payload failed a domain check, e.g. `po_line_mismatch`.
    #[error("{0}")]
    Validation(&'static str),

    #[error("insufficient_role")]
    Forbidden,
}

pub type Result<T> = std::result::Result<T, Error>;
