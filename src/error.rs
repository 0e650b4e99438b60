//! Unified error types for the prep-tui application.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Gen(#[from] GenError),

    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Generation collaborator errors
#[derive(Debug, Error)]
pub enum GenError {
    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no candidates")]
    EmptyResponse,

    #[error("Structured response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Structured response does not match the requested shape: {0}")]
    InvalidShape(String),
}

/// State store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to encode slot {slot}: {source}")]
    Encode {
        slot: String,
        source: serde_json::Error,
    },

    #[error("Failed to decode slot {slot}: {source}")]
    Decode {
        slot: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for generation calls
pub type GenResult<T> = std::result::Result<T, GenError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
