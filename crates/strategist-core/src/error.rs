//! Error types for strategist

use thiserror::Error;

/// Result type alias using StrategistError
pub type Result<T> = std::result::Result<T, StrategistError>;

/// Error type alias for convenience
pub type Error = StrategistError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for strategist
#[derive(Debug, Error)]
pub enum StrategistError {
    /// A provider (search, chat, embedding) was unreachable or rejected the
    /// request. Never retried; aborts the current run.
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// The LLM response was not JSON-parseable even after the brace-scan
    /// repair. The raw text is preserved for diagnosis.
    #[error("Malformed generation: {message}")]
    MalformedGeneration { message: String, raw: String },

    /// Syntactically valid JSON that does not match the strategy schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Store write/read failure. The orchestrator downgrades this to a
    /// status flag instead of propagating it.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl StrategistError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RecordNotFound(_) => exit_codes::NOT_FOUND,
            Self::Config(_) | Self::InvalidInput(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Keep the raw LLM output around when reporting a malformed generation.
    pub fn malformed_generation(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedGeneration {
            message: message.into(),
            raw: raw.into(),
        }
    }
}
