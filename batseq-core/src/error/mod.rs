//! Core error types for BatSEQ

use thiserror::Error;

/// Main error type for BatSEQ operations
#[derive(Error, Debug)]
pub enum BatseqError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One of the reference database artifacts is missing. Only the file
    /// name is carried so the message is safe to hand to a client.
    #[error("Database file {artifact} is missing")]
    DatabaseUnavailable { artifact: String },

    #[error("BLAST execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Failed to parse BLAST output: {0}")]
    ParseFailed(String),

    #[error("Failed to write temporary FASTA file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl BatseqError {
    /// True when the caller sent something unusable (HTTP 400 territory)
    pub fn is_client_error(&self) -> bool {
        matches!(self, BatseqError::InvalidInput(_))
    }

    /// Short machine-friendly name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            BatseqError::InvalidInput(_) => "invalid_input",
            BatseqError::DatabaseUnavailable { .. } => "database_unavailable",
            BatseqError::ExecutionFailed(_) => "execution_failed",
            BatseqError::ParseFailed(_) => "parse_failed",
            BatseqError::Staging(_) => "staging_failed",
            BatseqError::Io(_) => "io",
            BatseqError::Serialization(_) => "serialization",
            BatseqError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for BatSEQ operations
pub type BatseqResult<T> = Result<T, BatseqError>;

impl From<serde_json::Error> for BatseqError {
    fn from(err: serde_json::Error) -> Self {
        BatseqError::Serialization(err.to_string())
    }
}
