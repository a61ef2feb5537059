//! Error types for the intake client

use thiserror::Error;

/// Message used when a failed response carries none of its own
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Submission or retrieval failure
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Server unreachable, connection dropped, or timed out
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Server answered 2xx but the body was not a success envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SubmissionError {
    /// Message from the server, if this failure carries one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmissionError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Local fallback store failure
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt fallback data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, SubmissionError>;
