//! Domain-specific error types for askviz

use thiserror::Error;

/// Main error type for the askviz client
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Visualization error: {message}")]
    Visualization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl AskError {
    pub fn visualization(message: impl Into<String>) -> Self {
        AskError::Visualization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AskError {
    fn from(err: serde_json::Error) -> Self {
        AskError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AskError::Serialization {
                message: format!("Response body is not a valid answer: {}", err),
            };
        }
        AskError::Transport {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<std::io::Error> for AskError {
    fn from(err: std::io::Error) -> Self {
        AskError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for askviz operations
pub type Result<T> = std::result::Result<T, AskError>;
