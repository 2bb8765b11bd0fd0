use thiserror::Error;

use crate::core::error::SERVER_ERROR_MESSAGE;

/// Failures surfaced by the client library.
///
/// `Display` yields the message meant for the user: server messages verbatim,
/// and "Server error" for 5xx and transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Server(String),

    #[error("Server error")]
    Transport,
}

impl ClientError {
    /// Map an HTTP error status and the server's message to the taxonomy
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            400 | 422 => Self::Validation(message.unwrap_or_else(|| "Invalid request".to_string())),
            401 => Self::Unauthorized(message.unwrap_or_else(|| "Unauthorized".to_string())),
            403 => Self::AccessDenied(message.unwrap_or_else(|| "Access denied".to_string())),
            404 => Self::NotFound(message.unwrap_or_else(|| "Not found".to_string())),
            500..=599 => Self::Server(SERVER_ERROR_MESSAGE.to_string()),
            _ => Self::Server(message.unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string())),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        tracing::debug!("HTTP transport failure: {}", e);
        Self::Transport
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
