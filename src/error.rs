//! Error types for bfhl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The operation payload is missing, mistyped or out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request body carries none of the recognised operation fields
    #[error("Invalid Key")]
    InvalidKey,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Any failure while talking to the AI provider
    #[error("AI Service Unavailable: {0}")]
    AiUnavailable(String),

    /// A blocking computation panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_input(detail: impl Into<String>) -> Self {
        Error::InvalidInput(detail.into())
    }

    /// Whether the failure was caused by the caller rather than by processing
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidKey | Error::MalformedBody(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::AiUnavailable(status.as_u16().to_string()),
            None if err.is_timeout() => Error::AiUnavailable("request timed out".into()),
            None => Error::AiUnavailable(err.to_string()),
        }
    }
}
