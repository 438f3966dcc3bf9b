use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Server responded with {0}")]
    Status(u16),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => StreamError::Status(status.as_u16()),
            None => StreamError::Transport(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
