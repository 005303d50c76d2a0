//! Error types for talking to the console backend.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Everything that can go wrong between the terminal and the console server.
///
/// None of these are fatal: callers turn them into a placeholder, a toast or
/// an error line and keep the UI usable.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A location could not be resolved against the base URL.
    #[error("invalid location: {0}")]
    Location(#[from] url::ParseError),

    /// A location resolved to a host other than the console's.
    #[error("refusing to leave the console origin: {0}")]
    ForeignOrigin(String),
}

impl From<serde_json::Error> for ConsoleError {
    fn from(e: serde_json::Error) -> Self {
        ConsoleError::Malformed(e.to_string())
    }
}
