//! Error types for the dcloud client
//!
//! The `Display` form of every variant is the message surfaced to callers in
//! a failed [`OperationResult`](crate::OperationResult).

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the storage service
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-successful status code
    #[error("HTTP {0}")]
    Status(u16),

    /// Download of an object the service could not deliver
    #[error("HTTP {0} - Fichier non trouvé")]
    NotFound(u16),

    /// The request could not be completed
    #[error("{0}")]
    Network(String),

    /// The response body could not be parsed
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured endpoint does not form a valid request URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failure (save sinks, payload files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the server responded at all
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Status(_) | Error::NotFound(_))
    }

    /// Status code reported by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(code) | Error::NotFound(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
