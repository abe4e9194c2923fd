//! Error types for the Dirble client

/// Result type alias for Dirble operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Dirble client
///
/// Three families reach callers of the endpoint methods:
/// transport failures ([`Error::Http`], [`Error::Transport`]),
/// non-200 answers ([`Error::Status`]) and decode failures ([`Error::Json`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed in the reqwest transport
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom transport could not perform the request
    #[error("Transport error: {0}")]
    Transport(String),

    /// API answered with a status other than 200
    #[error("HTTP Error: {0}")]
    Status(u16),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Path parameter that cannot be sent as a URL segment
    #[error("Invalid path segment: {0:?}")]
    InvalidSegment(String),

    /// IO error (configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration parsing failed
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error from any displayable cause
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status carried by a [`Error::Status`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// True when the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport(_))
    }

    /// True when the API answered with a non-200 status
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status(_))
    }

    /// True when the response body could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}
