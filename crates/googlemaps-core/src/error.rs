use thiserror::Error;

/// Result type alias for Google Maps operations
pub type Result<T> = std::result::Result<T, MapsError>;

/// Errors that can occur when using the Google Maps web services
#[derive(Error, Debug)]
pub enum MapsError {
    /// The client was configured with missing or conflicting options
    #[error("configuration error: {0}")]
    Config(String),

    /// Request parameters were rejected before anything was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The overall retry deadline elapsed
    #[error("the request timed out")]
    Timeout,

    /// The request was aborted through its cancellation token
    #[error("the request was cancelled")]
    Cancelled,

    /// The HTTP round trip itself failed
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The server answered with an unexpected HTTP status
    #[error("HTTP error: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The API returned a well-formed error envelope
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no details provided"))]
    Api {
        /// Status string reported by the service, e.g. `REQUEST_DENIED`
        status: String,
        /// Human-readable detail, when the service sent one
        message: Option<String>,
    },

    /// The body could not be parsed in the format it was declared as
    #[error("received a malformed {format} response: {detail}")]
    MalformedResponse {
        /// Declared body format (`JSON` or `XML`)
        format: &'static str,
        /// Parser diagnostic
        detail: String,
    },

    /// The query quota was exhausted and retries for it are disabled
    #[error("over query limit: {}", .message.as_deref().unwrap_or("quota exhausted"))]
    OverQueryLimit {
        /// Human-readable detail, when the service sent one
        message: Option<String>,
    },

    /// Signing input could not be encoded
    #[error("encoding error: {0}")]
    Encoding(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapsError {
    /// Returns true if the remote service rejected the request with an error envelope
    /// or sent a body that could not be parsed
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::MalformedResponse { .. })
    }

    /// Returns the HTTP status code if this is an HTTP error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns the service status string if this is an API error
    #[must_use]
    pub fn api_status(&self) -> Option<&str> {
        match self {
            Self::Api { status, .. } => Some(status),
            Self::OverQueryLimit { .. } => Some("OVER_QUERY_LIMIT"),
            _ => None,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}
