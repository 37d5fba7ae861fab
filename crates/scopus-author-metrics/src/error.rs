//! Error types for the Scopus author metrics resolver.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or rejected credentials (401/403 response)
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Quota exceeded (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if a later attempt could succeed.
    ///
    /// Nothing in this crate retries; the final message suggests re-running.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors that abort a run.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error from the Scopus client
    #[error("Scopus API error: {0}")]
    Client(#[from] ClientError),

    /// Input file is not a plain-text name list
    #[error("Unsupported input file type: {}. Use a .txt file with one name per line.", path.display())]
    UnsupportedInput {
        /// Offending path
        path: PathBuf,
    },

    /// Neither the input file nor the command line yielded a name
    #[error("No author names provided. Use --input or --name.")]
    NoNames,

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook packaging error
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] zip::result::ZipError),
}

impl AppError {
    /// Create an unsupported input error.
    #[must_use]
    pub fn unsupported_input(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedInput { path: path.into() }
    }

    /// Convert to a user-facing message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::Unauthorized { .. }) => {
                "Scopus rejected the credentials. Check SCOPUS_API_KEY and network access."
                    .to_string()
            }
            Self::Client(err) => match err.retry_after() {
                Some(wait) => format!(
                    "Rate limited by the Scopus API. Wait {}s and run again.",
                    wait.as_secs()
                ),
                None if err.is_retryable() => {
                    format!("{self}. The service may recover; run again later.")
                }
                None => self.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for run-level operations.
pub type AppResult<T> = Result<T, AppError>;
