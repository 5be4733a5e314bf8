//! Error types for the documentation server.

use thiserror::Error;

/// Result type for documentation server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the documentation server.
///
/// Every variant maps to a machine-readable code through [`Error::code`], which
/// is what the tool layer reports alongside the human-readable message.
#[derive(Error, Debug)]
pub enum Error {
    /// Fetching or extracting a documentation page failed after all retries.
    #[error("{message}: {source}")]
    Scraping {
        /// Error message
        message: String,
        /// URL that was being scraped
        url: String,
        /// Last failure observed
        source: Box<Error>,
    },

    /// Reading or writing the on-disk cache failed.
    #[error("{message}: {source}")]
    Cache {
        /// Error message
        message: String,
        /// Underlying failure
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A code snippet could not be generated.
    #[error("Code generation error: {message}")]
    CodeGeneration {
        /// Error message
        message: String,
        /// Offending property, if any
        property: Option<String>,
    },

    /// Tool input was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client session could not be started or ended abnormally.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    pub(crate) fn scraping(message: impl Into<String>, url: impl Into<String>, source: Error) -> Self {
        Error::Scraping {
            message: message.into(),
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn cache(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Cache {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Machine-readable kind code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Scraping { .. } => "SCRAPING_ERROR",
            Error::Cache { .. } => "CACHE_ERROR",
            Error::CodeGeneration { .. } => "CODE_GENERATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Status { .. } | Error::Http(_) | Error::Timeout => "HTTP_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Protocol(_) => "PROTOCOL_ERROR",
        }
    }

    /// URL attached to the error, for scraping and status failures.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Scraping { url, .. } | Error::Status { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Build an error from a failed `reqwest` call, folding timeouts into [`Error::Timeout`].
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err)
        }
    }
}
