//! Error types for gateway operations.
//!
//! # Error Handling Philosophy
//!
//! Errors should be:
//! 1. **Actionable**: Tell the caller what went wrong and where
//! 2. **Specific**: Include relevant context (URL, attempt count, status)
//! 3. **Diagnosable**: Preserve the originating failure as the error source
//!
//! Configuration problems are reported at construction time, before any I/O.
//! Network failures are only surfaced after the retry budget is exhausted, and
//! carry the terminal attempt's error in their source chain.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur in gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid configuration, rejected before any network activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A referenced local file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A local file exists but could not be read.
    #[error("Failed to read {}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure (connection refused, DNS, timeout) after all
    /// attempts were spent.
    #[error(
        "Failed to connect to gateway proxy at {url}. Is the proxy running? \
         ({attempts} attempt(s) made)"
    )]
    Connect {
        /// Full request URL.
        url: String,
        /// Total attempts made, including the first.
        attempts: u32,
        /// The terminal transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx HTTP response, either non-retryable or surviving the retry budget.
    ///
    /// `body` holds at most the first 500 characters of the response body.
    #[error(
        "OCR request to {url} failed after {attempts} attempt(s). \
         Status: {status}, Response: {body}"
    )]
    Status {
        /// Full request URL.
        url: String,
        /// Total attempts made, including the first.
        attempts: u32,
        /// HTTP status code of the terminal response.
        status: u16,
        /// Bounded prefix of the response body.
        body: String,
    },

    /// Response JSON is missing the required `pages` field.
    #[error("Invalid response from gateway proxy: missing 'pages' field. Response: {response}")]
    MissingPages {
        /// The raw response, echoed for diagnosis.
        response: String,
    },

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by an embedding backend.
    #[error("Embedding backend error: {0}")]
    Backend(String),
}
