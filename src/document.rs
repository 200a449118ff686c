//! Document shapes produced and consumed by the OCR loader.
//!
//! [`Document`] is the plain output record (`page_content` + `metadata`) that
//! downstream document pipelines expect. [`DocumentSource`] is the single-variant
//! input description: exactly one of file path, remote URL, base64 content, or
//! raw bytes, enforced at construction so no "which field is set" branching
//! survives into the request path.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// A loaded document: page content plus provider metadata.
///
/// Constructed fresh per load call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text content (markdown for OCR results).
    pub page_content: String,

    /// Metadata mapping (`page`, `total_pages`, `width`, `height`, `source`,
    /// `model`, ... depending on mode and response).
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    /// Create a new document.
    pub fn new(page_content: impl Into<String>, metadata: HashMap<String, serde_json::Value>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }
}

/// The input for one OCR load: exactly one source of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// Path to a local file, read and base64-encoded at request time.
    File(PathBuf),

    /// URL of a remote document, forwarded verbatim to the proxy.
    Url(String),

    /// Base64-encoded content, optionally already wrapped as a `data:` URI.
    Base64(String),

    /// Raw document bytes, base64-encoded at request time.
    Bytes(Vec<u8>),
}

impl DocumentSource {
    /// Build a source from the four mutually exclusive optional inputs.
    ///
    /// Exactly one input must be `Some`; zero or multiple is a configuration
    /// error, reported before any network activity.
    pub fn from_options(
        file_path: Option<PathBuf>,
        url_path: Option<String>,
        base64_content: Option<String>,
        bytes_content: Option<Vec<u8>>,
    ) -> Result<Self> {
        let provided = [
            file_path.is_some(),
            url_path.is_some(),
            base64_content.is_some(),
            bytes_content.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count();

        if provided == 0 {
            return Err(GatewayError::Config(
                "must provide exactly one of: file_path, url_path, base64_content, \
                 or bytes_content"
                    .to_string(),
            ));
        }
        if provided > 1 {
            return Err(GatewayError::Config(format!(
                "must provide exactly one of: file_path, url_path, base64_content, \
                 or bytes_content. Provided {provided} sources."
            )));
        }

        Ok(if let Some(path) = file_path {
            Self::File(path)
        } else if let Some(url) = url_path {
            Self::Url(url)
        } else if let Some(b64) = base64_content {
            Self::Base64(b64)
        } else {
            Self::Bytes(bytes_content.unwrap_or_default())
        })
    }

    /// The originally provided file path or URL, for `source` metadata.
    ///
    /// Base64 and byte inputs have no addressable origin and return `None`.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::File(path) => Some(path.display().to_string()),
            Self::Url(url) => Some(url.clone()),
            Self::Base64(_) | Self::Bytes(_) => None,
        }
    }
}

/// Output mode for the OCR loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrMode {
    /// One document with all page content concatenated.
    #[default]
    Single,

    /// One document per input page.
    Page,
}

impl FromStr for OcrMode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Self::Single),
            "page" => Ok(Self::Page),
            other => Err(GatewayError::Config(format!(
                "mode must be 'single' or 'page', got: {other}"
            ))),
        }
    }
}

impl fmt::Display for OcrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Page => f.write_str("page"),
        }
    }
}
