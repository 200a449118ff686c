//! OCR document loader backed by a gateway proxy.
//!
//! The loader POSTs a single document to the proxy's `/ocr` endpoint and
//! normalizes the paged OCR result into [`Document`] records. The proxy owns
//! all provider-specific OCR configuration and authentication; this client
//! only needs the proxy address, an optional bearer token, and a model name.
//!
//! Requests are retried with exponential backoff for transient failures
//! (see [`crate::retry`]); both an async and a blocking execution path are
//! provided with identical retry semantics.
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_llm::{OcrLoader, OcrMode};
//!
//! let loader = OcrLoader::builder()
//!     .proxy_base_url("https://my-proxy.example.com")
//!     .api_key("my-bearer-token")
//!     .url_path("https://example.com/document.pdf")
//!     .model("azure-document")
//!     .mode(OcrMode::Page)
//!     .build()?;
//! let documents = loader.load().await?;
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::{Document, DocumentSource, OcrMode};
use crate::error::{GatewayError, Result};
use crate::retry::{evaluate, AttemptFailure, RetryDecision};

/// Default proxy address.
const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:4000";

/// Default OCR model name as configured in the proxy.
const DEFAULT_OCR_MODEL: &str = "azure-document";

/// Default request timeout (5 minutes; OCR on large documents is slow).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default retry budget beyond the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// MIME type assumed when inference from the file name fails.
const FALLBACK_MIME: &str = "application/pdf";

/// Maximum response-body characters echoed into a status error.
const ERROR_BODY_LIMIT: usize = 500;

// ============================================================================
// Wire types
// ============================================================================

/// Wire-level document reference: always a `document_url`, whether the content
/// came in as a URL, a file, base64, or raw bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPayload {
    /// Discriminator, fixed to `"document_url"`.
    #[serde(rename = "type")]
    kind: &'static str,

    /// Literal URL or `data:<mime>;base64,<payload>` URI.
    document_url: String,
}

impl DocumentPayload {
    fn new(document_url: String) -> Self {
        Self {
            kind: "document_url",
            document_url,
        }
    }

    /// The URL or data URI carried by this payload.
    pub fn document_url(&self) -> &str {
        &self.document_url
    }
}

#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    model: &'a str,
    document: &'a DocumentPayload,
}

#[derive(Debug, Deserialize)]
struct OcrPage {
    #[serde(default)]
    index: i64,
    #[serde(default)]
    markdown: String,
    dimensions: Option<PageDimensions>,
}

#[derive(Debug, Deserialize)]
struct PageDimensions {
    width: Option<i64>,
    height: Option<i64>,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`OcrLoader`].
///
/// Exactly one of [`file_path`](Self::file_path), [`url_path`](Self::url_path),
/// [`base64_content`](Self::base64_content), or
/// [`bytes_content`](Self::bytes_content) must be set before
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct OcrLoaderBuilder {
    proxy_base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    file_path: Option<PathBuf>,
    url_path: Option<String>,
    base64_content: Option<String>,
    bytes_content: Option<Vec<u8>>,
    mode: OcrMode,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
}

impl OcrLoaderBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the proxy base URL (default `http://localhost:4000`).
    ///
    /// Must start with `http://` or `https://`; a trailing slash is trimmed.
    pub fn proxy_base_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_base_url = Some(url.into());
        self
    }

    /// Set the bearer token for proxy authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the OCR model name as configured in the proxy
    /// (default `azure-document`).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Load a local file.
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Load a remote document by URL.
    pub fn url_path(mut self, url: impl Into<String>) -> Self {
        self.url_path = Some(url.into());
        self
    }

    /// Load base64-encoded content, optionally already a `data:` URI.
    pub fn base64_content(mut self, content: impl Into<String>) -> Self {
        self.base64_content = Some(content.into());
        self
    }

    /// Load raw document bytes.
    pub fn bytes_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.bytes_content = Some(content.into());
        self
    }

    /// Set the output mode (default [`OcrMode::Single`]).
    pub fn mode(mut self, mode: OcrMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the per-request timeout (default 300 s). Must be non-zero.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry budget beyond the first attempt (default 3).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Validate the configuration and build the loader.
    ///
    /// Fails fast with [`GatewayError::Config`] on bad source cardinality, an
    /// unrecognized base-URL scheme, or a zero timeout. No partial loader is
    /// ever produced and no I/O happens here.
    pub fn build(self) -> Result<OcrLoader> {
        let source = DocumentSource::from_options(
            self.file_path,
            self.url_path,
            self.base64_content,
            self.bytes_content,
        )?;

        let base = self
            .proxy_base_url
            .unwrap_or_else(|| DEFAULT_PROXY_BASE_URL.to_string());
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(GatewayError::Config(format!(
                "proxy_base_url must start with http:// or https://, got: {base}"
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(GatewayError::Config(
                "timeout must be positive, got: 0s".to_string(),
            ));
        }

        Ok(OcrLoader {
            proxy_base_url: base.trim_end_matches('/').to_string(),
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_OCR_MODEL.to_string()),
            source,
            mode: self.mode,
            timeout,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Loads documents through a gateway proxy's OCR endpoint.
///
/// Each load call is independent: it opens one HTTP client for its attempt
/// set, runs the attempts strictly in sequence, and releases the connection
/// on success or terminal failure. No state is carried between calls.
#[derive(Debug, Clone)]
pub struct OcrLoader {
    proxy_base_url: String,
    api_key: Option<String>,
    model: String,
    source: DocumentSource,
    mode: OcrMode,
    timeout: Duration,
    max_retries: u32,
}

impl OcrLoader {
    /// Create a new builder.
    pub fn builder() -> OcrLoaderBuilder {
        OcrLoaderBuilder::new()
    }

    /// Load documents asynchronously.
    ///
    /// Suspends during the network call and any backoff wait; cancelling the
    /// future at either point aborts the in-flight attempt without retrying.
    pub async fn load(&self) -> Result<Vec<Document>> {
        let payload = self.document_payload()?;
        let body = self.request_async(&payload).await?;
        let response: Value = serde_json::from_str(&body)?;
        self.documents_from_response(&response)
    }

    /// Load documents synchronously.
    ///
    /// Blocks the calling thread for the network call and the full backoff
    /// duration between attempts. Must not be called from within an async
    /// runtime; use [`load`](Self::load) there instead.
    pub fn load_blocking(&self) -> Result<Vec<Document>> {
        let payload = self.document_payload()?;
        let body = self.request_blocking(&payload)?;
        let response: Value = serde_json::from_str(&body)?;
        self.documents_from_response(&response)
    }

    fn endpoint(&self) -> String {
        format!("{}/ocr", self.proxy_base_url)
    }

    // ------------------------------------------------------------------
    // Payload construction
    // ------------------------------------------------------------------

    /// Build the wire payload from the configured source.
    ///
    /// Pure given the source, except for the file read; the same input bytes
    /// always produce the same payload.
    pub fn document_payload(&self) -> Result<DocumentPayload> {
        match &self.source {
            DocumentSource::Url(url) => Ok(DocumentPayload::new(url.clone())),

            DocumentSource::File(path) => {
                if !path.exists() {
                    return Err(GatewayError::FileNotFound { path: path.clone() });
                }
                let bytes = std::fs::read(path).map_err(|source| GatewayError::Io {
                    path: path.clone(),
                    source,
                })?;
                let mime = mime_guess::from_path(path)
                    .first_raw()
                    .unwrap_or(FALLBACK_MIME);
                Ok(DocumentPayload::new(format!(
                    "data:{mime};base64,{}",
                    BASE64.encode(&bytes)
                )))
            }

            DocumentSource::Base64(content) => {
                if content.starts_with("data:") {
                    Ok(DocumentPayload::new(content.clone()))
                } else {
                    Ok(DocumentPayload::new(format!(
                        "data:{FALLBACK_MIME};base64,{content}"
                    )))
                }
            }

            DocumentSource::Bytes(bytes) => Ok(DocumentPayload::new(format!(
                "data:{FALLBACK_MIME};base64,{}",
                BASE64.encode(bytes)
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Request execution
    // ------------------------------------------------------------------

    async fn request_async(&self, payload: &DocumentPayload) -> Result<String> {
        let url = self.endpoint();
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;
        let request = OcrRequest {
            model: &self.model,
            document: payload,
        };

        let mut attempt = 0u32;
        loop {
            debug!(url = %url, attempt, model = %self.model, "sending OCR request");

            let mut builder = client.post(&url).json(&request);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            let failure = match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(e) => AttemptFailure::Transport(e),
                        }
                    } else {
                        let body = response.text().await.unwrap_or_default();
                        AttemptFailure::Status {
                            status: status.as_u16(),
                            body,
                        }
                    }
                }
                Err(e) => AttemptFailure::Transport(e),
            };

            match evaluate(&failure, attempt, self.max_retries) {
                RetryDecision::Backoff(delay) => {
                    warn!(
                        url = %url,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "transient OCR failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::GiveUp => {
                    return Err(self.terminal_error(&url, attempt + 1, failure));
                }
            }
        }
    }

    fn request_blocking(&self, payload: &DocumentPayload) -> Result<String> {
        let url = self.endpoint();
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))?;
        let request = OcrRequest {
            model: &self.model,
            document: payload,
        };

        let mut attempt = 0u32;
        loop {
            debug!(url = %url, attempt, model = %self.model, "sending OCR request");

            let mut builder = client.post(&url).json(&request);
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }

            let failure = match builder.send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text() {
                            Ok(body) => return Ok(body),
                            Err(e) => AttemptFailure::Transport(e),
                        }
                    } else {
                        let body = response.text().unwrap_or_default();
                        AttemptFailure::Status {
                            status: status.as_u16(),
                            body,
                        }
                    }
                }
                Err(e) => AttemptFailure::Transport(e),
            };

            match evaluate(&failure, attempt, self.max_retries) {
                RetryDecision::Backoff(delay) => {
                    warn!(
                        url = %url,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "transient OCR failure, backing off"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                RetryDecision::GiveUp => {
                    return Err(self.terminal_error(&url, attempt + 1, failure));
                }
            }
        }
    }

    fn terminal_error(&self, url: &str, attempts: u32, failure: AttemptFailure) -> GatewayError {
        match failure {
            AttemptFailure::Transport(source) => GatewayError::Connect {
                url: url.to_string(),
                attempts,
                source,
            },
            AttemptFailure::Status { status, body } => GatewayError::Status {
                url: url.to_string(),
                attempts,
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            },
        }
    }

    // ------------------------------------------------------------------
    // Response normalization
    // ------------------------------------------------------------------

    /// Turn a parsed OCR response into output documents per the configured mode.
    fn documents_from_response(&self, response: &Value) -> Result<Vec<Document>> {
        let Some(pages_value) = response.get("pages") else {
            return Err(GatewayError::MissingPages {
                response: response.to_string(),
            });
        };
        let pages: Vec<OcrPage> = serde_json::from_value(pages_value.clone())?;
        let model = response.get("model").and_then(Value::as_str);

        match self.mode {
            OcrMode::Page => Ok(pages
                .iter()
                .map(|page| {
                    let mut metadata = HashMap::new();
                    metadata.insert("page".to_string(), Value::from(page.index));
                    if let Some(dims) = &page.dimensions {
                        if let Some(width) = dims.width {
                            metadata.insert("width".to_string(), Value::from(width));
                        }
                        if let Some(height) = dims.height {
                            metadata.insert("height".to_string(), Value::from(height));
                        }
                    }
                    self.insert_common_metadata(&mut metadata, model);
                    Document::new(page.markdown.clone(), metadata)
                })
                .collect()),

            OcrMode::Single => {
                let content = pages
                    .iter()
                    .map(|page| page.markdown.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                let mut metadata = HashMap::new();
                metadata.insert("total_pages".to_string(), Value::from(pages.len()));
                self.insert_common_metadata(&mut metadata, model);
                Ok(vec![Document::new(content, metadata)])
            }
        }
    }

    fn insert_common_metadata(
        &self,
        metadata: &mut HashMap<String, Value>,
        model: Option<&str>,
    ) {
        if let Some(source) = self.source.label() {
            metadata.insert("source".to_string(), Value::from(source));
        }
        if let Some(model) = model {
            metadata.insert("model".to_string(), Value::from(model));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url_loader() -> OcrLoader {
        OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .build()
            .unwrap()
    }

    // ------------------------------------------------------------------
    // Builder validation
    // ------------------------------------------------------------------

    #[test]
    fn test_builder_defaults() {
        let loader = url_loader();
        assert_eq!(loader.proxy_base_url, "http://localhost:4000");
        assert_eq!(loader.model, "azure-document");
        assert_eq!(loader.mode, OcrMode::Single);
        assert_eq!(loader.timeout, Duration::from_secs(300));
        assert_eq!(loader.max_retries, 3);
        assert!(loader.api_key.is_none());
    }

    #[test]
    fn test_builder_requires_a_source() {
        let err = OcrLoader::builder().build().unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_builder_rejects_multiple_sources() {
        let err = OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .base64_content("aGVsbG8=")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Provided 2 sources"));
    }

    #[test]
    fn test_builder_rejects_bad_scheme() {
        let err = OcrLoader::builder()
            .proxy_base_url("ftp://proxy.example.com")
            .url_path("https://example.com/doc.pdf")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let err = OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("timeout must be positive"));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let loader = OcrLoader::builder()
            .proxy_base_url("http://proxy.example.com/")
            .url_path("https://example.com/doc.pdf")
            .build()
            .unwrap();
        assert_eq!(loader.endpoint(), "http://proxy.example.com/ocr");
    }

    #[test]
    fn test_builder_zero_retries_allowed() {
        let loader = OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .max_retries(0)
            .build()
            .unwrap();
        assert_eq!(loader.max_retries, 0);
    }

    // ------------------------------------------------------------------
    // Payload construction
    // ------------------------------------------------------------------

    #[test]
    fn test_payload_url_verbatim() {
        let payload = url_loader().document_payload().unwrap();
        assert_eq!(payload.document_url(), "https://example.com/doc.pdf");
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = url_loader().document_payload().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "document_url",
                "document_url": "https://example.com/doc.pdf",
            })
        );
    }

    #[test]
    fn test_payload_base64_wrapped_as_pdf() {
        let loader = OcrLoader::builder()
            .base64_content("aGVsbG8=")
            .build()
            .unwrap();
        let payload = loader.document_payload().unwrap();
        assert_eq!(
            payload.document_url(),
            "data:application/pdf;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_payload_data_uri_passthrough() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let loader = OcrLoader::builder().base64_content(uri).build().unwrap();
        let payload = loader.document_payload().unwrap();
        assert_eq!(payload.document_url(), uri);
    }

    #[test]
    fn test_payload_bytes_encoded() {
        let loader = OcrLoader::builder()
            .bytes_content(b"hello".to_vec())
            .build()
            .unwrap();
        let payload = loader.document_payload().unwrap();
        assert_eq!(
            payload.document_url(),
            "data:application/pdf;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_payload_is_deterministic() {
        let loader = OcrLoader::builder()
            .bytes_content(b"same bytes".to_vec())
            .build()
            .unwrap();
        assert_eq!(
            loader.document_payload().unwrap(),
            loader.document_payload().unwrap()
        );
    }

    #[test]
    fn test_payload_missing_file() {
        let loader = OcrLoader::builder()
            .file_path("/nonexistent/never/doc.pdf")
            .build()
            .unwrap();
        let err = loader.document_payload().unwrap_err();
        assert!(matches!(err, GatewayError::FileNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/never/doc.pdf"));
    }

    #[test]
    fn test_payload_file_mime_inference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let loader = OcrLoader::builder().file_path(&path).build().unwrap();
        let payload = loader.document_payload().unwrap();
        assert!(payload.document_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_payload_file_unknown_extension_defaults_to_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.unknownext");
        std::fs::write(&path, b"bytes").unwrap();

        let loader = OcrLoader::builder().file_path(&path).build().unwrap();
        let payload = loader.document_payload().unwrap();
        assert!(payload
            .document_url()
            .starts_with("data:application/pdf;base64,"));
    }

    // ------------------------------------------------------------------
    // Response normalization
    // ------------------------------------------------------------------

    fn two_page_response() -> Value {
        json!({
            "pages": [
                {
                    "index": 0,
                    "markdown": "# Page 1",
                    "dimensions": {"width": 612, "height": 792},
                },
                {
                    "index": 1,
                    "markdown": "# Page 2",
                    "dimensions": {"width": 612, "height": 792},
                },
            ],
            "model": "azure-document",
        })
    }

    #[test]
    fn test_single_mode_joins_pages() {
        let docs = url_loader()
            .documents_from_response(&two_page_response())
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "# Page 1\n\n# Page 2");
        assert_eq!(docs[0].metadata["total_pages"], json!(2));
        assert_eq!(docs[0].metadata["source"], json!("https://example.com/doc.pdf"));
        assert_eq!(docs[0].metadata["model"], json!("azure-document"));
    }

    #[test]
    fn test_page_mode_one_document_per_page() {
        let loader = OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .mode(OcrMode::Page)
            .build()
            .unwrap();
        let docs = loader.documents_from_response(&two_page_response()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].page_content, "# Page 1");
        assert_eq!(docs[0].metadata["page"], json!(0));
        assert_eq!(docs[0].metadata["width"], json!(612));
        assert_eq!(docs[0].metadata["height"], json!(792));
        assert_eq!(docs[1].page_content, "# Page 2");
        assert_eq!(docs[1].metadata["page"], json!(1));
    }

    #[test]
    fn test_page_mode_defaults_for_sparse_pages() {
        let loader = OcrLoader::builder()
            .base64_content("aGVsbG8=")
            .mode(OcrMode::Page)
            .build()
            .unwrap();
        let docs = loader
            .documents_from_response(&json!({"pages": [{}]}))
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "");
        assert_eq!(docs[0].metadata["page"], json!(0));
        // No dimensions, no addressable source, no model in the response.
        assert!(!docs[0].metadata.contains_key("width"));
        assert!(!docs[0].metadata.contains_key("source"));
        assert!(!docs[0].metadata.contains_key("model"));
    }

    #[test]
    fn test_single_mode_zero_pages() {
        let docs = url_loader()
            .documents_from_response(&json!({"pages": []}))
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "");
        assert_eq!(docs[0].metadata["total_pages"], json!(0));
    }

    #[test]
    fn test_missing_pages_is_fatal_in_both_modes() {
        let response = json!({"error": "upstream OCR unavailable"});
        for mode in [OcrMode::Single, OcrMode::Page] {
            let loader = OcrLoader::builder()
                .url_path("https://example.com/doc.pdf")
                .mode(mode)
                .build()
                .unwrap();
            let err = loader.documents_from_response(&response).unwrap_err();
            assert!(matches!(err, GatewayError::MissingPages { .. }));
            assert!(err.to_string().contains("upstream OCR unavailable"));
        }
    }

    #[test]
    fn test_page_order_preserved() {
        let response = json!({
            "pages": [
                {"index": 2, "markdown": "third"},
                {"index": 0, "markdown": "first"},
                {"index": 1, "markdown": "second"},
            ],
        });
        let loader = OcrLoader::builder()
            .url_path("https://example.com/doc.pdf")
            .mode(OcrMode::Page)
            .build()
            .unwrap();
        let docs = loader.documents_from_response(&response).unwrap();
        // Response order wins; the index is metadata, not a sort key.
        assert_eq!(docs[0].page_content, "third");
        assert_eq!(docs[1].page_content, "first");
        assert_eq!(docs[2].page_content, "second");
    }

    #[test]
    fn test_terminal_error_truncates_body() {
        let loader = url_loader();
        let err = loader.terminal_error(
            "http://localhost:4000/ocr",
            1,
            AttemptFailure::Status {
                status: 500,
                body: "x".repeat(2000),
            },
        );
        match err {
            GatewayError::Status { body, .. } => assert_eq!(body.len(), 500),
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
