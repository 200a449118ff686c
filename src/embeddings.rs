//! Embeddings adapter over a multi-provider routing backend.
//!
//! The routing library itself is out of scope here; it is modeled as the
//! [`EmbeddingBackend`] trait and injected. The adapter's job is narrow:
//! collect the configured options into a parameter map that contains *only*
//! the fields the caller actually set, forward them with the input texts, and
//! unpack the returned list of vectors unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_llm::GatewayEmbeddings;
//!
//! let embeddings = GatewayEmbeddings::builder(backend)
//!     .model("openai/text-embedding-3-small")
//!     .api_key("sk-...")
//!     .build();
//! let vectors = embeddings.embed_documents(&["hello".into(), "world".into()]).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GatewayError, Result};

/// Default embedding model in provider-prefixed routing format.
const DEFAULT_EMBEDDING_MODEL: &str = "openai/text-embedding-3-small";

/// Default retry budget forwarded to the backend.
const DEFAULT_MAX_RETRIES: u32 = 1;

/// One embedding vector from the backend's `data` sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingVector {
    /// The vector itself.
    pub embedding: Vec<f32>,
}

/// Response contract of the routing backend's embedding call.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingApiResponse {
    /// One entry per input text, in input order.
    pub data: Vec<EmbeddingVector>,

    /// Model that served the request, when the backend reports it.
    #[serde(default)]
    pub model: Option<String>,
}

/// The multi-provider embedding call, treated as a black box.
///
/// Implementations route `input` plus the forwarded parameter map to whichever
/// provider the `model` entry selects.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embed a batch of texts with the given routing parameters.
    async fn embedding(
        &self,
        input: &[String],
        params: &Map<String, Value>,
    ) -> Result<EmbeddingApiResponse>;
}

/// Builder for [`GatewayEmbeddings`].
pub struct GatewayEmbeddingsBuilder {
    backend: Arc<dyn EmbeddingBackend>,
    model: String,
    api_key: Option<String>,
    api_base: Option<String>,
    api_version: Option<String>,
    custom_llm_provider: Option<String>,
    organization: Option<String>,
    request_timeout: Option<f64>,
    max_retries: u32,
    extra_headers: Option<HashMap<String, String>>,
    dimensions: Option<u32>,
    encoding_format: Option<String>,
    model_kwargs: Map<String, Value>,
}

impl GatewayEmbeddingsBuilder {
    fn new(backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self {
            backend,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            api_base: None,
            api_version: None,
            custom_llm_provider: None,
            organization: None,
            request_timeout: None,
            max_retries: DEFAULT_MAX_RETRIES,
            extra_headers: None,
            dimensions: None,
            encoding_format: None,
            model_kwargs: Map::new(),
        }
    }

    /// Set the model in provider-prefixed routing format
    /// (e.g. `openai/text-embedding-3-small`, `cohere/embed-english-v3.0`).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the provider API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the API version (e.g. for Azure).
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Override the backend's provider routing.
    pub fn custom_llm_provider(mut self, provider: impl Into<String>) -> Self {
        self.custom_llm_provider = Some(provider.into());
        self
    }

    /// Set the organization ID (e.g. for OpenAI).
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn request_timeout(mut self, seconds: f64) -> Self {
        self.request_timeout = Some(seconds);
        self
    }

    /// Set the retry budget forwarded to the backend (default 1).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set extra headers to include in backend requests.
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Set the output embedding dimensions (if the model supports it).
    pub fn dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the encoding format (e.g. `float`, `base64`).
    pub fn encoding_format(mut self, format: impl Into<String>) -> Self {
        self.encoding_format = Some(format.into());
        self
    }

    /// Add a free-form model parameter forwarded to the backend.
    pub fn model_kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.model_kwargs.insert(key.into(), value);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> GatewayEmbeddings {
        GatewayEmbeddings {
            backend: self.backend,
            model: self.model,
            api_key: self.api_key,
            api_base: self.api_base,
            api_version: self.api_version,
            custom_llm_provider: self.custom_llm_provider,
            organization: self.organization,
            request_timeout: self.request_timeout,
            max_retries: self.max_retries,
            extra_headers: self.extra_headers,
            dimensions: self.dimensions,
            encoding_format: self.encoding_format,
            model_kwargs: self.model_kwargs,
        }
    }
}

/// Embedding adapter: routes texts through an [`EmbeddingBackend`] with only
/// the configured options forwarded.
pub struct GatewayEmbeddings {
    backend: Arc<dyn EmbeddingBackend>,
    model: String,
    api_key: Option<String>,
    api_base: Option<String>,
    api_version: Option<String>,
    custom_llm_provider: Option<String>,
    organization: Option<String>,
    request_timeout: Option<f64>,
    max_retries: u32,
    extra_headers: Option<HashMap<String, String>>,
    dimensions: Option<u32>,
    encoding_format: Option<String>,
    model_kwargs: Map<String, Value>,
}

impl GatewayEmbeddings {
    /// Create a new builder around a backend.
    pub fn builder(backend: Arc<dyn EmbeddingBackend>) -> GatewayEmbeddingsBuilder {
        GatewayEmbeddingsBuilder::new(backend)
    }

    /// The configured model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the forwarded parameter map, excluding unset options.
    ///
    /// Unset fields are omitted entirely, never serialized as null.
    /// `model_kwargs` entries are merged last and may override named fields.
    pub fn request_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("model".to_string(), Value::from(self.model.clone()));
        if let Some(v) = &self.api_key {
            params.insert("api_key".to_string(), Value::from(v.clone()));
        }
        if let Some(v) = &self.api_base {
            params.insert("api_base".to_string(), Value::from(v.clone()));
        }
        if let Some(v) = &self.api_version {
            params.insert("api_version".to_string(), Value::from(v.clone()));
        }
        if let Some(v) = &self.custom_llm_provider {
            params.insert("custom_llm_provider".to_string(), Value::from(v.clone()));
        }
        if let Some(v) = &self.organization {
            params.insert("organization".to_string(), Value::from(v.clone()));
        }
        if let Some(v) = self.request_timeout {
            params.insert("timeout".to_string(), Value::from(v));
        }
        params.insert("max_retries".to_string(), Value::from(self.max_retries));
        if let Some(headers) = &self.extra_headers {
            let map: Map<String, Value> = headers
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                .collect();
            params.insert("extra_headers".to_string(), Value::Object(map));
        }
        if let Some(v) = self.dimensions {
            params.insert("dimensions".to_string(), Value::from(v));
        }
        if let Some(v) = &self.encoding_format {
            params.insert("encoding_format".to_string(), Value::from(v.clone()));
        }
        for (key, value) in &self.model_kwargs {
            params.insert(key.clone(), value.clone());
        }
        params
    }

    /// Embed a batch of document texts.
    ///
    /// Returns one vector per input text, in input order, exactly as the
    /// backend produced them.
    pub async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let params = self.request_params();
        debug!(
            model = %self.model,
            texts = texts.len(),
            "embedding request"
        );
        let response = self.backend.embedding(texts, &params).await?;
        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Embed a single query text.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_documents(&[text.to_string()]).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Backend("empty embedding result".to_string()))
    }
}
