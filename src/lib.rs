//! Gateway LLM - client library for an LLM gateway proxy.
//!
//! This crate provides the client-side pieces for working against a
//! multi-provider LLM gateway:
//!
//! - **OCR document loading**: stream OCR results from the gateway's `/ocr`
//!   endpoint into plain document records, with bounded retry and exponential
//!   backoff ([`ocr`]).
//! - **Embeddings**: a thin adapter over an opaque multi-provider embedding
//!   backend that forwards only configured options ([`embeddings`]).
//! - **Usage accounting**: normalization of heterogeneous provider
//!   token-usage schemas into one canonical record ([`usage`]).
//!
//! The components are independent; none of them share state, and every load
//! or embed call is a self-contained execution.
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_llm::{OcrLoader, OcrMode};
//!
//! let loader = OcrLoader::builder()
//!     .url_path("https://example.com/document.pdf")
//!     .mode(OcrMode::Page)
//!     .build()?;
//! let documents = loader.load().await?;
//! for doc in documents {
//!     println!("{}: {} chars", doc.metadata["page"], doc.page_content.len());
//! }
//! ```
//!
//! # See Also
//!
//! - [`crate::ocr`] for the loader and its builder
//! - [`crate::retry`] for the retry policy shared by both load paths
//! - [`crate::error`] for the error taxonomy

pub mod document;
pub mod embeddings;
pub mod error;
pub mod ocr;
pub mod retry;
pub mod usage;

pub use document::{Document, DocumentSource, OcrMode};
pub use embeddings::{
    EmbeddingApiResponse, EmbeddingBackend, EmbeddingVector, GatewayEmbeddings,
    GatewayEmbeddingsBuilder,
};
pub use error::{GatewayError, Result};
pub use ocr::{DocumentPayload, OcrLoader, OcrLoaderBuilder};
pub use usage::UsageMetadata;
