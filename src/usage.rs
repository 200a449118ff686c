//! Canonical usage accounting.
//!
//! Providers report token usage in incompatible shapes: flat OpenAI-style
//! counters, Anthropic cache fields, audio token counters for multimodal
//! models, and nested `completion_tokens_details` for reasoning models.
//! [`UsageMetadata::from_token_usage`] maps whatever subset is present into one
//! stable record.
//!
//! Detail buckets are sparse by design: a sub-count appears iff its source
//! field is present, so a zero from the provider is kept while an absent field
//! stays absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical token usage for one model call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    pub input_tokens: u64,

    /// Tokens in the completion.
    pub output_tokens: u64,

    /// Total tokens. Taken from the provider's explicit total when supplied,
    /// otherwise `input_tokens + output_tokens`.
    pub total_tokens: u64,

    /// Named input-side sub-counts (`cache_read`, `cache_creation`, `audio`).
    pub input_token_details: HashMap<String, u64>,

    /// Named output-side sub-counts (`audio`, `reasoning`).
    pub output_token_details: HashMap<String, u64>,
}

/// Read a token count, tolerating the float encodings some providers emit.
fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| value.as_f64().map(|f| f as u64))
}

impl UsageMetadata {
    /// Normalize a provider token-usage dictionary.
    ///
    /// # Example
    ///
    /// ```
    /// use gateway_llm::usage::UsageMetadata;
    ///
    /// let usage = serde_json::json!({
    ///     "prompt_tokens": 10,
    ///     "completion_tokens": 20,
    ///     "total_tokens": 30,
    /// });
    /// let metadata = UsageMetadata::from_token_usage(usage.as_object().unwrap());
    /// assert_eq!(metadata.input_tokens, 10);
    /// assert_eq!(metadata.total_tokens, 30);
    /// assert!(metadata.input_token_details.is_empty());
    /// ```
    pub fn from_token_usage(token_usage: &Map<String, Value>) -> Self {
        let input_tokens = token_usage.get("prompt_tokens").and_then(count).unwrap_or(0);
        let output_tokens = token_usage
            .get("completion_tokens")
            .and_then(count)
            .unwrap_or(0);
        let total_tokens = token_usage
            .get("total_tokens")
            .and_then(count)
            .unwrap_or(input_tokens + output_tokens);

        let mut input_token_details = HashMap::new();
        if let Some(n) = token_usage.get("cache_read_input_tokens").and_then(count) {
            input_token_details.insert("cache_read".to_string(), n);
        }
        if let Some(n) = token_usage.get("cache_creation_input_tokens").and_then(count) {
            input_token_details.insert("cache_creation".to_string(), n);
        }
        if let Some(n) = token_usage.get("audio_input_tokens").and_then(count) {
            input_token_details.insert("audio".to_string(), n);
        }

        let mut output_token_details = HashMap::new();
        if let Some(n) = token_usage.get("audio_output_tokens").and_then(count) {
            output_token_details.insert("audio".to_string(), n);
        }
        if let Some(n) = token_usage
            .get("completion_tokens_details")
            .and_then(Value::as_object)
            .and_then(|details| details.get("reasoning_tokens"))
            .and_then(count)
        {
            output_token_details.insert("reasoning".to_string(), n);
        }

        Self {
            input_tokens,
            output_tokens,
            total_tokens,
            input_token_details,
            output_token_details,
        }
    }
}
