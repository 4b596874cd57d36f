//! LLM Types
//!
//! Provider configuration and the error taxonomy for generation calls.

use imaging_flow_core::GenerationErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Gemini API base (version path included)
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Configuration for a text-generation provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// API key; sent as the `key` query parameter when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// A failed generation attempt.
///
/// All three variants are treated the same by the retry loop.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmError {
    /// Connection or transport failure
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Non-success HTTP status
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, body: String },

    /// Response without an extractable text part
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

impl LlmError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError {
            message: msg.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
        }
    }

    /// The serializable kind recorded on failed reports
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            LlmError::NetworkError { .. } => GenerationErrorKind::Network,
            LlmError::HttpStatus { .. } => GenerationErrorKind::HttpStatus,
            LlmError::MalformedResponse { .. } => GenerationErrorKind::MalformedResponse,
        }
    }
}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
