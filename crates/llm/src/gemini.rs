//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's `generateContent` API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::build_http_client;
use super::provider::{parse_http_error, LlmProvider};
use super::types::{LlmError, LlmResult, ProviderConfig};

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(&config)?;
        Ok(Self { config, client })
    }

    /// Get the configuration for this provider.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn generate_url(&self) -> String {
        format!("{}:generateContent", self.model_url())
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    /// Build the request body for the API
    fn build_request_body(system: &str, user_text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: user_text.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
        }
    }

    /// Pull the first candidate's first text part out of a response body
    fn parse_response(body: &str) -> LlmResult<String> {
        let response: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {}", e)))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| LlmError::malformed("Invalid response structure from Gemini API."))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(&self, system: &str, user_text: &str) -> LlmResult<String> {
        let body = Self::build_request_body(system, user_text);
        tracing::debug!(
            model = %self.config.model,
            payload_len = user_text.len(),
            "sending generateContent request"
        );

        let response = self
            .with_key(self.client.post(self.generate_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "generateContent returned an error status");
            return Err(parse_http_error(status.as_u16(), &body_text));
        }

        Self::parse_response(&body_text)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let response = self
            .with_key(self.client.get(self.model_url()))
            .send()
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status.as_u16(), &body))
        }
    }
}

/// Gemini request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Gemini response format; every level is optional so shape problems surface
/// as `MalformedResponse` rather than parse panics.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
