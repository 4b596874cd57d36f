//! LLM Provider Trait
//!
//! Common interface for text-generation backends. The report client only
//! talks to this trait, so tests can substitute a scripted provider.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult};

/// Trait that all text-generation providers implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Run one generation call.
    ///
    /// # Arguments
    /// * `system` - System instruction
    /// * `user_text` - User content
    ///
    /// # Returns
    /// The first generated text fragment
    async fn generate_content(&self, system: &str, user_text: &str) -> LlmResult<String>;

    /// Check if the provider is reachable.
    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }
}

/// Build an `HttpStatus` error, truncating long bodies for logs
pub fn parse_http_error(status: u16, body: &str) -> LlmError {
    const MAX_BODY: usize = 512;
    let body = if body.len() > MAX_BODY {
        let mut end = MAX_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    };
    LlmError::HttpStatus { status, body }
}
