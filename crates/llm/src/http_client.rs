//! HTTP Client Factory
//!
//! Builds the reqwest client shared by providers.

use std::time::Duration;

use crate::types::{LlmError, LlmResult, ProviderConfig};

const USER_AGENT: &str = concat!("imaging-flow/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` honouring the configured request timeout.
pub fn build_http_client(config: &ProviderConfig) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| LlmError::network(format!("failed to build HTTP client: {}", e)))
}
