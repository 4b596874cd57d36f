//! Settings Models
//!
//! Application configuration and settings data structures.

use imaging_flow_llm::ProviderConfig;
use serde::{Deserialize, Serialize};

use crate::services::report::RetryPolicy;

/// Environment variable that overrides `generation.api_key`
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Text-generation endpoint
    #[serde(default)]
    pub generation: ProviderConfig,
    /// Retry/backoff for report generation
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Enable debug mode
    #[serde(default)]
    pub debug_mode: bool,
}

/// Settings as reported to a front end. API keys are never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsView {
    /// Saved settings; used from the next start
    pub saved: AppConfig,
    /// Settings the running pipeline was built with
    pub active: AppConfig,
    /// Whether the running pipeline has an API key (file or environment)
    pub api_key_configured: bool,
    /// Saved settings differ from the active ones
    pub restart_required: bool,
}

impl SettingsView {
    pub fn new(saved: &AppConfig, active: &AppConfig) -> Self {
        let saved = saved.redacted();
        let active_redacted = active.redacted();
        Self {
            restart_required: saved != active_redacted,
            api_key_configured: active.generation.api_key.is_some(),
            saved,
            active: active_redacted,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub initial_delay_ms: Option<u64>,
    pub backoff_factor: Option<u32>,
    pub debug_mode: Option<bool>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(base_url) = update.base_url {
            self.generation.base_url = base_url;
        }
        if let Some(model) = update.model {
            self.generation.model = model;
        }
        if let Some(api_key) = update.api_key {
            // an empty key clears the stored one
            self.generation.api_key = if api_key.is_empty() { None } else { Some(api_key) };
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.generation.request_timeout_secs = timeout;
        }
        if let Some(max_attempts) = update.max_attempts {
            self.retry.max_attempts = max_attempts;
        }
        if let Some(delay) = update.initial_delay_ms {
            self.retry.initial_delay_ms = delay;
        }
        if let Some(factor) = update.backoff_factor {
            self.retry.backoff_factor = factor;
        }
        if let Some(debug) = update.debug_mode {
            self.debug_mode = debug;
        }
    }

    /// Copy without the API key
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.generation.api_key = None;
        config
    }

    /// Overlay the API key from the environment, if set and non-empty
    pub fn apply_env_overrides(&mut self) {
        self.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    }

    fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.generation.api_key = Some(key);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.generation.base_url.trim().is_empty() {
            return Err("generation.base_url cannot be empty".to_string());
        }
        if !self.generation.base_url.starts_with("http://")
            && !self.generation.base_url.starts_with("https://")
        {
            return Err(format!(
                "Invalid generation.base_url: {}. Must start with http:// or https://",
                self.generation.base_url
            ));
        }
        if self.generation.model.trim().is_empty() {
            return Err("generation.model cannot be empty".to_string());
        }
        if self.generation.request_timeout_secs == 0 {
            return Err("generation.request_timeout_secs must be at least 1".to_string());
        }

        self.retry.validate()
    }
}
