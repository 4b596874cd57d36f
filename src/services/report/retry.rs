//! Retry Policy
//!
//! Fixed attempt budget with exponential backoff. No jitter, no delay cap.

use std::time::Duration;

use imaging_flow_core::GenerationErrorKind;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_attempts`
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// How many times to call the endpoint and how long to wait in between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Wait after the first failed attempt
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Multiplier applied to the wait after each further failure
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: u32,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_backoff_factor() -> u32 {
    2
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

impl RetryPolicy {
    /// Wait before retry number `retry` (0 = wait after the first failure)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = u64::from(self.backoff_factor).saturating_pow(retry);
        Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
    }

    /// All waits a fully failing run goes through, in order
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|retry| self.delay_for_retry(retry))
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }
        if self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(format!(
                "retry.max_attempts must be at most {}",
                MAX_ATTEMPTS_LIMIT
            ));
        }
        if self.backoff_factor == 0 {
            return Err("retry.backoff_factor must be at least 1".to_string());
        }
        Ok(())
    }
}

/// One call to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<GenerationErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wait that followed this attempt, if another attempt came after it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_ms: Option<u64>,
    pub duration_ms: u64,
}

impl AttemptRecord {
    pub fn success(attempt: u32, duration_ms: u64) -> Self {
        Self {
            attempt,
            succeeded: true,
            error_kind: None,
            error: None,
            backoff_ms: None,
            duration_ms,
        }
    }

    pub fn failure(
        attempt: u32,
        kind: GenerationErrorKind,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            attempt,
            succeeded: false,
            error_kind: Some(kind),
            error: Some(error.into()),
            backoff_ms: None,
            duration_ms,
        }
    }
}
