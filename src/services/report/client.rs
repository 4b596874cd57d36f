//! Report Generation Client
//!
//! Turns a serialized analysis into draft report text through one
//! text-generation provider. Network failures, bad statuses and malformed
//! responses are all retried the same way; once the attempt budget is spent
//! the outcome carries the last error instead of propagating it.

use std::sync::Arc;

use imaging_flow_core::{DraftReport, REPORT_FAILURE_TEXT};
use imaging_flow_llm::{LlmError, LlmProvider, LlmResult};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::prompt::{build_user_content, REPORT_SYSTEM_PROMPT};
use super::retry::{AttemptRecord, RetryPolicy, MAX_ATTEMPTS_LIMIT};

/// Settled result of one `generate` call
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub result: Result<String, LlmError>,
    pub attempts: Vec<AttemptRecord>,
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Number of backoff waits that were taken
    pub fn backoff_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.backoff_ms.is_some())
            .count()
    }

    /// Sum of all backoff waits in milliseconds
    pub fn total_backoff_ms(&self) -> u64 {
        self.attempts.iter().filter_map(|a| a.backoff_ms).sum()
    }

    /// User-facing text: the generated report or the fixed failure notice
    pub fn display_text(&self) -> &str {
        match &self.result {
            Ok(text) => text,
            Err(_) => REPORT_FAILURE_TEXT,
        }
    }

    /// Report to store in the session for this outcome
    pub fn to_draft_report(&self) -> DraftReport {
        match &self.result {
            Ok(text) => DraftReport::generated(text.clone()),
            Err(err) => DraftReport::failed(err.kind()),
        }
    }
}

/// Resilient invoker of the report-generation endpoint. Holds no session state.
pub struct ReportGenerationClient {
    provider: Arc<dyn LlmProvider>,
    policy: RetryPolicy,
}

impl ReportGenerationClient {
    /// Create a client with the default retry policy (3 attempts, 1s then 2s)
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
        }
    }

    /// Set the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Probe the provider without going through the retry loop
    pub async fn health_check(&self) -> LlmResult<()> {
        self.provider.health_check().await
    }

    /// Generate a report for `payload`, retrying with exponential backoff.
    pub async fn generate(&self, payload: &str) -> GenerationOutcome {
        let user_content = build_user_content(payload);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = Vec::with_capacity(max_attempts.min(MAX_ATTEMPTS_LIMIT) as usize);
        let mut last_err: Option<LlmError> = None;

        for attempt in 1..=max_attempts {
            debug!(
                provider = self.provider.name(),
                attempt, max_attempts, "requesting draft report"
            );
            let started = Instant::now();

            match self
                .provider
                .generate_content(REPORT_SYSTEM_PROMPT, &user_content)
                .await
            {
                Ok(text) => {
                    let duration_ms = started.elapsed().as_millis() as u64;
                    info!(attempt, duration_ms, "draft report generated");
                    attempts.push(AttemptRecord::success(attempt, duration_ms));
                    return GenerationOutcome {
                        result: Ok(text),
                        attempts,
                    };
                }
                Err(err) => {
                    let duration_ms = started.elapsed().as_millis() as u64;
                    let mut record =
                        AttemptRecord::failure(attempt, err.kind(), err.to_string(), duration_ms);

                    if attempt < max_attempts {
                        let wait = self.policy.delay_for_retry(attempt - 1);
                        let wait_ms = wait.as_millis() as u64;
                        warn!(
                            attempt,
                            max_attempts,
                            wait_ms,
                            error = %err,
                            "report generation failed, backing off"
                        );
                        record.backoff_ms = Some(wait_ms);
                        attempts.push(record);
                        last_err = Some(err);
                        tokio::time::sleep(wait).await;
                    } else {
                        warn!(attempt, max_attempts, error = %err, "report generation failed");
                        attempts.push(record);
                        last_err = Some(err);
                    }
                }
            }
        }

        error!(
            attempts = attempts.len(),
            "report generation failed after all attempts"
        );
        GenerationOutcome {
            result: Err(last_err.unwrap_or_else(|| LlmError::network("retry attempts exhausted"))),
            attempts,
        }
    }

    /// Generate and collapse the outcome to display text.
    ///
    /// Failure yields `REPORT_FAILURE_TEXT`; prefer `generate` when the caller
    /// needs to tell the two apart.
    pub async fn generate_text(&self, payload: &str) -> String {
        self.generate(payload).await.display_text().to_string()
    }
}
