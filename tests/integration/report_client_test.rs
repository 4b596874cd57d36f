//! Report Client Integration Tests
//!
//! Retry budget and backoff timing of the report generation client, measured
//! on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use imaging_flow::services::{ReportGenerationClient, RetryPolicy};
use imaging_flow::{ReportStatus, REPORT_FAILURE_TEXT};
use imaging_flow_core::GenerationErrorKind;
use imaging_flow_llm::LlmError;

use crate::common::ScriptedProvider;

#[tokio::test(start_paused = true)]
async fn test_sustained_failure_uses_three_attempts() {
    let provider = ScriptedProvider::failing(LlmError::network("connection refused"));
    let client = ReportGenerationClient::new(provider.clone());

    let started = tokio::time::Instant::now();
    let outcome = client.generate("{}").await;
    let elapsed = started.elapsed();

    assert_eq!(provider.calls(), 3);
    assert!(!outcome.is_success());
    assert_eq!(outcome.display_text(), REPORT_FAILURE_TEXT);
    assert!(elapsed >= Duration::from_millis(3000));
    assert!(elapsed < Duration::from_millis(3010));

    let times = provider.call_times();
    let gaps: Vec<Duration> = times.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(gaps.len(), 2);
    assert!(gaps[0] >= Duration::from_millis(1000) && gaps[0] < Duration::from_millis(1005));
    assert!(gaps[1] >= Duration::from_millis(2000) && gaps[1] < Duration::from_millis(2005));
}

#[tokio::test(start_paused = true)]
async fn test_all_failure_kinds_retry_alike() {
    let provider = ScriptedProvider::new(vec![
        Err(LlmError::network("reset")),
        Err(LlmError::HttpStatus {
            status: 400,
            body: "bad request".to_string(),
        }),
        Err(LlmError::malformed("missing text")),
    ]);
    let client = ReportGenerationClient::new(provider.clone());

    let outcome = client.generate("{}").await;

    assert_eq!(provider.calls(), 3);
    let kinds: Vec<_> = outcome.attempts.iter().map(|a| a.error_kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some(GenerationErrorKind::Network),
            Some(GenerationErrorKind::HttpStatus),
            Some(GenerationErrorKind::MalformedResponse),
        ]
    );
    assert_eq!(
        outcome.to_draft_report().status,
        ReportStatus::Failed {
            kind: GenerationErrorKind::MalformedResponse
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_first_attempt_success_returns_text_unchanged() {
    let text = "Findings:\n- Mild cardiomegaly.\n\nImpression:\n  Stable.  ";
    let provider = ScriptedProvider::new(vec![Ok(text.to_string())]);
    let client = ReportGenerationClient::new(provider.clone());

    let started = tokio::time::Instant::now();
    let outcome = client.generate("{}").await;

    assert_eq!(outcome.result.as_deref(), Ok(text));
    assert_eq!(outcome.attempt_count(), 1);
    assert_eq!(outcome.backoff_count(), 0);
    assert_eq!(provider.calls(), 1);
    assert!(started.elapsed() < Duration::from_millis(1));
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy() {
    let provider = ScriptedProvider::new(vec![
        Err(LlmError::network("a")),
        Err(LlmError::network("b")),
        Err(LlmError::network("c")),
        Ok("late".to_string()),
    ]);
    let client = ReportGenerationClient::new(provider.clone()).with_policy(RetryPolicy {
        max_attempts: 4,
        initial_delay_ms: 100,
        backoff_factor: 3,
    });

    let outcome = client.generate("{}").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.total_backoff_ms(), 100 + 300 + 900);
    assert_eq!(provider.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_generate_text_collapses_to_sentinel() {
    let provider = ScriptedProvider::failing(LlmError::network("down"));
    let client = Arc::new(ReportGenerationClient::new(provider));
    assert_eq!(client.generate_text("{}").await, REPORT_FAILURE_TEXT);
}
