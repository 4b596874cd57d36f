//! Pipeline Session Integration Tests
//!
//! Verifies the session state machine:
//! - report requests need an analysis and are single-flight
//! - a new analysis clears the draft report
//! - late results from a superseded analysis are dropped
//! - retries end with the session idle and the report stored

use std::time::Duration;

use imaging_flow::{GenerationRequestState, ReportStatus, REPORT_FAILURE_TEXT};
use imaging_flow_llm::LlmError;

use crate::common::{cxr_artifact, pipeline_with, ScriptedProvider};

#[tokio::test(start_paused = true)]
async fn test_request_without_analysis_does_nothing() {
    let provider = ScriptedProvider::new(vec![Ok("report".to_string())]);
    let pipeline = pipeline_with(provider.clone());

    assert!(pipeline.request_report().is_none());
    tokio::time::sleep(Duration::from_secs(5)).await;

    let session = pipeline.read_session();
    assert_eq!(session.request_state, GenerationRequestState::Idle);
    assert!(session.report.is_none());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_only_one_request_in_flight() {
    let provider =
        ScriptedProvider::with_latency(vec![Ok("report".to_string())], Duration::from_secs(1));
    let pipeline = pipeline_with(provider.clone());
    pipeline.run_analysis();

    let handle = pipeline.request_report().expect("first request accepted");
    for _ in 0..5 {
        assert!(pipeline.request_report().is_none());
    }
    assert!(pipeline.generate_report().await.is_none());

    handle.await.unwrap();
    assert_eq!(provider.calls(), 1);
    assert_eq!(pipeline.read_session().report.unwrap().text, "report");
}

#[tokio::test(start_paused = true)]
async fn test_run_analysis_always_clears_report() {
    let provider = ScriptedProvider::new(vec![
        Ok("first".to_string()),
        Err(LlmError::network("down")),
        Err(LlmError::network("down")),
        Err(LlmError::network("down")),
    ]);
    let pipeline = pipeline_with(provider);

    // empty session
    pipeline.run_analysis();
    assert!(pipeline.read_session().report.is_none());

    // after a successful report
    pipeline.generate_report().await.unwrap();
    assert!(pipeline.read_session().has_report());
    pipeline.run_analysis();
    assert!(pipeline.read_session().report.is_none());

    // after a failure report
    pipeline.generate_report().await.unwrap();
    assert_eq!(pipeline.read_session().report.unwrap().text, REPORT_FAILURE_TEXT);
    pipeline.run_analysis();
    assert!(pipeline.read_session().report.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_run_analysis_then_read_session() {
    let provider = ScriptedProvider::new(vec![]);
    let pipeline = pipeline_with(provider);

    pipeline.run_analysis();
    let session = pipeline.read_session();

    assert_eq!(session.artifact, Some(cxr_artifact()));
    assert!(session.report.is_none());
    assert_eq!(session.request_state, GenerationRequestState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_fail_twice_then_succeed() {
    let text = "Findings: ... Impression: ...";
    let provider = ScriptedProvider::new(vec![
        Err(LlmError::HttpStatus {
            status: 503,
            body: "unavailable".to_string(),
        }),
        Err(LlmError::malformed("no candidates")),
        Ok(text.to_string()),
    ]);
    let pipeline = pipeline_with(provider.clone());
    pipeline.run_analysis();

    let settlement = pipeline.request_report().unwrap().await.unwrap();

    assert!(settlement.applied);
    assert_eq!(settlement.outcome.backoff_count(), 2);
    assert_eq!(settlement.outcome.total_backoff_ms(), 3000);
    assert_eq!(provider.calls(), 3);

    let session = pipeline.read_session();
    assert_eq!(session.request_state, GenerationRequestState::Idle);
    let report = session.report.unwrap();
    assert_eq!(report.text, text);
    assert_eq!(report.status, ReportStatus::Generated);
}

#[tokio::test(start_paused = true)]
async fn test_payload_is_pretty_artifact_json() {
    let provider = ScriptedProvider::new(vec![Ok("ok".to_string())]);
    let pipeline = pipeline_with(provider.clone());
    pipeline.run_analysis();
    pipeline.generate_report().await.unwrap();

    let sent = provider.user_texts();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        format!("AI Analysis Results: {}", cxr_artifact().to_payload_text())
    );
}

#[tokio::test(start_paused = true)]
async fn test_result_for_superseded_analysis_is_dropped() {
    let provider =
        ScriptedProvider::with_latency(vec![Ok("stale".to_string())], Duration::from_millis(500));
    let pipeline = pipeline_with(provider);
    pipeline.run_analysis();
    let handle = pipeline.request_report().unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    pipeline.run_analysis();

    let settlement = handle.await.unwrap();
    assert!(!settlement.applied);
    assert!(settlement.outcome.is_success());

    let session = pipeline.read_session();
    assert!(session.report.is_none());
    assert_eq!(session.request_state, GenerationRequestState::Idle);
    assert!(session.can_request_report());
}

#[tokio::test(start_paused = true)]
async fn test_read_session_during_flight() {
    let provider =
        ScriptedProvider::with_latency(vec![Ok("report".to_string())], Duration::from_secs(2));
    let pipeline = pipeline_with(provider);
    pipeline.run_analysis();
    let handle = pipeline.request_report().unwrap();

    let session = pipeline.read_session();
    assert!(session.is_in_flight());
    assert!(session.report.is_none());
    assert!(!session.can_request_report());

    handle.await.unwrap();
    assert!(!pipeline.read_session().is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_observes_in_flight_and_settled() {
    let provider =
        ScriptedProvider::with_latency(vec![Ok("report".to_string())], Duration::from_secs(1));
    let pipeline = pipeline_with(provider);
    let mut rx = pipeline.subscribe();
    pipeline.run_analysis();
    let _ = rx.borrow_and_update();

    let handle = pipeline.request_report().unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_in_flight());

    handle.await.unwrap();
    rx.changed().await.unwrap();
    let session = rx.borrow_and_update().clone();
    assert!(!session.is_in_flight());
    assert_eq!(session.report.unwrap().text, "report");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_wait_does_not_pin_in_flight() {
    let provider = ScriptedProvider::with_latency(
        vec![Ok("late report".to_string()), Ok("second".to_string())],
        Duration::from_secs(1),
    );
    let pipeline = pipeline_with(provider.clone());
    pipeline.run_analysis();

    let waited = tokio::time::timeout(Duration::from_millis(100), pipeline.generate_report()).await;
    assert!(waited.is_err());

    tokio::time::sleep(Duration::from_secs(600)).await;
    let session = pipeline.read_session();
    assert_eq!(session.request_state, GenerationRequestState::Idle);
    assert_eq!(session.report.unwrap().text, "late report");

    let settlement = pipeline.generate_report().await.expect("new request accepted");
    assert!(settlement.applied);
    assert_eq!(provider.calls(), 2);
}
