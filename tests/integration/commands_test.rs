//! Command Integration Tests
//!
//! Drives the command layer the way a front end would: run analysis, request
//! a draft, poll the session, and open the viewer.

use std::time::Duration;

use imaging_flow::commands;
use imaging_flow::models::{StageNode, ViewTarget};
use imaging_flow::storage::ConfigService;
use imaging_flow::{AppConfig, AppState, SettingsUpdate, REPORT_FAILURE_TEXT};
use imaging_flow_llm::LlmError;

use crate::common::{pipeline_with, ScriptedProvider};

fn app_with(provider: std::sync::Arc<ScriptedProvider>) -> AppState {
    AppState::with_pipeline(pipeline_with(provider))
}

async fn wait_until_idle(state: &AppState) {
    let mut rx = state.pipeline().subscribe();
    while rx.borrow_and_update().is_in_flight() {
        rx.changed().await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_flow_through_commands() {
    let provider = ScriptedProvider::with_latency(
        vec![Ok("Findings: effusion. Impression: CHF.".to_string())],
        Duration::from_millis(300),
    );
    let state = app_with(provider);

    let before = commands::request_report(&state).await.unwrap();
    assert!(before.success);
    assert!(!before.data.unwrap().accepted);

    let session = commands::run_analysis(&state).await.unwrap().data.unwrap();
    assert!(session.has_artifact());

    let accepted = commands::request_report(&state).await.unwrap().data.unwrap();
    assert!(accepted.accepted);

    let nodes = commands::get_stage_nodes(&state).await.unwrap().data.unwrap();
    let orchestrator = nodes
        .iter()
        .find(|n| n.node == StageNode::ReportOrchestrator)
        .unwrap();
    assert!(orchestrator.loading);
    assert!(!orchestrator.clickable);

    wait_until_idle(&state).await;

    let session = commands::get_session(&state).await.unwrap().data.unwrap();
    assert_eq!(
        session.report.unwrap().text,
        "Findings: effusion. Impression: CHF."
    );

    let viewer = commands::open_viewer(&state, ViewTarget::DraftReport)
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(viewer.open);
    assert_eq!(viewer.title, "Gemini-Generated Report");

    let viewer = commands::close_viewer(&state).await.unwrap().data.unwrap();
    assert!(!viewer.open);
}

#[tokio::test(start_paused = true)]
async fn test_failure_is_shown_as_text() {
    let state = app_with(ScriptedProvider::failing(LlmError::network("offline")));
    commands::run_analysis(&state).await.unwrap();
    commands::request_report(&state).await.unwrap();
    wait_until_idle(&state).await;

    let viewer = commands::open_viewer(&state, ViewTarget::DraftReport)
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(viewer.content, REPORT_FAILURE_TEXT);

    let session = commands::get_session(&state).await.unwrap().data.unwrap();
    assert!(session.report.unwrap().is_failure());
}

#[tokio::test]
async fn test_open_viewer_without_content_stays_closed() {
    let state = app_with(ScriptedProvider::new(vec![]));
    let viewer = commands::open_viewer(&state, ViewTarget::AnalysisResults)
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(!viewer.open);

    commands::run_analysis(&state).await.unwrap();
    let viewer = commands::open_viewer(&state, ViewTarget::AnalysisResults)
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(viewer.open);
    assert_eq!(viewer.title, "AI Results (Mock Data)");
    assert!(viewer.content.contains("cardiothoracic_ratio"));
}

#[tokio::test]
async fn test_submit_analysis() {
    let state = app_with(ScriptedProvider::new(vec![]));

    let response = commands::submit_analysis(&state, "not json".to_string())
        .await
        .unwrap();
    assert!(!response.success);
    assert!(!commands::get_session(&state)
        .await
        .unwrap()
        .data
        .unwrap()
        .has_artifact());

    let response = commands::submit_analysis(
        &state,
        r#"{"scan_type": "MRI", "patient_id": "P-9"}"#.to_string(),
    )
    .await
    .unwrap();
    assert!(response.success);
    let artifact = response.data.unwrap().artifact.unwrap();
    assert_eq!(artifact.as_value()["scan_type"], "MRI");
    assert_eq!(
        artifact.to_payload_text(),
        "{\n  \"scan_type\": \"MRI\",\n  \"patient_id\": \"P-9\"\n}"
    );
}

#[tokio::test]
async fn test_settings_without_config_file() {
    let state = app_with(ScriptedProvider::new(vec![]));

    let settings = commands::get_settings(&state).await.unwrap();
    assert!(settings.success);
    let view = settings.data.unwrap();
    assert_eq!(view.active.retry.max_attempts, 3);
    assert!(!view.restart_required);

    let updated = commands::update_settings(&state, SettingsUpdate::default())
        .await
        .unwrap();
    assert!(!updated.success);
    assert!(updated.error.is_some());
}

#[tokio::test]
async fn test_health_with_reachable_provider() {
    let state = app_with(ScriptedProvider::new(vec![]));
    let health = commands::get_health(&state).await.unwrap().data.unwrap();
    assert!(health.config);
    assert!(health.provider);
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_settings_hide_api_key_and_report_active_values() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");
    let mut config = AppConfig::default();
    config.generation.api_key = Some("stored-secret".to_string());
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let state = AppState::with_config_service(ConfigService::open(&path).unwrap()).unwrap();

    let response = commands::get_settings(&state).await.unwrap();
    let json = serde_json::to_string(&response).unwrap();
    assert!(!json.contains("stored-secret"));
    let view = response.data.unwrap();
    assert!(view.api_key_configured);
    assert!(view.saved.generation.api_key.is_none());

    let response = commands::update_settings(
        &state,
        SettingsUpdate {
            max_attempts: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let view = response.data.unwrap();
    assert_eq!(view.saved.retry.max_attempts, 5);
    assert_eq!(view.active.retry.max_attempts, 3);
    assert!(view.restart_required);
    assert_eq!(state.pipeline().client().policy().max_attempts, 3);
}
