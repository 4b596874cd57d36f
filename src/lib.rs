//! Imaging Flow - Rust Backend Library
//!
//! Backend for an interactive medical-imaging workflow diagram: a mock
//! computer-vision stage produces an analysis, and a remote text-generation
//! endpoint drafts a report from it.
//! It includes:
//! - Command handlers for a front end
//! - The pipeline session state and report generation client
//! - JSON config storage
//! - Data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{
    // Pipeline commands
    get_session, get_stage_nodes, request_report, run_analysis, submit_analysis,
    // Viewer commands
    close_viewer, get_viewer, open_viewer,
    // Settings commands
    get_settings, update_settings,
    // Health commands
    get_health,
};
pub use imaging_flow_core::{
    AnalysisArtifact, DraftReport, GenerationRequestState, ReportStatus, Session,
    REPORT_FAILURE_TEXT,
};
// Re-export models (avoiding settings module conflict)
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate, SettingsView};
pub use services::{GenerationOutcome, PipelineState, ReportGenerationClient, RetryPolicy};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
