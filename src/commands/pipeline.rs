//! Pipeline Commands
//!
//! Entry points for the interactive pipeline: run analysis, request a draft
//! report, and read the session.

use imaging_flow_core::{AnalysisArtifact, Session};

use crate::models::pipeline::{stage_nodes, NodeView};
use crate::models::response::{CommandResponse, ReportRequestResponse};
use crate::state::AppState;
use crate::utils::error::AppError;

/// Run the CV worker and make its result the current analysis
pub async fn run_analysis(state: &AppState) -> Result<CommandResponse<Session>, String> {
    state.pipeline().run_analysis();
    Ok(CommandResponse::ok(state.pipeline().read_session()))
}

/// Make an externally produced analysis (JSON text) the current one
pub async fn submit_analysis(
    state: &AppState,
    analysis_json: String,
) -> Result<CommandResponse<Session>, String> {
    match AnalysisArtifact::from_json_str(&analysis_json) {
        Ok(artifact) => {
            state.pipeline().run_analysis_with(artifact);
            Ok(CommandResponse::ok(state.pipeline().read_session()))
        }
        Err(e) => Ok(CommandResponse::err(AppError::from(e).to_string())),
    }
}

/// Start drafting a report in the background.
///
/// `accepted` is false when there is no analysis or a draft is already in
/// progress; the session is then unchanged.
pub async fn request_report(
    state: &AppState,
) -> Result<CommandResponse<ReportRequestResponse>, String> {
    let accepted = state.pipeline().request_report().is_some();
    Ok(CommandResponse::ok(ReportRequestResponse { accepted }))
}

/// Current session snapshot
pub async fn get_session(state: &AppState) -> Result<CommandResponse<Session>, String> {
    Ok(CommandResponse::ok(state.pipeline().read_session()))
}

/// Labels and affordances of the interactive nodes
pub async fn get_stage_nodes(state: &AppState) -> Result<CommandResponse<Vec<NodeView>>, String> {
    let session = state.pipeline().read_session();
    Ok(CommandResponse::ok(stage_nodes(&session)))
}
