//! Viewer Commands

use crate::models::response::CommandResponse;
use crate::models::viewer::{ViewTarget, ViewerPanel};
use crate::state::AppState;

/// Show the stored text for `target`. Leaves the viewer unchanged when there
/// is nothing to show.
pub async fn open_viewer(
    state: &AppState,
    target: ViewTarget,
) -> Result<CommandResponse<ViewerPanel>, String> {
    let session = state.pipeline().read_session();
    let mut viewer = state.viewer().write().await;
    viewer.open_target(target, &session);
    Ok(CommandResponse::ok(viewer.clone()))
}

pub async fn close_viewer(state: &AppState) -> Result<CommandResponse<ViewerPanel>, String> {
    let mut viewer = state.viewer().write().await;
    viewer.close();
    Ok(CommandResponse::ok(viewer.clone()))
}

pub async fn get_viewer(state: &AppState) -> Result<CommandResponse<ViewerPanel>, String> {
    Ok(CommandResponse::ok(state.viewer().read().await.clone()))
}
