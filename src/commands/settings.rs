//! Settings Commands
//!
//! Commands for reading and updating application settings. Responses carry
//! both the saved settings and the ones the running pipeline uses; API keys
//! are never returned.

use crate::models::response::CommandResponse;
use crate::models::settings::{SettingsUpdate, SettingsView};
use crate::state::AppState;

/// Get current application settings
pub async fn get_settings(state: &AppState) -> Result<CommandResponse<SettingsView>, String> {
    match state.settings_view().await {
        Ok(view) => Ok(CommandResponse::ok(view)),
        Err(e) => Ok(CommandResponse::err(e.to_string())),
    }
}

/// Update application settings with a partial update
pub async fn update_settings(
    state: &AppState,
    update: SettingsUpdate,
) -> Result<CommandResponse<SettingsView>, String> {
    if let Err(e) = state.update_config(update).await {
        return Ok(CommandResponse::err(e.to_string()));
    }
    match state.settings_view().await {
        Ok(view) => Ok(CommandResponse::ok(view)),
        Err(e) => Ok(CommandResponse::err(e.to_string())),
    }
}
