//! Health Check Commands
//!
//! Commands for checking the health status of backend services.

use chrono::Utc;

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Get the health status of the config and the generation endpoint
pub async fn get_health(state: &AppState) -> Result<CommandResponse<HealthResponse>, String> {
    let mut health = HealthResponse::default();

    health.config = state.is_config_healthy();

    match state.pipeline().client().health_check().await {
        Ok(()) => health.provider = true,
        Err(e) => {
            tracing::warn!(error = %e, "generation endpoint health check failed");
            health.provider_error = Some(e.to_string());
        }
    }

    health.status = if health.config && health.provider {
        "healthy".to_string()
    } else {
        "degraded".to_string()
    };
    health.checked_at = Utc::now();

    Ok(CommandResponse::ok(health))
}
