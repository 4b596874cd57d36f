// Imaging Flow - headless entry point
//
// Runs the reference scenario against the configured endpoint: analyse the
// scan, draft a report, and print what the viewer would show.

use imaging_flow::commands;
use imaging_flow::models::viewer::ViewTarget;
use imaging_flow::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("imaging_flow=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::initialize()?;

    commands::run_analysis(&state).await.map_err(anyhow::Error::msg)?;
    print_viewer(&state, ViewTarget::AnalysisResults).await?;

    let Some(settlement) = state.pipeline().generate_report().await else {
        anyhow::bail!("report request was not accepted");
    };
    tracing::info!(
        success = settlement.outcome.is_success(),
        attempts = settlement.outcome.attempt_count(),
        total_backoff_ms = settlement.outcome.total_backoff_ms(),
        session = ?state.pipeline().read_session().summary(),
        "report request settled"
    );

    print_viewer(&state, ViewTarget::DraftReport).await?;
    Ok(())
}

async fn print_viewer(state: &AppState, target: ViewTarget) -> anyhow::Result<()> {
    let response = commands::open_viewer(state, target)
        .await
        .map_err(anyhow::Error::msg)?;
    if let Some(panel) = response.data.filter(|p| p.open) {
        println!("== {} ==\n{}\n", panel.title, panel.content);
    }
    commands::close_viewer(state).await.map_err(anyhow::Error::msg)?;
    Ok(())
}
