//! Application State
//!
//! Shared state handed to every command: settings, the pipeline session and
//! the viewer panel.

use std::sync::Arc;
use tokio::sync::RwLock;

use imaging_flow_llm::GeminiProvider;

use crate::models::settings::{AppConfig, SettingsUpdate, SettingsView};
use crate::models::viewer::ViewerPanel;
use crate::services::analysis::MockCvWorker;
use crate::services::pipeline::PipelineState;
use crate::services::report::ReportGenerationClient;
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Application state shared by all commands
pub struct AppState {
    /// Configuration service; `None` when running from an in-memory config
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Settings the pipeline was built from
    active_config: AppConfig,
    pipeline: PipelineState,
    viewer: Arc<RwLock<ViewerPanel>>,
}

impl AppState {
    /// Load ~/.imaging-flow/config.json and build the pipeline from it
    pub fn initialize() -> AppResult<Self> {
        let service = ConfigService::new()?;
        Self::with_config_service(service)
    }

    /// Build the pipeline from a loaded config file
    pub fn with_config_service(service: ConfigService) -> AppResult<Self> {
        let mut config = service.get_config_clone();
        config.apply_env_overrides();
        let pipeline = build_pipeline(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(Some(service))),
            active_config: config,
            pipeline,
            viewer: Arc::new(RwLock::new(ViewerPanel::default())),
        })
    }

    /// Build the pipeline from an in-memory config (nothing is persisted)
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;
        let pipeline = build_pipeline(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(None)),
            active_config: config,
            pipeline,
            viewer: Arc::new(RwLock::new(ViewerPanel::default())),
        })
    }

    /// Wrap an already built pipeline
    pub fn with_pipeline(pipeline: PipelineState) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            active_config: AppConfig::default(),
            pipeline,
            viewer: Arc::new(RwLock::new(ViewerPanel::default())),
        }
    }

    pub fn pipeline(&self) -> &PipelineState {
        &self.pipeline
    }

    pub fn viewer(&self) -> &RwLock<ViewerPanel> {
        &self.viewer
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        self.active_config.validate().is_ok()
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Ok(self.active_config.clone()),
        }
    }

    /// Settings the running pipeline was built with
    pub fn active_config(&self) -> &AppConfig {
        &self.active_config
    }

    /// Saved and active settings, with API keys removed
    pub async fn settings_view(&self) -> AppResult<SettingsView> {
        let saved = self.get_config().await?;
        Ok(SettingsView::new(&saved, &self.active_config))
    }

    /// Update and persist the configuration.
    ///
    /// The running pipeline keeps the settings it was built with.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => {
                let updated = config.update_config(update)?;
                tracing::info!(path = %config.path().display(), "settings saved; applied on next start");
                Ok(updated)
            }
            None => Err(AppError::config("Config service not initialized")),
        }
    }
}

fn build_pipeline(config: &AppConfig) -> AppResult<PipelineState> {
    if config.generation.api_key.is_none() {
        tracing::warn!("no API key configured; report requests will likely be rejected");
    }
    let provider = GeminiProvider::new(config.generation.clone())?;
    let client = ReportGenerationClient::new(Arc::new(provider)).with_policy(config.retry.clone());
    Ok(PipelineState::new(
        Arc::new(client),
        Arc::new(MockCvWorker::new()),
    ))
}
