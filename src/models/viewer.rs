//! Viewer Models
//!
//! State of the passive text viewer and the stored texts it can show.

use imaging_flow_core::Session;
use serde::{Deserialize, Serialize};

/// Stored text that can be shown in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTarget {
    AnalysisResults,
    DraftReport,
}

impl ViewTarget {
    pub fn title(&self) -> &'static str {
        match self {
            ViewTarget::AnalysisResults => "AI Results (Mock Data)",
            ViewTarget::DraftReport => "Gemini-Generated Report",
        }
    }

    /// Text for this target in `session`, if there is any
    pub fn content(&self, session: &Session) -> Option<String> {
        match self {
            ViewTarget::AnalysisResults => session.artifact.as_ref().map(|a| a.to_payload_text()),
            ViewTarget::DraftReport => session.report.as_ref().map(|r| r.text.clone()),
        }
    }
}

impl std::str::FromStr for ViewTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analysis_results" => Ok(ViewTarget::AnalysisResults),
            "draft_report" => Ok(ViewTarget::DraftReport),
            other => Err(format!("Unknown view target: {}", other)),
        }
    }
}

/// What the viewer currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerPanel {
    pub open: bool,
    pub title: String,
    pub content: String,
}

impl ViewerPanel {
    /// Show `content` under `title`. Empty content leaves the panel as is.
    pub fn open(&mut self, title: impl Into<String>, content: impl Into<String>) -> bool {
        let content = content.into();
        if content.is_empty() {
            return false;
        }
        self.title = title.into();
        self.content = content;
        self.open = true;
        true
    }

    /// Show the stored text for `target`; no-op when the session has none.
    pub fn open_target(&mut self, target: ViewTarget, session: &Session) -> bool {
        match target.content(session) {
            Some(content) => self.open(target.title(), content),
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
