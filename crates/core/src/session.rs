//! Session Tuple
//!
//! `(artifact, report, request state)` plus the generation counter used to
//! recognise stale report results. Lives only in memory; a fresh process starts
//! from `Session::default()`.

use serde::{Deserialize, Serialize};

use crate::artifact::AnalysisArtifact;
use crate::report::DraftReport;

/// Whether a report-generation request is outstanding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationRequestState {
    #[default]
    Idle,
    InFlight,
}

impl std::fmt::Display for GenerationRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationRequestState::Idle => write!(f, "idle"),
            GenerationRequestState::InFlight => write!(f, "in_flight"),
        }
    }
}

/// Complete in-memory state of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub artifact: Option<AnalysisArtifact>,
    pub report: Option<DraftReport>,
    pub request_state: GenerationRequestState,
    /// Bumped by every new analysis; report results carry the value they
    /// were requested under.
    pub generation: u64,
}

/// Flags-only view of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub has_artifact: bool,
    pub has_report: bool,
    pub in_flight: bool,
}

impl Session {
    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.request_state == GenerationRequestState::InFlight
    }

    /// A report may be requested only with an artifact and nothing in flight
    pub fn can_request_report(&self) -> bool {
        self.has_artifact() && !self.is_in_flight()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            has_artifact: self.has_artifact(),
            has_report: self.has_report(),
            in_flight: self.is_in_flight(),
        }
    }
}
