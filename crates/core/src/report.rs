//! Draft Report
//!
//! Output of a settled report-generation request. Failed generations still
//! produce a report so existing displays keep working, but the status tells
//! the two apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display text stored when every generation attempt failed.
pub const REPORT_FAILURE_TEXT: &str = "Error: Could not generate report. Please try again.";

/// Why a generation attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    /// Connection, DNS, TLS or body read failure
    Network,
    /// Endpoint answered with a non-success status
    HttpStatus,
    /// Response had no extractable text
    MalformedResponse,
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::Network => write!(f, "network"),
            GenerationErrorKind::HttpStatus => write!(f, "http_status"),
            GenerationErrorKind::MalformedResponse => write!(f, "malformed_response"),
        }
    }
}

/// Whether the report text came from the generator or is the failure notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    Generated,
    Failed { kind: GenerationErrorKind },
}

/// A draft report attached to the current analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftReport {
    pub text: String,
    pub status: ReportStatus,
    pub generated_at: DateTime<Utc>,
}

impl DraftReport {
    /// Report holding generated text
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: ReportStatus::Generated,
            generated_at: Utc::now(),
        }
    }

    /// Report holding the fixed failure notice
    pub fn failed(kind: GenerationErrorKind) -> Self {
        Self {
            text: REPORT_FAILURE_TEXT.to_string(),
            status: ReportStatus::Failed { kind },
            generated_at: Utc::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, ReportStatus::Failed { .. })
    }
}
