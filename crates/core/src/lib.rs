//! Imaging Flow Core
//!
//! Session state types and error types for the imaging-flow workspace. This
//! crate has no dependency on the HTTP stack or the application crate.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `artifact` - Opaque analysis payload (`AnalysisArtifact`)
//! - `report` - Draft report and its outcome status (`DraftReport`, `ReportStatus`)
//! - `session` - The session tuple (`Session`, `GenerationRequestState`)

pub mod artifact;
pub mod error;
pub mod report;
pub mod session;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Session Types ──────────────────────────────────────────────────────
pub use artifact::AnalysisArtifact;
pub use report::{DraftReport, GenerationErrorKind, ReportStatus, REPORT_FAILURE_TEXT};
pub use session::{GenerationRequestState, Session, SessionSummary};
