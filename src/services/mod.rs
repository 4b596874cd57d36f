//! Business Logic Services
//!
//! The analysis source, the report generation client and the pipeline state
//! that ties them to the session.

pub mod analysis;
pub mod pipeline;
pub mod report;

pub use analysis::{AnalysisSource, MockCvWorker, ScanAnalysis};
pub use pipeline::{PipelineState, ReportSettlement};
pub use report::{GenerationOutcome, ReportGenerationClient, RetryPolicy};
