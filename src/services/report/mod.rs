//! Report Drafting
//!
//! Retry policy, prompt text and the resilient client used to draft reports.

pub mod client;
pub mod prompt;
pub mod retry;

pub use client::{GenerationOutcome, ReportGenerationClient};
pub use prompt::{build_user_content, REPORT_SYSTEM_PROMPT};
pub use retry::{AttemptRecord, RetryPolicy, MAX_ATTEMPTS_LIMIT};
