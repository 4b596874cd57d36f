//! Report prompt text.

/// Fixed system instruction sent with every report request
pub const REPORT_SYSTEM_PROMPT: &str = "You are a helpful medical assistant. Based on the following AI analysis of a medical scan, generate a concise preliminary report with a 'Findings' section and an 'Impression' section.";

/// Prefix for the user content ahead of the serialized analysis
const ANALYSIS_PREFIX: &str = "AI Analysis Results: ";

/// User content for a serialized analysis payload
pub fn build_user_content(payload: &str) -> String {
    format!("{}{}", ANALYSIS_PREFIX, payload)
}
