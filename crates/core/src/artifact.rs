//! Analysis Artifact
//!
//! The structured output attributed to the computer-vision stage. The pipeline
//! never looks inside it: it is stored, replaced wholesale, and rendered to text
//! for the report generator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Opaque, serializable analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisArtifact(Value);

impl AnalysisArtifact {
    /// Wrap an arbitrary JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse an artifact from JSON text (e.g. an uploaded analysis result).
    ///
    /// A bare `null` is rejected since it would be indistinguishable from
    /// "no analysis".
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        if value.is_null() {
            return Err(CoreError::validation("analysis artifact cannot be null"));
        }
        Ok(Self(value))
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Pretty-printed JSON (2-space indent), the form sent to the generator
    /// and shown in the viewer.
    pub fn to_payload_text(&self) -> String {
        format!("{:#}", self.0)
    }
}

impl From<Value> for AnalysisArtifact {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
