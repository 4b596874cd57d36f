//! Analysis Source
//!
//! Produces the artifact for a "run analysis" action. The built-in worker
//! returns a fixed chest X-ray result; no image is processed.

use std::collections::BTreeMap;

use imaging_flow_core::AnalysisArtifact;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything that can produce a fresh analysis artifact
pub trait AnalysisSource: Send + Sync {
    fn analyze(&self) -> AnalysisArtifact;
}

/// Typed form of a scan analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanAnalysis {
    pub scan_type: String,
    pub patient_id: String,
    pub findings_ai: Vec<String>,
    pub key_measurements: BTreeMap<String, f64>,
}

impl ScanAnalysis {
    /// The reference chest X-ray result
    pub fn reference_cxr() -> Self {
        Self {
            scan_type: "Chest X-Ray (CXR)".to_string(),
            patient_id: "P-123456".to_string(),
            findings_ai: vec![
                "Mild cardiomegaly noted.".to_string(),
                "Small bilateral pleural effusions, right greater than left.".to_string(),
                "No focal airspace consolidation to suggest pneumonia.".to_string(),
                "Mild degenerative changes in the thoracic spine.".to_string(),
            ],
            key_measurements: BTreeMap::from([("cardiothoracic_ratio".to_string(), 0.58)]),
        }
    }

    pub fn to_artifact(&self) -> AnalysisArtifact {
        let measurements: Map<String, Value> = self
            .key_measurements
            .iter()
            .map(|(name, value)| (name.clone(), Value::from(*value)))
            .collect();

        let mut fields = Map::new();
        fields.insert("scan_type".to_string(), Value::from(self.scan_type.clone()));
        fields.insert("patient_id".to_string(), Value::from(self.patient_id.clone()));
        fields.insert(
            "findings_ai".to_string(),
            Value::from(self.findings_ai.clone()),
        );
        fields.insert("key_measurements".to_string(), Value::Object(measurements));
        AnalysisArtifact::new(Value::Object(fields))
    }
}

/// Simulated computer-vision worker returning a fixed analysis
#[derive(Debug, Clone)]
pub struct MockCvWorker {
    analysis: ScanAnalysis,
}

impl MockCvWorker {
    pub fn new() -> Self {
        Self {
            analysis: ScanAnalysis::reference_cxr(),
        }
    }

    /// Worker that always returns `analysis`
    pub fn with_analysis(analysis: ScanAnalysis) -> Self {
        Self { analysis }
    }
}

impl Default for MockCvWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSource for MockCvWorker {
    fn analyze(&self) -> AnalysisArtifact {
        self.analysis.to_artifact()
    }
}
