//! Pipeline Node Models
//!
//! Labels and affordances of the interactive diagram nodes, derived from a
//! session snapshot.

use imaging_flow_core::Session;
use serde::{Deserialize, Serialize};

/// Interactive nodes of the AI systems layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageNode {
    CvWorker,
    AnalysisResults,
    ReportOrchestrator,
    DraftReport,
}

impl StageNode {
    pub const ALL: [StageNode; 4] = [
        StageNode::CvWorker,
        StageNode::AnalysisResults,
        StageNode::ReportOrchestrator,
        StageNode::DraftReport,
    ];
}

/// How a node should be drawn for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub node: StageNode,
    pub label: String,
    pub clickable: bool,
    pub loading: bool,
}

impl NodeView {
    pub fn for_node(node: StageNode, session: &Session) -> Self {
        let (label, clickable, loading) = match node {
            StageNode::CvWorker => ("✨CV Worker\n(Click to Run)", true, false),
            StageNode::AnalysisResults => {
                if session.has_artifact() {
                    ("AI Results\n(Click to View)", true, false)
                } else {
                    ("  AI Results\nDB", false, false)
                }
            }
            StageNode::ReportOrchestrator => (
                "✨LLM Orchestrator\n(Click to Draft)",
                session.can_request_report(),
                session.is_in_flight(),
            ),
            StageNode::DraftReport => {
                if session.has_report() {
                    (" Draft Report\n(Click to View)", true, false)
                } else {
                    ("Draft Report\n(Findings +\nImpression)", false, false)
                }
            }
        };

        Self {
            node,
            label: label.to_string(),
            clickable,
            loading,
        }
    }
}

/// Views for every interactive node, in diagram order
pub fn stage_nodes(session: &Session) -> Vec<NodeView> {
    StageNode::ALL
        .iter()
        .map(|node| NodeView::for_node(*node, session))
        .collect()
}
