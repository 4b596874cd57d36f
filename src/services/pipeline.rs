//! Pipeline State
//!
//! Single owner of the session tuple. All mutations go through the operations
//! here; the presentation layer only reads snapshots or subscribes to changes.
//!
//! Invariants:
//! - at most one report request is in flight per session
//! - a new analysis always clears the draft report
//! - a report result is stored only if no newer analysis arrived meanwhile

use std::sync::Arc;

use imaging_flow_core::{AnalysisArtifact, GenerationRequestState, Session};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::analysis::AnalysisSource;
use super::report::{GenerationOutcome, ReportGenerationClient};

/// An accepted report request, captured at acceptance time
#[derive(Debug, Clone)]
struct ReportTicket {
    request_id: Uuid,
    generation: u64,
    payload: String,
}

/// What happened to a settled report request
#[derive(Debug, Clone, Serialize)]
pub struct ReportSettlement {
    pub request_id: Uuid,
    /// Session generation the request was issued against
    pub generation: u64,
    /// False when a newer analysis made the result stale
    pub applied: bool,
    pub outcome: GenerationOutcome,
}

/// Session container shared by commands and background report tasks
#[derive(Clone)]
pub struct PipelineState {
    session: Arc<watch::Sender<Session>>,
    client: Arc<ReportGenerationClient>,
    source: Arc<dyn AnalysisSource>,
}

impl PipelineState {
    /// Create a state with an empty session
    pub fn new(client: Arc<ReportGenerationClient>, source: Arc<dyn AnalysisSource>) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            session: Arc::new(session),
            client,
            source,
        }
    }

    /// Snapshot of the current session. Never waits on a report request.
    pub fn read_session(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn client(&self) -> &ReportGenerationClient {
        &self.client
    }

    /// Run the analysis source and make its artifact current.
    ///
    /// Returns the new session generation.
    pub fn run_analysis(&self) -> u64 {
        let artifact = self.source.analyze();
        self.run_analysis_with(artifact)
    }

    /// Make `artifact` the current analysis and clear any draft report.
    ///
    /// An in-flight report request keeps running; its result will be
    /// discarded when it settles.
    pub fn run_analysis_with(&self, artifact: AnalysisArtifact) -> u64 {
        let mut generation = 0;
        let mut in_flight = false;
        self.session.send_modify(|session| {
            session.generation = session.generation.wrapping_add(1);
            session.artifact = Some(artifact);
            session.report = None;
            generation = session.generation;
            in_flight = session.is_in_flight();
        });

        if in_flight {
            info!(
                generation,
                "analysis replaced while a report is in flight; its result will be discarded"
            );
        } else {
            debug!(generation, "analysis artifact updated");
        }
        generation
    }

    /// Check the preconditions and mark the session in flight.
    ///
    /// Returns `None` (and changes nothing) without an artifact or while a
    /// request is already in flight.
    fn try_begin_report(&self) -> Option<ReportTicket> {
        let mut ticket = None;
        self.session.send_if_modified(|session| {
            if session.is_in_flight() {
                return false;
            }
            let Some(artifact) = session.artifact.as_ref() else {
                return false;
            };

            ticket = Some(ReportTicket {
                request_id: Uuid::new_v4(),
                generation: session.generation,
                payload: artifact.to_payload_text(),
            });
            session.request_state = GenerationRequestState::InFlight;
            session.report = None;
            true
        });

        match &ticket {
            Some(t) => info!(
                request_id = %t.request_id,
                generation = t.generation,
                "report request accepted"
            ),
            None => debug!("report request ignored: no analysis or a request is already in flight"),
        }
        ticket
    }

    /// Store the outcome if the ticket is still current; always return to idle.
    fn settle(&self, ticket: ReportTicket, outcome: GenerationOutcome) -> ReportSettlement {
        let mut applied = false;
        self.session.send_modify(|session| {
            session.request_state = GenerationRequestState::Idle;
            if session.generation == ticket.generation {
                session.report = Some(outcome.to_draft_report());
                applied = true;
            }
        });

        if applied {
            info!(
                request_id = %ticket.request_id,
                generation = ticket.generation,
                success = outcome.is_success(),
                "draft report stored"
            );
        } else {
            info!(
                request_id = %ticket.request_id,
                generation = ticket.generation,
                "discarding stale draft report"
            );
        }

        ReportSettlement {
            request_id: ticket.request_id,
            generation: ticket.generation,
            applied,
            outcome,
        }
    }

    async fn execute(self, ticket: ReportTicket) -> ReportSettlement {
        let outcome = self.client.generate(&ticket.payload).await;
        self.settle(ticket, outcome)
    }

    /// Request a draft report for the current analysis.
    ///
    /// The precondition check and the switch to in-flight happen before this
    /// returns; generation then runs on a spawned task. Returns `None` when
    /// the request was ignored. Must be called from within a Tokio runtime.
    pub fn request_report(&self) -> Option<JoinHandle<ReportSettlement>> {
        let ticket = self.try_begin_report()?;
        Some(tokio::spawn(self.clone().execute(ticket)))
    }

    /// Same as `request_report` but waits for the settlement.
    ///
    /// Generation still runs on its own task, so dropping this future (a
    /// timeout, a lost `select!` branch) leaves the request to settle on its
    /// own instead of pinning the session in flight.
    pub async fn generate_report(&self) -> Option<ReportSettlement> {
        let handle = self.request_report()?;
        match handle.await {
            Ok(settlement) => Some(settlement),
            Err(e) => {
                error!(error = %e, "report task did not complete");
                self.session.send_if_modified(|session| {
                    let was_in_flight = session.is_in_flight();
                    session.request_state = GenerationRequestState::Idle;
                    was_in_flight
                });
                None
            }
        }
    }
}
