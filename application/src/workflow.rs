//! Bounded review workflow driver
//!
//! Seeds the producer's mailbox with the initial submission, then drives
//! the scheduler for up to `max_rounds` review rounds. One round runs the
//! drain loop until the coordinator reaches a consensus decision (or the
//! mailboxes quiesce). The driver checks cancellation only between rounds
//! and never raises for a terminal state: approved, exhausted, and
//! interrupted are reported statuses, each carrying the final artifact.

use crate::agents::coordinator::ConsensusSignal;
use crate::agents::producer::ArtifactCell;
use crate::ports::transcript::{TranscriptEvent, TranscriptSink};
use crate::scheduler::Scheduler;
use conclave_domain::{AgentId, Message};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// The round cap the original deployment shipped with.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Producer '{0}' is not registered with the scheduler")]
    ProducerNotRegistered(AgentId),
}

/// Terminal status of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    /// Every required reviewer approved within the round cap.
    Approved,
    /// The round cap was hit without full approval. Not an error.
    Exhausted,
    /// A stop was requested between rounds.
    Interrupted,
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStatus::Approved => write!(f, "approved"),
            WorkflowStatus::Exhausted => write!(f, "stopped without full approval"),
            WorkflowStatus::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Result of a workflow run
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub status: WorkflowStatus,
    /// Review rounds actually driven (at most `max_rounds`)
    pub rounds_run: usize,
    /// The producer's artifact at termination
    pub artifact: String,
}

/// Drives the iterative submit -> review -> fix cycle to a terminal state.
pub struct ReviewWorkflow {
    scheduler: Scheduler,
    producer: AgentId,
    signal: ConsensusSignal,
    artifact: ArtifactCell,
    transcript: Arc<dyn TranscriptSink>,
    max_rounds: usize,
    cancel: CancellationToken,
}

impl ReviewWorkflow {
    pub fn new(
        scheduler: Scheduler,
        producer: AgentId,
        signal: ConsensusSignal,
        artifact: ArtifactCell,
        transcript: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            scheduler,
            producer,
            signal,
            artifact,
            transcript,
            max_rounds: DEFAULT_MAX_ROUNDS,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the workflow to a terminal state.
    ///
    /// The initial submission is seeded with the literal `System` sender,
    /// bypassing the sender-stamping path.
    pub async fn run(mut self) -> Result<WorkflowOutcome, WorkflowError> {
        let seed = self.artifact.get();
        if !self
            .scheduler
            .inject(&self.producer, Message::submit_for_review(seed))
        {
            return Err(WorkflowError::ProducerNotRegistered(self.producer));
        }

        let mut rounds_run = 0;
        let status = loop {
            if rounds_run >= self.max_rounds {
                warn!(rounds = rounds_run, "Round cap reached without full approval");
                break WorkflowStatus::Exhausted;
            }
            // Stop requests are honored at round boundaries only; a round
            // in flight always completes.
            if self.cancel.is_cancelled() {
                info!("Stop requested; ending review cycle");
                break WorkflowStatus::Interrupted;
            }

            rounds_run += 1;
            info!(round = rounds_run, "=== Review round {} ===", rounds_run);
            self.transcript.record(TranscriptEvent::Note(format!(
                "=== Iteration {rounds_run} ==="
            )));

            let signal = self.signal.clone();
            self.scheduler.drain_until(|| signal.take_decided()).await;

            if self.signal.is_approved() {
                info!(round = rounds_run, "All reviewers approve; review cycle complete");
                break WorkflowStatus::Approved;
            }
            if !self.scheduler.has_pending() {
                // Quiesced without a decision and without approval; there
                // is nothing left that could change the outcome.
                warn!("Mailboxes quiesced without consensus");
                break WorkflowStatus::Exhausted;
            }
        };

        let artifact = self.artifact.get();
        self.transcript.record(TranscriptEvent::Note(format!(
            "Review workflow stopped: {status}"
        )));
        Ok(WorkflowOutcome {
            status,
            rounds_run,
            artifact,
        })
    }
}
