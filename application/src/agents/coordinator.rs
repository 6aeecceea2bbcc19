//! Coordinator agent
//!
//! Collects reviewer feedback into a per-round ledger and, once every
//! required reviewer has reported, either latches approval (no further
//! message) or sends the producer a single aggregated fix instruction.
//! The ledger resets at every decision; the [`ConsensusSignal`] is how the
//! decision escapes the mailbox world to the workflow driver.

use super::{Agent, Outbound};
use async_trait::async_trait;
use conclave_domain::{
    AgentId, ConsensusDecision, FeedbackLedger, Mailbox, Message, Payload, Protocol,
    PROVIDE_FEEDBACK,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared consensus latches, observed by the scheduler and the driver.
///
/// `decided` marks a round boundary (set on every decision, taken by the
/// drive loop); `approved` is a sticky latch set only on full approval.
#[derive(Clone, Default)]
pub struct ConsensusSignal {
    decided: Arc<AtomicBool>,
    approved: Arc<AtomicBool>,
}

impl ConsensusSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_rejected(&self) {
        self.decided.store(true, Ordering::SeqCst);
    }

    pub fn mark_approved(&self) {
        self.approved.store(true, Ordering::SeqCst);
        self.decided.store(true, Ordering::SeqCst);
    }

    /// Consume the round-boundary flag.
    pub fn take_decided(&self) -> bool {
        self.decided.swap(false, Ordering::SeqCst)
    }

    pub fn is_approved(&self) -> bool {
        self.approved.load(Ordering::SeqCst)
    }
}

/// The consensus-tracking coordinator.
pub struct Coordinator {
    id: AgentId,
    producer: AgentId,
    ledger: FeedbackLedger,
    signal: ConsensusSignal,
    mailbox: Mailbox,
}

impl Coordinator {
    pub fn new(
        id: AgentId,
        producer: AgentId,
        required_reviewers: Vec<AgentId>,
        signal: ConsensusSignal,
    ) -> Self {
        Self {
            id,
            producer,
            ledger: FeedbackLedger::new(required_reviewers),
            signal,
            mailbox: Mailbox::new(),
        }
    }
}

#[async_trait]
impl Agent for Coordinator {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    fn mailbox_mut(&mut self) -> &mut Mailbox {
        &mut self.mailbox
    }

    async fn handle(&mut self, message: Message) -> Vec<Outbound> {
        if message.protocol != Protocol::ReviewFeedback || message.action != PROVIDE_FEEDBACK {
            return Vec::new();
        }
        let Payload::Feedback(feedback) = message.payload else {
            return Vec::new();
        };

        // The record is attributed inside the payload; fall back to the
        // envelope sender if the reviewer forgot to stamp it.
        let reviewer = feedback.reviewer.clone().unwrap_or(message.sender);
        debug!(coordinator = %self.id, reviewer = %reviewer, "Recording feedback");
        self.ledger.record(reviewer, feedback);

        match self.ledger.decide() {
            None => Vec::new(),
            Some(ConsensusDecision::Approved) => {
                info!(coordinator = %self.id, "All reviewers approve; stopping the review cycle");
                self.signal.mark_approved();
                Vec::new()
            }
            Some(ConsensusDecision::Rejected { comments }) => {
                info!(
                    coordinator = %self.id,
                    comments = comments.len(),
                    "Consensus not reached; instructing producer to fix"
                );
                self.signal.mark_rejected();
                vec![Outbound::to(
                    self.producer.clone(),
                    Message::fix_instruction(comments),
                )]
            }
        }
    }
}
