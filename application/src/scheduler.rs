//! Registry and round scheduler
//!
//! The [`Scheduler`] owns every agent, resolves identities for routing,
//! and drives the drain loop. It is breadth-first: one pass hands each
//! agent, in registration order, exactly the messages that were in its
//! mailbox when its turn began, so every agent reacts to round N before
//! anyone processes messages generated in round N+1.
//!
//! Delivery is fire-and-forget: the sender identity is stamped here (never
//! by the handler), both hops are recorded on the transcript, and a send
//! to an unregistered identity is logged and dropped, never fatal.

use crate::agents::{Agent, Outbound};
use crate::ports::transcript::{TranscriptEvent, TranscriptSink};
use conclave_domain::{AgentId, Message};
use std::sync::Arc;
use tracing::{trace, warn};

pub struct Scheduler {
    agents: Vec<Box<dyn Agent>>,
    transcript: Arc<dyn TranscriptSink>,
}

impl Scheduler {
    pub fn new(transcript: Arc<dyn TranscriptSink>) -> Self {
        Self {
            agents: Vec::new(),
            transcript,
        }
    }

    /// Register an agent. Registration order is scheduling order.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        self.agents.push(agent);
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: &AgentId) -> Option<usize> {
        self.agents.iter().position(|agent| agent.id() == id)
    }

    /// Whether any registered agent has undelivered messages.
    pub fn has_pending(&self) -> bool {
        self.agents.iter().any(|agent| !agent.mailbox().is_empty())
    }

    /// Seed a message directly into a recipient's mailbox, keeping the
    /// message's pre-set sender (the workflow driver's "System" identity).
    pub fn inject(&mut self, recipient: &AgentId, message: Message) -> bool {
        let Some(index) = self.index_of(recipient) else {
            warn!(recipient = %recipient, "Cannot seed message: recipient not registered");
            return false;
        };
        self.transcript.record(TranscriptEvent::Receive {
            by: recipient.clone(),
            from: message.sender.clone(),
            protocol: message.protocol,
            action: message.action.clone(),
            summary: message.payload.summary(),
        });
        self.agents[index].mailbox_mut().push(message);
        true
    }

    /// Stamp, log, and deliver one outbound message.
    fn deliver(&mut self, sender: &AgentId, outbound: Outbound) {
        let Outbound { recipient, message } = outbound;
        let message = message.stamped(sender.clone());

        self.transcript.record(TranscriptEvent::Send {
            from: sender.clone(),
            to: recipient.clone(),
            protocol: message.protocol,
            action: message.action.clone(),
            summary: message.payload.summary(),
        });

        match self.index_of(&recipient) {
            Some(index) => {
                self.transcript.record(TranscriptEvent::Receive {
                    by: recipient,
                    from: sender.clone(),
                    protocol: message.protocol,
                    action: message.action.clone(),
                    summary: message.payload.summary(),
                });
                self.agents[index].mailbox_mut().push(message);
            }
            None => {
                // Routing miss: dropped, logged, never fatal.
                warn!(sender = %sender, recipient = %recipient, "Recipient not registered; dropping message");
                self.transcript.record(TranscriptEvent::Note(format!(
                    "DROPPED | {sender} -> {recipient}: recipient not registered"
                )));
            }
        }
    }

    /// One full pass: every agent, in registration order, handles the
    /// messages queued at the instant its turn begins.
    async fn pass(&mut self) {
        for index in 0..self.agents.len() {
            let batch = self.agents[index].mailbox_mut().take_all();
            for message in batch {
                let sender = self.agents[index].id().clone();
                trace!(agent = %sender, action = %message.action, "Handling message");
                let outbounds = self.agents[index].handle(message).await;
                for outbound in outbounds {
                    self.deliver(&sender, outbound);
                }
            }
        }
    }

    /// Drain all mailboxes until quiescence.
    pub async fn drain_all(&mut self) {
        while self.has_pending() {
            self.pass().await;
        }
    }

    /// Drain until quiescence or until `stop` reports true at a pass
    /// boundary. The workflow driver uses this to cut the drive at the
    /// consensus decision, so a never-approving reviewer set cannot spin
    /// the submit/fix cycle forever inside one drive.
    pub async fn drain_until(&mut self, stop: impl Fn() -> bool) {
        while self.has_pending() && !stop() {
            self.pass().await;
        }
    }
}
