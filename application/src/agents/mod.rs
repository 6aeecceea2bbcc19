//! Concrete agents and the agent contract
//!
//! An agent is identity + mailbox + one handler. Handlers never reach into
//! a registry: they return [`Outbound`] values and the scheduler performs
//! delivery (sender stamping, transcript logging, missing-recipient
//! drops). This keeps the "sender is set exclusively at send time"
//! invariant in one place and makes every handler a pure
//! message-in/messages-out function over its own state.

pub mod coordinator;
pub mod producer;
pub mod reviewer;

use async_trait::async_trait;
use conclave_domain::{AgentId, Mailbox, Message};

/// A message produced by a handler, awaiting delivery by the scheduler.
///
/// The message still carries its placeholder sender; the scheduler stamps
/// the real sender when it routes the envelope.
#[derive(Debug)]
pub struct Outbound {
    pub recipient: AgentId,
    pub message: Message,
}

impl Outbound {
    pub fn to(recipient: AgentId, message: Message) -> Self {
        Self { recipient, message }
    }
}

/// The agent contract: identity, an owned mailbox, and one handler.
///
/// `handle` may suspend at the completion-gateway boundary; all mailbox
/// and ledger mutation stays synchronous between suspension points.
#[async_trait]
pub trait Agent: Send {
    fn id(&self) -> &AgentId;

    fn mailbox(&self) -> &Mailbox;

    fn mailbox_mut(&mut self) -> &mut Mailbox;

    /// React to one incoming message, returning zero or more sends.
    async fn handle(&mut self, message: Message) -> Vec<Outbound>;
}
