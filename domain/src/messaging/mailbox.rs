//! Per-agent FIFO mailbox
//!
//! Each agent owns exactly one [`Mailbox`]. Insertion order is delivery
//! order; there is no priority and no reordering. Draining is destructive:
//! [`Mailbox::take_all`] removes every message queued at the instant of the
//! call, so messages appended while those are being handled are left for
//! the next scheduler round.

use super::message::Message;
use std::collections::VecDeque;

/// Ordered queue of undelivered messages owned by one agent
///
/// Unbounded; the workflow driver's round cap is the safety valve
/// against a handler that re-broadcasts forever.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: VecDeque<Message>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the back of the queue.
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Remove and return every queued message, in FIFO order.
    ///
    /// The mailbox is empty immediately after this call; messages pushed
    /// during handling of the returned batch are not part of it.
    pub fn take_all(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.queue).into()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
