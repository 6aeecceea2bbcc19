//! Messaging primitives: envelopes and mailboxes

pub mod mailbox;
pub mod message;

pub use mailbox::Mailbox;
pub use message::{AgentId, Message, Payload, Protocol, FIX_CODE, PROVIDE_FEEDBACK, REVIEW_CODE};
