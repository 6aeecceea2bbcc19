//! Domain layer for conclave
//!
//! This crate contains the core messaging and review-consensus logic.
//! It has no dependencies on infrastructure or runtime concerns.
//!
//! # Core Concepts
//!
//! ## Messaging
//!
//! Agents exchange immutable [`Message`] envelopes through per-agent
//! FIFO [`Mailbox`]es. A message carries a semantic channel
//! ([`Protocol`]), an action tag, a typed payload, and the sender's
//! identity.
//!
//! ## Review consensus
//!
//! A [`FeedbackLedger`] collects one [`Feedback`] record per required
//! reviewer within a round and decides, once every reviewer has
//! reported, whether the artifact is approved or must go through
//! another fix round.

pub mod error;
pub mod messaging;
pub mod prompt;
pub mod review;

// Re-export commonly used types
pub use error::DomainError;
pub use messaging::{
    AgentId, Mailbox, Message, Payload, Protocol, FIX_CODE, PROVIDE_FEEDBACK, REVIEW_CODE,
};
pub use prompt::{fix_prompt, seed_artifact, ReviewerProfile};
pub use review::{
    approval::is_approving,
    feedback::{Feedback, Severity},
    ledger::{ConsensusDecision, FeedbackLedger},
    parsing::{parse_feedback, strip_code_fence, ParseOutcome},
};
