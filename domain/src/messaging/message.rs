//! Message envelope types
//!
//! A [`Message`] is the unit of communication between agents: a semantic
//! channel ([`Protocol`]), a free-form action tag scoping the intent, a
//! typed payload, and the sender's identity. Once delivered, a message is
//! never mutated; the recipient's handler consumes it exactly once.

use crate::review::feedback::Feedback;
use serde::{Deserialize, Serialize};

/// Action tag for submitting code to reviewers.
pub const REVIEW_CODE: &str = "review_code";
/// Action tag for reviewer feedback delivered to the coordinator.
pub const PROVIDE_FEEDBACK: &str = "provide_feedback";
/// Action tag for fix instructions delivered to the producer.
pub const FIX_CODE: &str = "fix_code";

/// Stable identity of an agent within the registry (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved identity stamped on driver-seeded messages.
    pub fn system() -> Self {
        Self("System".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Semantic channel of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    /// Code submitted for review (producer -> reviewers)
    SubmitForReview,
    /// Structured feedback (reviewer -> coordinator)
    ReviewFeedback,
    /// Aggregated fix instruction (coordinator -> producer)
    FixInstruction,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::SubmitForReview => write!(f, "SUBMIT_FOR_REVIEW"),
            Protocol::ReviewFeedback => write!(f, "REVIEW_FEEDBACK"),
            Protocol::FixInstruction => write!(f, "FIX_INSTRUCTION"),
        }
    }
}

/// Protocol-specific message payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    /// Artifact text under review
    Code { code: String },
    /// A reviewer's structured feedback record
    Feedback(Feedback),
    /// Concatenated reviewer comments to apply
    FixComments { comments: Vec<String> },
}

impl Payload {
    /// One-line human-readable summary for the transcript.
    pub fn summary(&self) -> String {
        match self {
            Payload::Code { code } => {
                let preview: String = code.chars().take(80).collect();
                format!("code ({} bytes): {}", code.len(), preview.replace('\n', "\\n"))
            }
            Payload::Feedback(feedback) => format!(
                "feedback severity={} comments={}",
                feedback.severity,
                feedback.comments.len()
            ),
            Payload::FixComments { comments } => format!("{} fix comments", comments.len()),
        }
    }
}

/// An immutable message envelope
///
/// The `sender` field is stamped by the routing layer at send time, never
/// by the handler that built the message. Constructors produce drafts with
/// the `System` placeholder; only driver-seeded messages keep it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub protocol: Protocol,
    pub action: String,
    pub payload: Payload,
    pub sender: AgentId,
}

impl Message {
    /// Build a `SUBMIT_FOR_REVIEW / review_code` draft.
    pub fn submit_for_review(code: impl Into<String>) -> Self {
        Self {
            protocol: Protocol::SubmitForReview,
            action: REVIEW_CODE.to_string(),
            payload: Payload::Code { code: code.into() },
            sender: AgentId::system(),
        }
    }

    /// Build a `REVIEW_FEEDBACK / provide_feedback` draft.
    pub fn review_feedback(feedback: Feedback) -> Self {
        Self {
            protocol: Protocol::ReviewFeedback,
            action: PROVIDE_FEEDBACK.to_string(),
            payload: Payload::Feedback(feedback),
            sender: AgentId::system(),
        }
    }

    /// Build a `FIX_INSTRUCTION / fix_code` draft.
    pub fn fix_instruction(comments: Vec<String>) -> Self {
        Self {
            protocol: Protocol::FixInstruction,
            action: FIX_CODE.to_string(),
            payload: Payload::FixComments { comments },
            sender: AgentId::system(),
        }
    }

    /// Return a copy stamped with the given sender identity.
    pub fn stamped(mut self, sender: AgentId) -> Self {
        self.sender = sender;
        self
    }
}
