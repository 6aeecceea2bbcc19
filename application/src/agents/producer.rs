//! Producer agent
//!
//! Holds the artifact under review and iteratively revises it. A code
//! submission is fanned out to every reviewer; a fix instruction is
//! applied through the completion gateway and the result adopted only if
//! it passes the syntax gate; unparseable output never replaces the
//! artifact, a marker-prefixed copy of the original is kept instead.

use super::{Agent, Outbound};
use crate::ports::completion::CompletionGateway;
use crate::ports::syntax::SyntaxChecker;
use crate::ports::transcript::{TranscriptEvent, TranscriptSink};
use async_trait::async_trait;
use conclave_domain::{
    fix_prompt, strip_code_fence, AgentId, Mailbox, Message, Payload, Protocol, FIX_CODE,
    REVIEW_CODE,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Shared handle to the producer's current artifact.
///
/// The workflow driver and CLI hold a clone to read the final artifact
/// after the run; the producer is the only writer.
#[derive(Clone, Default)]
pub struct ArtifactCell {
    inner: Arc<Mutex<String>>,
}

impl ArtifactCell {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial.into())),
        }
    }

    pub fn get(&self) -> String {
        self.inner.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn set(&self, value: String) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = value;
        }
    }
}

/// The agent that owns and revises the artifact under review.
pub struct Producer {
    id: AgentId,
    artifact: ArtifactCell,
    reviewers: Vec<AgentId>,
    gateway: Arc<dyn CompletionGateway>,
    syntax: Arc<dyn SyntaxChecker>,
    transcript: Arc<dyn TranscriptSink>,
    mailbox: Mailbox,
}

impl Producer {
    pub fn new(
        id: AgentId,
        artifact: ArtifactCell,
        reviewers: Vec<AgentId>,
        gateway: Arc<dyn CompletionGateway>,
        syntax: Arc<dyn SyntaxChecker>,
        transcript: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            id,
            artifact,
            reviewers,
            gateway,
            syntax,
            transcript,
            mailbox: Mailbox::new(),
        }
    }

    fn broadcast_submission(&self, code: &str) -> Vec<Outbound> {
        self.reviewers
            .iter()
            .map(|reviewer| Outbound::to(reviewer.clone(), Message::submit_for_review(code)))
            .collect()
    }

    /// Apply the aggregated fix comments, returning the next artifact.
    ///
    /// The rewritten code is adopted only if the syntax gate accepts it;
    /// on a rejected rewrite or a failed completion the original artifact
    /// is kept under a marker comment.
    async fn apply_fixes(&self, comments: &[String]) -> String {
        let current = self.artifact.get();
        let prompt = fix_prompt(&current, comments);
        match self.gateway.complete(&prompt, self.id.as_str()).await {
            Ok(completion) => {
                self.transcript.record(TranscriptEvent::TokenUsage {
                    operation: "code fixing",
                    prompt_tokens: completion.usage.prompt_tokens,
                    completion_tokens: completion.usage.completion_tokens,
                });
                let candidate = strip_code_fence(&completion.text).to_string();
                if self.syntax.is_valid(&candidate) {
                    candidate
                } else {
                    warn!(producer = %self.id, "Rewritten code failed the syntax gate; keeping original");
                    format!("# Rejected fix (syntax error)\n\n{current}")
                }
            }
            Err(err) => {
                warn!(producer = %self.id, error = %err, "Fix completion failed; keeping original");
                format!("# Fix attempt failed: {err}\n\n{current}")
            }
        }
    }
}

#[async_trait]
impl Agent for Producer {
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
        match (&message.protocol, message.action.as_str(), &message.payload) {
            (Protocol::SubmitForReview, REVIEW_CODE, Payload::Code { code }) => {
                debug!(producer = %self.id, bytes = code.len(), "Submitting artifact for review");
                self.artifact.set(code.clone());
                self.broadcast_submission(code)
            }
            (Protocol::FixInstruction, FIX_CODE, payload) => {
                // A fix instruction without comments is still a fix
                // instruction; never an error.
                let comments: Vec<String> = match payload {
                    Payload::FixComments { comments } => comments.clone(),
                    _ => Vec::new(),
                };
                info!(producer = %self.id, comments = comments.len(), "Applying fix instructions");
                let next = self.apply_fixes(&comments).await;
                self.artifact.set(next.clone());
                self.broadcast_submission(&next)
            }
            _ => Vec::new(),
        }
    }
}
