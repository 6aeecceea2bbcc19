//! Port for the append-only conversation transcript.
//!
//! Every message transfer and every completion-token usage event is
//! appended to a process-wide transcript artifact. This is separate from
//! `tracing`-based diagnostics: tracing handles operator-facing log lines,
//! while the transcript captures the full agent conversation in a
//! human-readable, line-per-event form.

use conclave_domain::{AgentId, Protocol};

/// A transcript event
///
/// `summary` fields are single-line payload digests, not full payloads.
#[derive(Debug, Clone)]
pub enum TranscriptEvent {
    /// A message left a sender bound for a recipient.
    Send {
        from: AgentId,
        to: AgentId,
        protocol: Protocol,
        action: String,
        summary: String,
    },
    /// A message was appended to a recipient's mailbox.
    Receive {
        by: AgentId,
        from: AgentId,
        protocol: Protocol,
        action: String,
        summary: String,
    },
    /// Token accounting for one completion call.
    TokenUsage {
        operation: &'static str,
        prompt_tokens: u64,
        completion_tokens: u64,
    },
    /// Free-form annotation (dropped sends, workflow milestones).
    Note(String),
}

/// Port for appending transcript events.
///
/// The `record` method is intentionally synchronous and non-fallible to
/// avoid disrupting the main execution flow; transcript failures are
/// silently ignored by implementations.
pub trait TranscriptSink: Send + Sync {
    fn record(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoTranscript;

impl TranscriptSink for NoTranscript {
    fn record(&self, _event: TranscriptEvent) {}
}
