//! Text-completion port
//!
//! Defines the interface to the external completion collaborator. The
//! response is normalized once at this boundary into a single
//! [`Completion`] value; callers never probe alternative response shapes.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion call
///
/// All variants are transient, collaborator-level failures. Handlers
/// recover from them locally via fixed fallback records; they are never
/// propagated past the agent that made the call.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Token accounting for one completion call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Normalized result of a completion call
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// Port to the external text-completion collaborator
///
/// Any implementation satisfying this signature is interchangeable:
/// an HTTP API client, a local model, or a scripted fake in tests.
/// `role_hint` identifies the calling agent for providers that route
/// or log per role.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &str, role_hint: &str)
        -> Result<Completion, CompletionError>;
}
