//! OpenAI-compatible completion gateway
//!
//! Talks to any `/chat/completions` endpoint (OpenAI, Azure-compatible
//! proxies, local servers). The wire response is normalized into the
//! application layer's [`Completion`] exactly once, here; callers never
//! see provider response shapes.

use async_trait::async_trait;
use conclave_application::ports::completion::{
    Completion, CompletionError, CompletionGateway, TokenUsage,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Gateway to an OpenAI-compatible chat-completions API.
pub struct OpenAiCompletionGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompletionGateway {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct UsageBody {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Collapse a decoded wire response into the normalized completion.
fn normalize(response: ChatResponse) -> Result<Completion, CompletionError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            CompletionError::MalformedResponse("no choices[0].message.content".to_string())
        })?;
    let usage = response.usage.unwrap_or_default();
    Ok(Completion {
        text: text.trim().to_string(),
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        },
    })
}

fn map_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(err.to_string())
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletionGateway {
    async fn complete(
        &self,
        prompt: &str,
        role_hint: &str,
    ) -> Result<Completion, CompletionError> {
        debug!(role = role_hint, bytes = prompt.len(), "Requesting completion");

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!("{status}: {body}")));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
        normalize(decoded)
    }
}
