//! Reviewer agent
//!
//! Accepts only `SUBMIT_FOR_REVIEW / review_code` messages. Generates a
//! structured feedback record through the completion gateway and sends it
//! to the coordinator. Both failure modes of the gateway collapse to fixed
//! fallback records so a bad model reply can never stall a round.

use super::{Agent, Outbound};
use crate::ports::completion::CompletionGateway;
use crate::ports::transcript::{TranscriptEvent, TranscriptSink};
use async_trait::async_trait;
use conclave_domain::{
    parse_feedback, AgentId, Feedback, Mailbox, Message, Payload, Protocol, ReviewerProfile,
    REVIEW_CODE,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// A reviewer with a fixed role and prompt focus.
///
/// The two stock configurations (Team Lead, Senior Architect) differ only
/// in their [`ReviewerProfile`]; the handler logic is shared.
pub struct Reviewer {
    id: AgentId,
    profile: ReviewerProfile,
    coordinator: AgentId,
    gateway: Arc<dyn CompletionGateway>,
    transcript: Arc<dyn TranscriptSink>,
    mailbox: Mailbox,
}

impl Reviewer {
    pub fn new(
        profile: ReviewerProfile,
        coordinator: AgentId,
        gateway: Arc<dyn CompletionGateway>,
        transcript: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            id: AgentId::new(profile.id),
            profile,
            coordinator,
            gateway,
            transcript,
            mailbox: Mailbox::new(),
        }
    }

    async fn generate_feedback(&self, code: &str) -> Feedback {
        let prompt = self.profile.render(code);
        match self.gateway.complete(&prompt, self.id.as_str()).await {
            Ok(completion) => {
                self.transcript.record(TranscriptEvent::TokenUsage {
                    operation: "code review",
                    prompt_tokens: completion.usage.prompt_tokens,
                    completion_tokens: completion.usage.completion_tokens,
                });
                let outcome = parse_feedback(&completion.text);
                if outcome.is_malformed() {
                    warn!(
                        reviewer = %self.id,
                        "Model reply was not valid feedback JSON; using fallback"
                    );
                }
                outcome.into_feedback()
            }
            Err(err) => {
                warn!(reviewer = %self.id, error = %err, "Completion failed; using fallback");
                Feedback::completion_failure_fallback()
            }
        }
    }
}

#[async_trait]
impl Agent for Reviewer {
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
        // Everything except a code submission is silently ignored.
        let Payload::Code { code } = &message.payload else {
            return Vec::new();
        };
        if message.protocol != Protocol::SubmitForReview || message.action != REVIEW_CODE {
            return Vec::new();
        }

        debug!(reviewer = %self.id, bytes = code.len(), "Reviewing submission");
        let feedback = self
            .generate_feedback(code)
            .await
            .attributed_to(self.id.clone(), self.profile.role);

        vec![Outbound::to(
            self.coordinator.clone(),
            Message::review_feedback(feedback),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::{Completion, CompletionError, TokenUsage};
    use crate::ports::transcript::NoTranscript;
    use conclave_domain::Severity;

    struct FixedGateway {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl CompletionGateway for FixedGateway {
        async fn complete(
            &self,
            _prompt: &str,
            _role_hint: &str,
        ) -> Result<Completion, CompletionError> {
            match &self.reply {
                Ok(text) => Ok(Completion {
                    text: text.clone(),
                    usage: TokenUsage::default(),
                }),
                Err(()) => Err(CompletionError::Timeout),
            }
        }
    }

    fn reviewer(reply: Result<String, ()>) -> Reviewer {
        Reviewer::new(
            ReviewerProfile::team_lead(),
            AgentId::new("coordinator"),
            Arc::new(FixedGateway { reply }),
            Arc::new(NoTranscript),
        )
    }

    #[tokio::test]
    async fn test_valid_reply_becomes_attributed_feedback() {
        let mut agent = reviewer(Ok(
            r#"{"comments": ["Code is clean and meets standards"], "severity": "low", "suggested_fix": "n/a"}"#.to_string(),
        ));
        let out = agent.handle(Message::submit_for_review("x = 1")).await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].recipient.as_str(), "coordinator");
        match &out[0].message.payload {
            Payload::Feedback(feedback) => {
                assert_eq!(feedback.severity, Severity::Low);
                assert_eq!(feedback.reviewer.as_ref().unwrap().as_str(), "team-lead");
                assert_eq!(feedback.role.as_deref(), Some("Team Lead"));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let mut agent = reviewer(Ok(
            "```json\n{\"comments\": [\"ok\"], \"severity\": \"medium\", \"suggested_fix\": \"x\"}\n```".to_string(),
        ));
        let out = agent.handle(Message::submit_for_review("x = 1")).await;
        match &out[0].message.payload {
            Payload::Feedback(feedback) => assert_eq!(feedback.comments, vec!["ok".to_string()]),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_reply_yields_invalid_json_fallback() {
        let mut agent = reviewer(Ok("the code seems fine to me".to_string()));
        let out = agent.handle(Message::submit_for_review("x = 1")).await;
        match &out[0].message.payload {
            Payload::Feedback(feedback) => {
                let expected =
                    Feedback::invalid_json_fallback().attributed_to(AgentId::new("team-lead"), "Team Lead");
                assert_eq!(*feedback, expected);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gateway_failure_yields_distinct_fallback() {
        let mut agent = reviewer(Err(()));
        let out = agent.handle(Message::submit_for_review("x = 1")).await;
        match &out[0].message.payload {
            Payload::Feedback(feedback) => {
                assert_eq!(
                    feedback.comments,
                    vec!["Fallback: Review syntax and structure.".to_string()]
                );
                assert_ne!(
                    feedback.comments,
                    Feedback::invalid_json_fallback().comments
                );
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_messages_are_ignored() {
        let mut agent = reviewer(Ok("unused".to_string()));
        let out = agent
            .handle(Message::fix_instruction(vec!["irrelevant".into()]))
            .await;
        assert!(out.is_empty());
    }
}
