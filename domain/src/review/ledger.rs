//! Consensus feedback ledger
//!
//! Tracks, within a single review round, which required reviewers have
//! reported and whether each approved. Once every required reviewer has an
//! entry the ledger produces a [`ConsensusDecision`] and resets itself;
//! it never carries state across rounds.

use super::approval::is_approving;
use super::feedback::Feedback;
use crate::messaging::message::AgentId;
use std::collections::HashMap;

/// Outcome of a completed review round
#[derive(Debug, Clone, PartialEq)]
pub enum ConsensusDecision {
    /// Every required reviewer approved; the cycle stops here.
    Approved,
    /// At least one reviewer did not approve. `comments` is the
    /// concatenation of every required reviewer's comments, in
    /// reviewer-registration order.
    Rejected { comments: Vec<String> },
}

impl ConsensusDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, ConsensusDecision::Approved)
    }
}

/// Per-round ledger of reviewer feedback and approval flags
#[derive(Debug)]
pub struct FeedbackLedger {
    /// Required reviewers, in registration order
    required: Vec<AgentId>,
    feedbacks: HashMap<AgentId, Feedback>,
    approved_by: HashMap<AgentId, bool>,
}

impl FeedbackLedger {
    pub fn new(required: Vec<AgentId>) -> Self {
        let approved_by = required.iter().map(|id| (id.clone(), false)).collect();
        Self {
            required,
            feedbacks: HashMap::new(),
            approved_by,
        }
    }

    pub fn required_reviewers(&self) -> &[AgentId] {
        &self.required
    }

    /// Record feedback from a reviewer, overwriting any earlier entry for
    /// the same reviewer within this round. The approval flag is computed
    /// from the feedback at record time.
    pub fn record(&mut self, reviewer: AgentId, feedback: Feedback) {
        if self.required.contains(&reviewer) {
            self.approved_by
                .insert(reviewer.clone(), is_approving(&feedback));
        }
        self.feedbacks.insert(reviewer, feedback);
    }

    /// Whether every required reviewer has reported this round.
    pub fn is_complete(&self) -> bool {
        self.required.iter().all(|id| self.feedbacks.contains_key(id))
    }

    /// Whether the given reviewer has approved this round.
    pub fn has_approved(&self, reviewer: &AgentId) -> bool {
        self.approved_by.get(reviewer).copied().unwrap_or(false)
    }

    /// Decide the round if complete, clearing the ledger either way.
    ///
    /// Returns `None` while reviewers are still outstanding; the ledger is
    /// untouched in that case. Once complete, the decision is computed and
    /// both maps reset atomically (the round boundary).
    pub fn decide(&mut self) -> Option<ConsensusDecision> {
        if !self.is_complete() {
            return None;
        }

        let decision = if self.required.iter().all(|id| self.has_approved(id)) {
            ConsensusDecision::Approved
        } else {
            let comments = self
                .required
                .iter()
                .filter_map(|id| self.feedbacks.get(id))
                .flat_map(|feedback| feedback.comments.iter().cloned())
                .collect();
            ConsensusDecision::Rejected { comments }
        };

        self.reset();
        Some(decision)
    }

    fn reset(&mut self) {
        self.feedbacks.clear();
        for flag in self.approved_by.values_mut() {
            *flag = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::feedback::Severity;

    fn reviewers() -> Vec<AgentId> {
        vec![AgentId::new("team-lead"), AgentId::new("architect")]
    }

    fn approving(comment: &str) -> Feedback {
        Feedback::new(vec![comment.to_string()], Severity::Low, "n/a")
    }

    fn rejecting(comments: &[&str]) -> Feedback {
        Feedback::new(
            comments.iter().map(|c| c.to_string()).collect(),
            Severity::Medium,
            "fix it",
        )
    }

    #[test]
    fn test_incomplete_round_yields_no_decision() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), approving("fine"));

        assert!(!ledger.is_complete());
        assert!(ledger.decide().is_none());
        // Ledger untouched while waiting.
        assert!(ledger.has_approved(&AgentId::new("team-lead")));
    }

    #[test]
    fn test_unanimous_approval() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), approving("fine"));
        ledger.record(AgentId::new("architect"), approving("solid"));

        assert_eq!(ledger.decide(), Some(ConsensusDecision::Approved));
    }

    #[test]
    fn test_rejection_concatenates_in_registration_order() {
        let mut ledger = FeedbackLedger::new(reviewers());
        // Report out of registration order on purpose.
        ledger.record(AgentId::new("architect"), rejecting(&["a1", "a2"]));
        ledger.record(AgentId::new("team-lead"), rejecting(&["t1"]));

        match ledger.decide() {
            Some(ConsensusDecision::Rejected { comments }) => {
                assert_eq!(comments, vec!["t1", "a1", "a2"]);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_one_rejection_sinks_the_round() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), approving("fine"));
        ledger.record(AgentId::new("architect"), rejecting(&["leaky"]));

        assert!(matches!(
            ledger.decide(),
            Some(ConsensusDecision::Rejected { .. })
        ));
    }

    #[test]
    fn test_ledger_resets_after_decision() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), approving("fine"));
        ledger.record(AgentId::new("architect"), approving("solid"));
        ledger.decide().unwrap();

        assert!(!ledger.is_complete());
        assert!(!ledger.has_approved(&AgentId::new("team-lead")));
        assert!(!ledger.has_approved(&AgentId::new("architect")));
    }

    #[test]
    fn test_ledger_resets_after_rejection_too() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), rejecting(&["x"]));
        ledger.record(AgentId::new("architect"), rejecting(&["y"]));
        ledger.decide().unwrap();

        assert!(!ledger.is_complete());
    }

    #[test]
    fn test_overwrite_within_round() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("team-lead"), rejecting(&["old"]));
        ledger.record(AgentId::new("team-lead"), approving("revised"));
        ledger.record(AgentId::new("architect"), approving("solid"));

        assert_eq!(ledger.decide(), Some(ConsensusDecision::Approved));
    }

    #[test]
    fn test_unknown_reviewer_never_completes_the_round() {
        let mut ledger = FeedbackLedger::new(reviewers());
        ledger.record(AgentId::new("drive-by"), approving("lgtm"));
        ledger.record(AgentId::new("team-lead"), approving("fine"));

        assert!(!ledger.is_complete());
        assert!(ledger.decide().is_none());
    }
}
