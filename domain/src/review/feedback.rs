//! Feedback record types
//!
//! A [`Feedback`] is the structured payload a reviewer produces for one
//! submitted artifact. The two fallback constructors are fixed records
//! substituted when the completion collaborator's output cannot be used;
//! they must stay bit-for-bit stable because callers and tests assert on
//! them to distinguish the failure modes.

use crate::error::DomainError;
use crate::messaging::message::AgentId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a reviewer's findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(DomainError::UnknownSeverity(other.to_string())),
        }
    }
}

/// A reviewer's structured feedback for one artifact
///
/// `reviewer` and `role` are absent in the model's JSON output and are
/// stamped after generation via [`Feedback::attributed_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Findings, one per entry; never empty (fallbacks carry one entry)
    pub comments: Vec<String>,
    pub severity: Severity,
    /// Free-text remediation suggestion
    pub suggested_fix: String,
    /// Identity of the producing reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<AgentId>,
    /// Role label of the producing reviewer (e.g. "Team Lead")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Feedback {
    pub fn new(
        comments: Vec<String>,
        severity: Severity,
        suggested_fix: impl Into<String>,
    ) -> Self {
        Self {
            comments,
            severity,
            suggested_fix: suggested_fix.into(),
            reviewer: None,
            role: None,
        }
    }

    /// Stamp the producing reviewer's identity and role label.
    pub fn attributed_to(mut self, reviewer: AgentId, role: impl Into<String>) -> Self {
        self.reviewer = Some(reviewer);
        self.role = Some(role.into());
        self
    }

    /// Fixed record substituted when the model's reply is not valid JSON.
    pub fn invalid_json_fallback() -> Self {
        Self::new(
            vec!["Fallback: Invalid JSON response from LLM.".to_string()],
            Severity::Medium,
            "Review code for syntax and structure issues.",
        )
    }

    /// Fixed record substituted when the completion call itself fails.
    ///
    /// Distinct from [`Feedback::invalid_json_fallback`] so the two failure
    /// modes remain distinguishable downstream.
    pub fn completion_failure_fallback() -> Self {
        Self::new(
            vec!["Fallback: Review syntax and structure.".to_string()],
            Severity::Medium,
            "Add proper indentation and error handling.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_str() {
        assert_eq!("low".parse::<Severity>().unwrap(), Severity::Low);
        assert_eq!("MEDIUM".parse::<Severity>().unwrap(), Severity::Medium);
        assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_display_roundtrip() {
        for severity in [Severity::Low, Severity::Medium, Severity::High] {
            assert_eq!(severity.to_string().parse::<Severity>().unwrap(), severity);
        }
    }

    #[test]
    fn test_attribution() {
        let feedback = Feedback::new(vec!["ok".into()], Severity::Low, "none")
            .attributed_to(AgentId::new("team-lead"), "Team Lead");
        assert_eq!(feedback.reviewer.unwrap().as_str(), "team-lead");
        assert_eq!(feedback.role.as_deref(), Some("Team Lead"));
    }

    #[test]
    fn test_fallbacks_are_fixed_and_distinct() {
        let parse = Feedback::invalid_json_fallback();
        assert_eq!(
            parse.comments,
            vec!["Fallback: Invalid JSON response from LLM.".to_string()]
        );
        assert_eq!(parse.severity, Severity::Medium);
        assert_eq!(parse.suggested_fix, "Review code for syntax and structure issues.");

        let failure = Feedback::completion_failure_fallback();
        assert_eq!(
            failure.comments,
            vec!["Fallback: Review syntax and structure.".to_string()]
        );
        assert_eq!(failure.severity, Severity::Medium);
        assert_eq!(failure.suggested_fix, "Add proper indentation and error handling.");

        assert_ne!(parse, failure);
        // Reproducible
        assert_eq!(parse, Feedback::invalid_json_fallback());
        assert_eq!(failure, Feedback::completion_failure_fallback());
    }

    #[test]
    fn test_deserialize_model_output() {
        let json = r#"{
            "comments": ["Missing error handling", "No tests"],
            "severity": "high",
            "suggested_fix": "Wrap the IO calls in try/except."
        }"#;
        let feedback: Feedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.severity, Severity::High);
        assert_eq!(feedback.comments.len(), 2);
        assert!(feedback.reviewer.is_none());
    }
}
