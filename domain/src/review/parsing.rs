//! Feedback response parsing
//!
//! Extracts a structured [`Feedback`] record from a raw completion reply.
//! Pure domain logic: no I/O, no session state, just text handling.
//!
//! The parse step returns an explicit [`ParseOutcome`] rather than an
//! error: a malformed reply is an expected input, not a failure, and the
//! fallback substitution is a pure function of the outcome.

use super::feedback::Feedback;

/// Strip a single leading/trailing fenced-code marker pair, if present.
///
/// Exactly one open/close triple-backtick pair is removed, not
/// recursively. A language tag on the opening fence (e.g. ```` ```json ````)
/// is discarded with it. Text without a leading fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the opening fence line (which may carry a language tag).
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    // A closing fence must start its own trailing line; a ``` embedded
    // mid-body (e.g. inside a docstring) is content.
    match body.trim_end().strip_suffix("```") {
        Some(stripped) if stripped.is_empty() || stripped.ends_with('\n') => stripped.trim(),
        _ => body.trim(),
    }
}

/// Result of parsing a completion reply into feedback
///
/// `Malformed` carries the raw text for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Feedback),
    Malformed(String),
}

impl ParseOutcome {
    /// Resolve to a usable record: the parsed feedback, or the fixed
    /// invalid-JSON fallback.
    pub fn into_feedback(self) -> Feedback {
        match self {
            ParseOutcome::Parsed(feedback) => feedback,
            ParseOutcome::Malformed(_) => Feedback::invalid_json_fallback(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed(_))
    }
}

/// Parse a raw completion reply into a [`ParseOutcome`].
///
/// Strips one fence pair, then attempts strict JSON deserialization.
pub fn parse_feedback(raw: &str) -> ParseOutcome {
    let body = strip_code_fence(raw);
    match serde_json::from_str::<Feedback>(body) {
        Ok(feedback) => ParseOutcome::Parsed(feedback),
        Err(_) => ParseOutcome::Malformed(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::feedback::Severity;

    // ==================== strip_code_fence Tests ====================

    #[test]
    fn test_strip_plain_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_with_language_tag() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_is_not_recursive() {
        let text = "```\n```\ninner\n```\n```";
        // Only the outermost pair is removed.
        let stripped = strip_code_fence(text);
        assert!(stripped.contains("inner"));
        assert!(stripped.starts_with("```"));
    }

    #[test]
    fn test_unfenced_text_is_trimmed_only() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_without_close() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_unclosed_fence_keeps_embedded_backticks() {
        // No closing fence; the ``` inside the body is content, not a
        // truncation point.
        let text = "```python\ndoc = \"\"\"see ``` markers\"\"\"\nx = 1";
        assert_eq!(
            strip_code_fence(text),
            "doc = \"\"\"see ``` markers\"\"\"\nx = 1"
        );
    }

    #[test]
    fn test_closing_fence_must_start_its_own_line() {
        let text = "```\nx = 1  # not a close: ```";
        assert_eq!(strip_code_fence(text), "x = 1  # not a close: ```");
    }

    // ==================== parse_feedback Tests ====================

    #[test]
    fn test_parse_valid_feedback() {
        let raw = r#"{"comments": ["Use f-strings"], "severity": "low", "suggested_fix": "n/a"}"#;
        match parse_feedback(raw) {
            ParseOutcome::Parsed(feedback) => {
                assert_eq!(feedback.severity, Severity::Low);
                assert_eq!(feedback.comments, vec!["Use f-strings".to_string()]);
            }
            other => panic!("expected parsed outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_fenced_feedback() {
        let raw = "```json\n{\"comments\": [\"ok\"], \"severity\": \"medium\", \"suggested_fix\": \"x\"}\n```";
        assert!(!parse_feedback(raw).is_malformed());
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        let raw = "I think the code is fine, no JSON today.";
        match parse_feedback(raw) {
            ParseOutcome::Malformed(text) => assert_eq!(text, raw),
            other => panic!("expected malformed outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_resolves_to_invalid_json_fallback() {
        let feedback = parse_feedback("not json").into_feedback();
        assert_eq!(feedback, Feedback::invalid_json_fallback());
    }

    #[test]
    fn test_parsed_resolves_to_itself() {
        let raw = r#"{"comments": ["a"], "severity": "high", "suggested_fix": "b"}"#;
        let feedback = parse_feedback(raw).into_feedback();
        assert_eq!(feedback.severity, Severity::High);
    }
}
