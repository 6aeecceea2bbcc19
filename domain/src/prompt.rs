//! Prompt templates for the review flow
//!
//! Reviewer configurations differ only in role label and prompt focus; the
//! handler logic is shared. Both templates demand strict-JSON feedback so
//! the parse step in [`crate::review::parsing`] can stay mechanical.

/// Static configuration of one reviewer: identity, role label, and the
/// prompt template its feedback is generated from.
#[derive(Debug, Clone)]
pub struct ReviewerProfile {
    pub id: &'static str,
    pub role: &'static str,
    template: &'static str,
}

impl ReviewerProfile {
    /// Tactical reviewer: syntax, style, readability, team standards.
    pub fn team_lead() -> Self {
        Self {
            id: "team-lead",
            role: "Team Lead",
            template: r#"You are a Team Lead reviewing Python code for tactical issues. Focus on syntax errors, style (PEP8), readability, basic bugs, and team standards. Ignore high-level design. If the code is clean and meets standards, explicitly state "Code is clean and meets standards" with severity "low".

Code to review:
{code}

Provide feedback as JSON: {"comments": ["Bullet-point list of 2-4 specific issues or 'Code is clean and meets standards'"], "severity": "low/medium/high", "suggested_fix": "Brief code snippet or change description."}

Be concise, actionable, and encouraging."#,
        }
    }

    /// Systemic reviewer: performance, error handling, security, robustness.
    pub fn senior_architect() -> Self {
        Self {
            id: "architect",
            role: "Senior Architect",
            template: r#"You are a Senior Architect reviewing Python code for system-level concerns. Focus on performance, error handling, security, testing, and robustness. If the code is robust and secure, explicitly state "Code is robust and secure" with severity "low".

Code to review:
{code}

Provide feedback as JSON: {"comments": ["Bullet-point list of 2-4 system risks or 'Code is robust and secure'"], "severity": "low/medium/high", "suggested_fix": "Brief code or strategy to mitigate."}

Be rigorous, metrics-driven, and practical."#,
        }
    }

    /// Render the review prompt for a concrete artifact.
    pub fn render(&self, code: &str) -> String {
        self.template.replace("{code}", code)
    }
}

/// Prompt instructing the producer's model to apply aggregated fixes.
pub fn fix_prompt(current_code: &str, comments: &[String]) -> String {
    let aggregated = comments
        .iter()
        .map(|comment| format!("- {comment}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"You are a Python developer fixing code based on reviews. Rewrite the code to address all issues. Ensure it is executable, clean, and follows PEP8 standards. Output ONLY the fixed code, no explanations.

Original Code:
{current_code}

Feedback to Address:
{aggregated}"#
    )
}

/// The deliberately malformed seed artifact used when no input file is
/// given. It trips both reviewers on round one, exercising the full
/// submit -> review -> fix cycle.
pub fn seed_artifact() -> &'static str {
    r#"# welcome to chaos

def why(???):::
print "Welcome to Python 2.8"

def def def():
    def = def
    return def

if 10 >> "five":
    print(9999999999999999 / "zero")

def mystery_function(x y z):
    x = x++--**//y
    return "result is" x + y + z

class Confusion:
    def __innit__(self, names, ages, ):
        self.name = names
        self.feelings = undefinedvariable

    def __str__(self)
        return "My name is" + self.name

list = {1, 2, "three", [4, 5], (6: 7)}
for x in list:
    if x in x:
        breakdance()

import thisisnotapackage

print("End of the beginning of the end"
"#
}
