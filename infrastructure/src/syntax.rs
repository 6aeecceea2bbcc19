//! Python syntax gate
//!
//! Implements the [`SyntaxChecker`] port with a tree-sitter parse: a
//! rewritten artifact is valid only if the parser produces a tree whose
//! root carries no ERROR or MISSING nodes. This is a syntax-only gate by
//! contract; semantic correctness of a fix is out of scope.

use conclave_application::ports::syntax::SyntaxChecker;
use std::sync::Mutex;
use tracing::warn;

/// Tree-sitter-backed Python syntax checker.
///
/// The parser is not `Sync`, so it sits behind a mutex; checks are short
/// and uncontended (a single producer calls this once per fix round).
pub struct PythonSyntaxChecker {
    parser: Mutex<tree_sitter::Parser>,
}

impl PythonSyntaxChecker {
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
            // Grammar/runtime version skew. The parser stays unset and
            // every check reports invalid, which keeps the original
            // artifact rather than adopting unverifiable output.
            warn!(error = %e, "Could not load Python grammar");
        }
        Self {
            parser: Mutex::new(parser),
        }
    }
}

impl Default for PythonSyntaxChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxChecker for PythonSyntaxChecker {
    fn is_valid(&self, source: &str) -> bool {
        let Ok(mut parser) = self.parser.lock() else {
            return false;
        };
        match parser.parse(source, None) {
            Some(tree) => {
                let root = tree.root_node();
                !root.has_error() && !root.is_missing()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_python() {
        let checker = PythonSyntaxChecker::new();
        assert!(checker.is_valid("def add(a, b):\n    return a + b\n"));
    }

    #[test]
    fn test_accepts_empty_source() {
        let checker = PythonSyntaxChecker::new();
        assert!(checker.is_valid(""));
    }

    #[test]
    fn test_rejects_broken_python() {
        let checker = PythonSyntaxChecker::new();
        assert!(!checker.is_valid("def why(???):::\nprint \"nope\""));
    }

    #[test]
    fn test_rejects_the_seed_artifact() {
        let checker = PythonSyntaxChecker::new();
        assert!(!checker.is_valid(conclave_domain::seed_artifact()));
    }

    #[test]
    fn test_rejects_unbalanced_parens() {
        let checker = PythonSyntaxChecker::new();
        assert!(!checker.is_valid("print(\"End of the beginning\"\n"));
    }
}
