//! Syntax-validity port
//!
//! Used only by the producer's fix-acceptance policy: a rewritten artifact
//! is adopted only if it parses in the target language. The gate covers
//! syntax only, not semantics.

/// Port to the external syntax-validity collaborator
pub trait SyntaxChecker: Send + Sync {
    fn is_valid(&self, source: &str) -> bool;
}

/// Checker that accepts everything. For tests and configurations where no
/// target-language parser is available.
pub struct AcceptAllSyntax;

impl SyntaxChecker for AcceptAllSyntax {
    fn is_valid(&self, _source: &str) -> bool {
        true
    }
}
