//! Ports: interfaces to external capabilities
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod completion;
pub mod syntax;
pub mod transcript;

pub use completion::{Completion, CompletionError, CompletionGateway, TokenUsage};
pub use syntax::{AcceptAllSyntax, SyntaxChecker};
pub use transcript::{NoTranscript, TranscriptEvent, TranscriptSink};
