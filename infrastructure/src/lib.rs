//! Infrastructure layer for conclave
//!
//! Adapters behind the application-layer ports: an OpenAI-compatible HTTP
//! completion gateway, a tree-sitter Python syntax checker, a file-backed
//! transcript sink, the configuration loader, and final-artifact
//! persistence.

pub mod artifact;
pub mod config;
pub mod providers;
pub mod syntax;
pub mod transcript;

pub use artifact::persist_artifact;
pub use config::{ConfigLoader, FileConfig};
pub use providers::OpenAiCompletionGateway;
pub use syntax::PythonSyntaxChecker;
pub use transcript::FileTranscript;
