//! Application layer for conclave
//!
//! Concrete agents (producer, reviewers, coordinator), the registry/
//! scheduler that routes messages between their mailboxes, and the bounded
//! workflow driver. External capabilities (LLM completion, syntax
//! validation, the transcript) are reached through ports; adapters live in
//! the infrastructure layer.

pub mod agents;
pub mod ports;
pub mod scheduler;
pub mod workflow;

pub use agents::{
    coordinator::{ConsensusSignal, Coordinator},
    producer::{ArtifactCell, Producer},
    reviewer::Reviewer,
    Agent, Outbound,
};
pub use scheduler::Scheduler;
pub use workflow::{ReviewWorkflow, WorkflowError, WorkflowOutcome, WorkflowStatus};
