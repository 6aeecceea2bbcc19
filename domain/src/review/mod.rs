//! Review feedback, parsing, approval, and the consensus ledger

pub mod approval;
pub mod feedback;
pub mod ledger;
pub mod parsing;

pub use approval::is_approving;
pub use feedback::{Feedback, Severity};
pub use ledger::{ConsensusDecision, FeedbackLedger};
pub use parsing::{parse_feedback, strip_code_fence, ParseOutcome};
