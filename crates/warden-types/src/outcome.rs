//! Per-stack upgrade outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one stack's upgrade attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// Template already conformed; nothing was submitted
    NoChange,
    /// Mutated template submitted; carries the remote status code
    Updated { status: u16 },
    /// Benign condition (stack absent, remote saw no effective change)
    Skipped { reason: String },
    /// Unclassified failure, isolated to this stack
    Failed { error: String },
}

impl UpgradeOutcome {
    pub fn is_benign(&self) -> bool {
        !matches!(self, UpgradeOutcome::Failed { .. })
    }
}

impl fmt::Display for UpgradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeOutcome::NoChange => write!(f, "no change"),
            UpgradeOutcome::Updated { status } => write!(f, "updated (status {})", status),
            UpgradeOutcome::Skipped { reason } => write!(f, "skipped: {}", reason),
            UpgradeOutcome::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Outcome paired with the stack it belongs to; the batch report is one of
/// these per requested stack, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackReport {
    pub stack_id: String,
    pub outcome: UpgradeOutcome,
}

impl StackReport {
    pub fn new(stack_id: impl Into<String>, outcome: UpgradeOutcome) -> Self {
        Self {
            stack_id: stack_id.into(),
            outcome,
        }
    }
}

impl fmt::Display for StackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stack_id, self.outcome)
    }
}
