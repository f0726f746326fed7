//! Stack summaries and resource listings as reported by the remote collaborator

use serde::{Deserialize, Serialize};

/// Lifecycle status of a stack
///
/// Only the statuses this system branches on are modeled; everything else is
/// carried verbatim in `Other` so listings round-trip without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackStatus {
    CreateComplete,
    UpdateComplete,
    UpdateRollbackComplete,
    DeleteComplete,
    #[serde(untagged)]
    Other(String),
}

impl StackStatus {
    /// Terminal deleted state; such stacks are excluded from all processing.
    pub fn is_deleted(&self) -> bool {
        matches!(self, StackStatus::DeleteComplete)
    }
}

/// One entry from a fleet-wide stack listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSummary {
    /// Stack identifier (name or ARN)
    pub id: String,
    /// Current lifecycle status
    pub status: StackStatus,
}

impl StackSummary {
    pub fn new(id: impl Into<String>, status: StackStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// One deployed resource within a stack, as enumerated by the remote system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackResource {
    /// Resource type tag, e.g. `AWS::Lambda::Function`
    pub resource_type: String,
    /// Physical identifier of the deployed artifact
    pub physical_id: String,
}

impl StackResource {
    pub fn new(resource_type: impl Into<String>, physical_id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            physical_id: physical_id.into(),
        }
    }
}
