//! Drift audit findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// One live function observed running a runtime outside the acceptable set
///
/// Findings are immutable once recorded; the scan's output is the complete
/// collection across every enumerated stack and resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// Stack the function belongs to
    pub stack_id: String,
    /// Physical identifier of the deployed function
    pub function_id: String,
    /// Runtime reported by the live deployment, not the template
    pub observed_runtime: String,
}

impl AuditFinding {
    pub fn new(
        stack_id: impl Into<String>,
        function_id: impl Into<String>,
        observed_runtime: impl Into<String>,
    ) -> Self {
        Self {
            stack_id: stack_id.into(),
            function_id: function_id.into(),
            observed_runtime: observed_runtime.into(),
        }
    }
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} is running {}",
            self.stack_id, self.function_id, self.observed_runtime
        )
    }
}
