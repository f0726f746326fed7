//! Process configuration
//!
//! Built once in `main` and passed by reference into the runner and auditor
//! constructors; no process-wide mutable state.

use anyhow::{bail, Result};
use warden_policy::RuntimePolicy;

/// Everything the process needs, resolved from CLI flags and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote collaborator region
    pub region: String,
    /// Runtime policy shared by the upgrade engine and the scanner
    pub policy: RuntimePolicy,
}

impl AppConfig {
    pub fn new(region: String, target: String, allow: Vec<String>) -> Self {
        Self {
            region,
            policy: RuntimePolicy::new(target, allow),
        }
    }
}

/// Validate the requested stack list: present, and at least one non-empty id.
pub fn validate_stacks(stacks: Vec<String>) -> Result<Vec<String>> {
    let stacks: Vec<String> = stacks
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if stacks.is_empty() {
        bail!("STACKS must list at least one stack identifier");
    }
    Ok(stacks)
}
