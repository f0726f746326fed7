//! Runtime version policy
//!
//! The policy is the single decision function for "is this runtime out of
//! date". It is built once at startup and shared by both the upgrade engine
//! and the drift scanner, so the acceptable set cannot diverge between them.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use warden_types::RUNTIME_FAMILY_PREFIX;

/// Immutable runtime policy: a target version plus the set of versions that
/// are already acceptable (always including the target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimePolicy {
    target: String,
    acceptable: BTreeSet<String>,
}

impl RuntimePolicy {
    /// Build a policy for `target`, also accepting `allowed` versions.
    ///
    /// The target is always a member of the acceptable set.
    pub fn new<I, S>(target: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = target.into();
        let mut acceptable: BTreeSet<String> = allowed.into_iter().map(Into::into).collect();
        acceptable.insert(target.clone());
        Self { target, acceptable }
    }

    /// The version non-conforming functions are rewritten to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `runtime` belongs to the managed language family
    pub fn is_family(&self, runtime: &str) -> bool {
        runtime.starts_with(RUNTIME_FAMILY_PREFIX)
    }

    /// Whether `runtime` is a member of the acceptable set
    pub fn is_acceptable(&self, runtime: &str) -> bool {
        self.acceptable.contains(runtime)
    }

    /// Whether `runtime` must be upgraded.
    ///
    /// Identifiers outside the managed family are out of scope and never
    /// flagged. Within the family, versions are opaque identifiers, never
    /// compared numerically: a newer version that is not on the acceptable
    /// list is still flagged, so callers must keep the list current. This is
    /// a deliberate limitation, not an oversight.
    pub fn needs_upgrade(&self, runtime: &str) -> bool {
        self.is_family(runtime) && !self.is_acceptable(runtime)
    }
}
