//! Warden Types - Core types for fleet runtime enforcement
//!
//! Runtime Warden keeps the serverless function resources declared across a
//! fleet of infrastructure stacks on an approved runtime version, and audits
//! live deployments for drift from that policy.
//!
//! ## Architectural Boundaries
//!
//! - **warden-upgrade** owns: the batch upgrade pipeline (backup, mutate, submit)
//! - **warden-audit** owns: the read-only drift scan over live deployments
//! - **warden-cloud** owns: the remote collaborator surface (templates, stacks,
//!   deployed runtimes); the real transport lives behind its trait
//!
//! ## Key Concepts
//!
//! - **Template**: a stack's declared resources, keyed by logical id
//! - **Function resource**: a template resource carrying a runtime identifier
//! - **UpgradeOutcome**: per-stack result of one upgrade attempt
//! - **AuditFinding**: one live function observed off-policy

#![deny(unsafe_code)]

pub mod finding;
pub mod outcome;
pub mod stack;
pub mod template;

pub use finding::AuditFinding;
pub use outcome::{StackReport, UpgradeOutcome};
pub use stack::{StackResource, StackStatus, StackSummary};
pub use template::{Resource, Template, FUNCTION_RESOURCE_TYPE, RUNTIME_FAMILY_PREFIX};
