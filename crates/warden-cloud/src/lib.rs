//! Warden Cloud - the remote collaborator surface
//!
//! The remote infrastructure API is an external collaborator: this crate
//! defines the operations the rest of the system consumes (`CloudClient`),
//! the typed error surface the orchestrator classifies against, and an
//! in-memory implementation suitable for development and testing. A real
//! transport implements the same trait and maps its SDK errors onto
//! [`CloudError`] variants at the boundary.

#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod memory;

pub use client::{Capability, CloudClient};
pub use error::{CloudError, Result};
pub use memory::InMemoryCloudClient;
