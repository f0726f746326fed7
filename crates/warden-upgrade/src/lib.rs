//! Batch upgrade orchestration
//!
//! The runner drives each requested stack through the full pipeline - fetch,
//! mutate, snapshot, submit - strictly sequentially, and classifies every
//! failure at a single seam. The defining property of the batch: no stack's
//! failure ever halts processing of the remaining stacks.

#![deny(unsafe_code)]

pub mod error;
pub mod runner;

pub use error::{Result, UpgradeError};
pub use runner::UpgradeRunner;
