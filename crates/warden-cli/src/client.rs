//! Client construction seam
//!
//! The remote transport is an external collaborator behind the
//! [`CloudClient`] trait. This build wires the in-memory implementation; a
//! deployment against a real account swaps in a transport that maps its
//! SDK errors onto `CloudError` variants, constructed from the same config.

use std::sync::Arc;
use tracing::warn;
use warden_cloud::{CloudClient, InMemoryCloudClient};

use crate::config::AppConfig;

pub fn build_client(config: &AppConfig) -> Arc<dyn CloudClient> {
    warn!(
        region = %config.region,
        "no remote transport configured, using the in-memory client"
    );
    Arc::new(InMemoryCloudClient::new())
}
