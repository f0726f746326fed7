//! The `CloudClient` trait - operations consumed from the remote system

use crate::error::Result;
use async_trait::async_trait;
use warden_types::{StackResource, StackSummary};

/// Capabilities acknowledged when submitting a stack update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Acknowledge that the update may create IAM resources
    Iam,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
        }
    }
}

/// Remote collaborator operations
///
/// Retry and backoff are the transport's concern; callers treat each call as
/// a single attempt.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Fetch the current template body of a stack.
    ///
    /// Fails with [`crate::CloudError::StackNotFound`] if the stack is absent.
    async fn fetch_template(&self, stack_id: &str) -> Result<String>;

    /// Submit a new template body as a stack update, returning the remote
    /// status code on acceptance.
    async fn submit_update(
        &self,
        stack_id: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> Result<u16>;

    /// List every stack in the account, whatever its lifecycle status.
    async fn list_stacks(&self) -> Result<Vec<StackSummary>>;

    /// List the deployed resources of one stack.
    async fn list_stack_resources(&self, stack_id: &str) -> Result<Vec<StackResource>>;

    /// Query the live runtime of a deployed function by physical id.
    ///
    /// Returns `None` when the deployment reports no runtime (e.g. a
    /// container-image function).
    async fn deployed_runtime(&self, physical_id: &str) -> Result<Option<String>>;
}
