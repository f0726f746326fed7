//! In-memory implementation of the cloud client
//!
//! Suitable for development and testing. The double records every call in
//! order, can simulate per-call latency, and applies submitted updates to
//! its stored templates so repeated runs observe the previous mutation.

use crate::client::{Capability, CloudClient};
use crate::error::{CloudError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::Duration;
use warden_types::{StackResource, StackStatus, StackSummary};

#[derive(Debug, Clone)]
struct StackRecord {
    status: StackStatus,
    template: String,
    resources: Vec<StackResource>,
    submitted: Vec<String>,
}

/// In-memory cloud client
#[derive(Default)]
pub struct InMemoryCloudClient {
    stacks: DashMap<String, StackRecord>,
    deployed: DashMap<String, String>,
    calls: Mutex<Vec<String>>,
    latency: Option<Duration>,
}

impl InMemoryCloudClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long at the start of every call, to exercise join logic.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed a stack with a status and template body.
    pub fn insert_stack(&self, id: &str, status: StackStatus, template: &str) {
        self.stacks.insert(
            id.to_string(),
            StackRecord {
                status,
                template: template.to_string(),
                resources: Vec::new(),
                submitted: Vec::new(),
            },
        );
    }

    /// Attach a deployed resource to a seeded stack.
    pub fn add_resource(&self, stack_id: &str, resource: StackResource) {
        if let Some(mut record) = self.stacks.get_mut(stack_id) {
            record.resources.push(resource);
        }
    }

    /// Record the live runtime of a deployed function.
    pub fn set_deployed_runtime(&self, physical_id: &str, runtime: &str) {
        self.deployed
            .insert(physical_id.to_string(), runtime.to_string());
    }

    /// Bodies submitted as updates for one stack, oldest first.
    pub fn submitted(&self, stack_id: &str) -> Vec<String> {
        self.stacks
            .get(stack_id)
            .map(|r| r.submitted.clone())
            .unwrap_or_default()
    }

    /// Every call made against this client, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    async fn record(&self, call: impl Into<String>) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.calls.lock().expect("call log poisoned").push(call.into());
    }
}

#[async_trait]
impl CloudClient for InMemoryCloudClient {
    async fn fetch_template(&self, stack_id: &str) -> Result<String> {
        self.record(format!("fetch_template {}", stack_id)).await;
        self.stacks
            .get(stack_id)
            .map(|r| r.template.clone())
            .ok_or_else(|| CloudError::StackNotFound(stack_id.to_string()))
    }

    async fn submit_update(
        &self,
        stack_id: &str,
        body: &str,
        _capabilities: &[Capability],
    ) -> Result<u16> {
        self.record(format!("submit_update {}", stack_id)).await;
        let mut record = self
            .stacks
            .get_mut(stack_id)
            .ok_or_else(|| CloudError::StackNotFound(stack_id.to_string()))?;
        if record.template == body {
            return Err(CloudError::NoUpdates(stack_id.to_string()));
        }
        record.template = body.to_string();
        record.submitted.push(body.to_string());
        Ok(200)
    }

    async fn list_stacks(&self) -> Result<Vec<StackSummary>> {
        self.record("list_stacks").await;
        Ok(self
            .stacks
            .iter()
            .map(|entry| StackSummary::new(entry.key().clone(), entry.value().status.clone()))
            .collect())
    }

    async fn list_stack_resources(&self, stack_id: &str) -> Result<Vec<StackResource>> {
        self.record(format!("list_stack_resources {}", stack_id))
            .await;
        self.stacks
            .get(stack_id)
            .map(|r| r.resources.clone())
            .ok_or_else(|| CloudError::StackNotFound(stack_id.to_string()))
    }

    async fn deployed_runtime(&self, physical_id: &str) -> Result<Option<String>> {
        self.record(format!("deployed_runtime {}", physical_id))
            .await;
        Ok(self.deployed.get(physical_id).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_reflects_submitted_update() {
        let client = InMemoryCloudClient::new();
        client.insert_stack("svc", StackStatus::UpdateComplete, "{\"a\":1}");

        let status = client
            .submit_update("svc", "{\"a\":2}", &[Capability::Iam])
            .await
            .unwrap();
        assert_eq!(status, 200);
        assert_eq!(client.fetch_template("svc").await.unwrap(), "{\"a\":2}");
        assert_eq!(client.submitted("svc"), vec!["{\"a\":2}".to_string()]);
    }

    #[tokio::test]
    async fn identical_body_is_no_updates() {
        let client = InMemoryCloudClient::new();
        client.insert_stack("svc", StackStatus::UpdateComplete, "{}");

        let err = client
            .submit_update("svc", "{}", &[Capability::Iam])
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::NoUpdates(_)));
    }

    #[tokio::test]
    async fn missing_stack_is_not_found() {
        let client = InMemoryCloudClient::new();
        let err = client.fetch_template("ghost").await.unwrap_err();
        assert!(matches!(err, CloudError::StackNotFound(_)));
    }
}
