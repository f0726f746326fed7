//! Fleet drift scanning
//!
//! The auditor is read-only and independent of the upgrade pipeline. It
//! inspects the *live deployed* runtime of every function in the fleet, not
//! the template's declared value, so out-of-band manual changes surface too.
//!
//! Per-resource queries for one stack run concurrently but are explicitly
//! joined before that stack's findings are appended; the report is complete
//! or the scan fails. Any enumeration error aborts the whole scan - a
//! partial drift report is worse than a failed one.

#![deny(unsafe_code)]

use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};
use warden_cloud::{CloudClient, CloudError};
use warden_policy::RuntimePolicy;
use warden_types::{AuditFinding, FUNCTION_RESOURCE_TYPE};

/// Pause between per-stack enumerations; a courtesy to the remote API, not a
/// backoff algorithm. Real retry behavior belongs to the transport.
pub const DEFAULT_SCAN_PAUSE: Duration = Duration::from_millis(200);

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Cloud(#[from] CloudError),
}

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Read-only scanner over every stack in the account
pub struct FleetAuditor {
    client: Arc<dyn CloudClient>,
    policy: RuntimePolicy,
    pause: Duration,
}

impl FleetAuditor {
    pub fn new(client: Arc<dyn CloudClient>, policy: RuntimePolicy) -> Self {
        Self {
            client,
            policy,
            pause: DEFAULT_SCAN_PAUSE,
        }
    }

    /// Override the inter-stack pause (tests use zero).
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Scan the whole fleet and return every function observed off-policy.
    #[instrument(skip(self))]
    pub async fn scan(&self) -> Result<Vec<AuditFinding>> {
        let stacks = self.client.list_stacks().await?;
        let mut findings = Vec::new();

        let mut first = true;
        for stack in stacks {
            if stack.status.is_deleted() {
                debug!(stack_id = %stack.id, "skipping deleted stack");
                continue;
            }
            if !first {
                tokio::time::sleep(self.pause).await;
            }
            first = false;

            findings.extend(self.scan_stack(&stack.id).await?);
        }

        info!(findings = findings.len(), "fleet scan complete");
        Ok(findings)
    }

    /// One stack's contribution: all function resources queried, all queries
    /// joined before anything is returned.
    async fn scan_stack(&self, stack_id: &str) -> Result<Vec<AuditFinding>> {
        let resources = self.client.list_stack_resources(stack_id).await?;

        let queries = resources
            .into_iter()
            .filter(|r| r.resource_type == FUNCTION_RESOURCE_TYPE)
            .map(|resource| {
                let client = Arc::clone(&self.client);
                async move {
                    let runtime = client.deployed_runtime(&resource.physical_id).await?;
                    Ok::<_, AuditError>((resource.physical_id, runtime))
                }
            });

        let observed = try_join_all(queries).await?;

        let mut findings = Vec::new();
        for (function_id, runtime) in observed {
            let Some(runtime) = runtime else {
                debug!(stack_id, function_id = %function_id, "no runtime reported");
                continue;
            };
            if self.policy.needs_upgrade(&runtime) {
                info!(stack_id, function_id = %function_id, runtime = %runtime, "drift detected");
                findings.push(AuditFinding::new(stack_id, function_id, runtime));
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_cloud::InMemoryCloudClient;
    use warden_types::{StackResource, StackStatus};

    fn policy() -> RuntimePolicy {
        RuntimePolicy::new("nodejs14.x", ["nodejs16.x"])
    }

    fn seeded_client() -> InMemoryCloudClient {
        let client = InMemoryCloudClient::new();
        client.insert_stack("orders", StackStatus::UpdateComplete, "{}");
        client.add_resource(
            "orders",
            StackResource::new(FUNCTION_RESOURCE_TYPE, "orders-worker"),
        );
        client.add_resource(
            "orders",
            StackResource::new(FUNCTION_RESOURCE_TYPE, "orders-api"),
        );
        client.add_resource("orders", StackResource::new("AWS::S3::Bucket", "orders-artifacts"));
        client.set_deployed_runtime("orders-worker", "nodejs10.x");
        client.set_deployed_runtime("orders-api", "nodejs16.x");

        client.insert_stack("billing", StackStatus::CreateComplete, "{}");
        client.add_resource(
            "billing",
            StackResource::new(FUNCTION_RESOURCE_TYPE, "billing-cron"),
        );
        client.set_deployed_runtime("billing-cron", "nodejs12.x");

        client
    }

    fn auditor(client: InMemoryCloudClient) -> FleetAuditor {
        FleetAuditor::new(Arc::new(client), policy()).with_pause(Duration::ZERO)
    }

    #[tokio::test]
    async fn finds_every_drifted_function() {
        let findings = auditor(seeded_client()).scan().await.unwrap();

        assert_eq!(findings.len(), 2);
        assert!(findings
            .iter()
            .any(|f| f.function_id == "orders-worker" && f.observed_runtime == "nodejs10.x"));
        assert!(findings
            .iter()
            .any(|f| f.function_id == "billing-cron" && f.observed_runtime == "nodejs12.x"));
    }

    #[tokio::test]
    async fn slow_queries_are_still_joined() {
        // Latency on every call would let a fire-and-forget implementation
        // return before the inner queries resolve; the joined scan must not.
        let client = seeded_client().with_latency(Duration::from_millis(10));
        let findings = auditor(client).scan().await.unwrap();
        assert_eq!(findings.len(), 2);
    }

    #[tokio::test]
    async fn deleted_stacks_are_excluded() {
        let client = seeded_client();
        client.insert_stack("graveyard", StackStatus::DeleteComplete, "{}");
        client.add_resource(
            "graveyard",
            StackResource::new(FUNCTION_RESOURCE_TYPE, "ghost"),
        );
        client.set_deployed_runtime("ghost", "nodejs8.10");

        let findings = auditor(client).scan().await.unwrap();
        assert!(findings.iter().all(|f| f.stack_id != "graveyard"));
    }

    #[tokio::test]
    async fn acceptable_and_foreign_runtimes_are_not_findings() {
        let client = InMemoryCloudClient::new();
        client.insert_stack("mixed", StackStatus::UpdateComplete, "{}");
        client.add_resource("mixed", StackResource::new(FUNCTION_RESOURCE_TYPE, "ok"));
        client.add_resource("mixed", StackResource::new(FUNCTION_RESOURCE_TYPE, "py"));
        client.add_resource("mixed", StackResource::new(FUNCTION_RESOURCE_TYPE, "image"));
        client.set_deployed_runtime("ok", "nodejs14.x");
        client.set_deployed_runtime("py", "python3.9");
        // "image" reports no runtime at all.

        let findings = auditor(client).scan().await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn enumeration_errors_abort_the_scan() {
        // A stack listed but then torn down mid-scan surfaces as an error,
        // not as a silently shortened report.
        struct VanishingClient(InMemoryCloudClient);

        #[async_trait::async_trait]
        impl CloudClient for VanishingClient {
            async fn fetch_template(&self, stack_id: &str) -> warden_cloud::Result<String> {
                self.0.fetch_template(stack_id).await
            }
            async fn submit_update(
                &self,
                stack_id: &str,
                body: &str,
                capabilities: &[warden_cloud::Capability],
            ) -> warden_cloud::Result<u16> {
                self.0.submit_update(stack_id, body, capabilities).await
            }
            async fn list_stacks(&self) -> warden_cloud::Result<Vec<warden_types::StackSummary>> {
                let mut stacks = self.0.list_stacks().await?;
                stacks.push(warden_types::StackSummary::new(
                    "vanished",
                    StackStatus::UpdateComplete,
                ));
                Ok(stacks)
            }
            async fn list_stack_resources(
                &self,
                stack_id: &str,
            ) -> warden_cloud::Result<Vec<StackResource>> {
                self.0.list_stack_resources(stack_id).await
            }
            async fn deployed_runtime(
                &self,
                physical_id: &str,
            ) -> warden_cloud::Result<Option<String>> {
                self.0.deployed_runtime(physical_id).await
            }
        }

        let auditor = FleetAuditor::new(Arc::new(VanishingClient(seeded_client())), policy())
            .with_pause(Duration::ZERO);
        let err = auditor.scan().await.unwrap_err();
        assert!(matches!(err, AuditError::Cloud(CloudError::StackNotFound(_))));
    }
}
