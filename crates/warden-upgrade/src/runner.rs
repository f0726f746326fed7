//! Upgrade Runner - sequential per-stack pipeline with failure isolation

use crate::error::{Result, UpgradeError};
use std::sync::Arc;
use tracing::{error, info, instrument};
use warden_backup::BackupWriter;
use warden_cloud::{Capability, CloudClient, CloudError};
use warden_policy::RuntimePolicy;
use warden_template::mutate;
use warden_types::{StackReport, UpgradeOutcome};

/// Drives the upgrade pipeline across a batch of stacks
///
/// Stacks are processed one at a time, each to completion (snapshot written,
/// update accepted) before the next starts. Sequencing is a correctness
/// requirement: it bounds concurrent mutation attempts against one account
/// and keeps the snapshot-then-mutate invariant trivial to reason about.
pub struct UpgradeRunner {
    client: Arc<dyn CloudClient>,
    policy: RuntimePolicy,
    backup: BackupWriter,
}

impl UpgradeRunner {
    pub fn new(client: Arc<dyn CloudClient>, policy: RuntimePolicy, backup: BackupWriter) -> Self {
        Self {
            client,
            policy,
            backup,
        }
    }

    /// Upgrade every requested stack, returning one report per input id, in
    /// input order.
    #[instrument(skip(self, stack_ids), fields(stacks = stack_ids.len()))]
    pub async fn run(&self, stack_ids: &[String]) -> Vec<StackReport> {
        let mut reports = Vec::with_capacity(stack_ids.len());
        for stack_id in stack_ids {
            let outcome = match self.upgrade_stack(stack_id).await {
                Ok(outcome) => outcome,
                Err(err) => self.classify(stack_id, err),
            };
            reports.push(StackReport::new(stack_id.clone(), outcome));
        }
        reports
    }

    /// One stack, start to finish.
    #[instrument(skip(self), fields(stack_id = %stack_id))]
    async fn upgrade_stack(&self, stack_id: &str) -> Result<UpgradeOutcome> {
        // 1. Fetch the current template body.
        let raw = self.client.fetch_template(stack_id).await?;
        if raw.trim().is_empty() {
            return Err(UpgradeError::EmptyTemplate(stack_id.to_string()));
        }

        // 2. Apply the policy to the template.
        let result = mutate(&raw, &self.policy)?;

        // 3. Clean template: report and move on without touching the remote.
        if !result.dirty {
            info!("template already conforms");
            return Ok(UpgradeOutcome::NoChange);
        }

        // 4. Snapshot the pre-mutation body. Nothing may be submitted for
        //    this stack unless the snapshot landed.
        self.backup.write(stack_id, &raw).await?;

        // 5. Submit the mutated body as a stack update.
        let status = self
            .client
            .submit_update(stack_id, &result.body, &[Capability::Iam])
            .await?;
        info!(status, "update submitted");
        Ok(UpgradeOutcome::Updated { status })
    }

    /// The single classification seam between errors and outcomes.
    ///
    /// Benign conditions become skips; everything else is a failure scoped
    /// to the one stack.
    fn classify(&self, stack_id: &str, err: UpgradeError) -> UpgradeOutcome {
        match err {
            UpgradeError::Cloud(CloudError::StackNotFound(_)) => {
                info!(stack_id, "stack does not exist, skipping");
                UpgradeOutcome::Skipped {
                    reason: "stack not found".to_string(),
                }
            }
            UpgradeError::Cloud(CloudError::NoUpdates(_)) => {
                info!(stack_id, "remote reports no updates to perform, skipping");
                UpgradeOutcome::Skipped {
                    reason: "no updates to perform".to_string(),
                }
            }
            err => {
                error!(stack_id, error = %err, "stack upgrade failed");
                UpgradeOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}
