//! Warden CLI - fleet runtime upgrades and drift audits
//!
//! Two pipelines, independently invoked:
//! - `warden upgrade` rewrites out-of-date function runtimes across the
//!   requested stacks, snapshotting every template before mutation
//! - `warden audit` scans live deployments fleet-wide for runtime drift

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_audit::FleetAuditor;
use warden_backup::BackupWriter;
use warden_upgrade::UpgradeRunner;

mod client;
mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Runtime Warden - fleet runtime upgrades and drift audits", long_about = None)]
#[command(version)]
struct Cli {
    /// Target runtime version for upgrades
    #[arg(long, env = "NODE_VERSION", default_value = "nodejs14.x", global = true)]
    target: String,

    /// Additional runtime versions accepted as-is (repeatable)
    #[arg(long = "allow", value_name = "RUNTIME", global = true)]
    allow: Vec<String>,

    /// Remote collaborator region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1", global = true)]
    region: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade declared runtimes across the requested stacks
    Upgrade {
        /// Comma-separated stack identifiers to process
        #[arg(long, env = "STACKS", value_delimiter = ',', required = true)]
        stacks: Vec<String>,

        /// Directory for pre-mutation template snapshots
        #[arg(long, default_value = "template-backups")]
        backup_dir: PathBuf,
    },

    /// Audit live deployments fleet-wide for runtime drift
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Upgrade { stacks, backup_dir } => {
            let stacks = config::validate_stacks(stacks)?;
            let cfg = AppConfig::new(cli.region, cli.target, cli.allow);
            let client = client::build_client(&cfg);

            let runner =
                UpgradeRunner::new(client, cfg.policy.clone(), BackupWriter::new(backup_dir));
            let reports = runner.run(&stacks).await;

            for report in &reports {
                println!("{}", report);
            }
            let failed = reports.iter().filter(|r| !r.outcome.is_benign()).count();
            println!(
                "processed {} stacks ({} failed)",
                reports.len(),
                failed
            );
        }
        Commands::Audit => {
            let cfg = AppConfig::new(cli.region, cli.target, cli.allow);
            let client = client::build_client(&cfg);

            let auditor = FleetAuditor::new(client, cfg.policy.clone());
            let findings = auditor.scan().await?;

            for finding in &findings {
                println!("{}", finding);
            }
            println!("{} functions off policy", findings.len());
        }
    }

    Ok(())
}
