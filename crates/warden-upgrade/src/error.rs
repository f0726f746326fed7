//! Upgrade pipeline errors

use thiserror::Error;
use warden_backup::BackupError;
use warden_cloud::CloudError;
use warden_template::TemplateError;

/// Everything that can go wrong while upgrading one stack
#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error("stack {0} returned an empty template body")]
    EmptyTemplate(String),
}

/// Result type for upgrade operations
pub type Result<T> = std::result::Result<T, UpgradeError>;
