//! Chart repository checkout through the git CLI.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shopdeploy_core::error::{DeployError, DeployResult};
use tokio::process::Command;
use tracing::info;

/// Fetches a fresh copy of a remote repository.
#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn clone_repo(&self, url: &str, dest: &Path) -> DeployResult<()>;
}

/// `VersionControl` backed by the `git` binary.
pub struct GitCli {
    binary: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        let binary = which::which("git").unwrap_or_else(|_| PathBuf::from("git"));
        Self { binary }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn clone_repo(&self, url: &str, dest: &Path) -> DeployResult<()> {
        let output = Command::new(&self.binary)
            .arg("clone")
            .arg(url)
            .arg(dest)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DeployError::Clone {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        info!(url, dest = %dest.display(), "chart repository cloned");
        Ok(())
    }
}
