//! Release install/uninstall through the helm CLI.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shopdeploy_core::error::{DeployError, DeployResult};
use tokio::process::Command;
use tracing::info;

/// Applies and removes named releases scoped to a namespace.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Applies the chart as `release` in `namespace`, upgrade-or-install
    /// mode so it is safe whether or not the release pre-exists.
    async fn install(&self, release: &str, chart_path: &Path, namespace: &str) -> DeployResult<()>;

    /// Removes `release` from `namespace`.
    async fn uninstall(&self, release: &str, namespace: &str) -> DeployResult<()>;
}

/// `PackageManager` backed by the `helm` binary.
pub struct HelmCli {
    binary: PathBuf,
}

impl HelmCli {
    pub fn new() -> Self {
        let binary = which::which("helm").unwrap_or_else(|_| PathBuf::from("helm"));
        Self { binary }
    }
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new()
    }
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[async_trait]
impl PackageManager for HelmCli {
    async fn install(&self, release: &str, chart_path: &Path, namespace: &str) -> DeployResult<()> {
        let output = Command::new(&self.binary)
            .args(["upgrade", "--install", release])
            .arg(chart_path)
            .args(["--namespace", namespace])
            .output()
            .await?;

        if !output.status.success() {
            return Err(DeployError::Release {
                stderr: stderr_of(&output),
            });
        }
        info!(release, namespace, "helm release installed");
        Ok(())
    }

    async fn uninstall(&self, release: &str, namespace: &str) -> DeployResult<()> {
        let output = Command::new(&self.binary)
            .args(["uninstall", release, "--namespace", namespace])
            .output()
            .await?;

        if !output.status.success() {
            return Err(DeployError::Release {
                stderr: stderr_of(&output),
            });
        }
        info!(release, namespace, "helm release uninstalled");
        Ok(())
    }
}
