//! Host-provided auxiliary scripts.
//!
//! The secret-replication and host-registration steps are owned by two
//! shell scripts that take the namespace as their sole argument. They
//! are opaque to the pipeline: zero exit is success, anything else is
//! fatal with the captured stderr.

use std::path::Path;

use async_trait::async_trait;
use shopdeploy_core::error::{DeployError, DeployResult};
use tokio::process::Command;
use tracing::info;

/// Runs a namespace-scoped host script.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, script: &Path, namespace: &str) -> DeployResult<()>;
}

/// `ScriptRunner` that executes the script directly.
#[derive(Default)]
pub struct ShellScriptRunner;

#[async_trait]
impl ScriptRunner for ShellScriptRunner {
    async fn run(&self, script: &Path, namespace: &str) -> DeployResult<()> {
        let output = Command::new(script).arg(namespace).output().await?;

        if !output.status.success() {
            return Err(DeployError::Script {
                script: script.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        info!(script = %script.display(), namespace, "script completed");
        Ok(())
    }
}
