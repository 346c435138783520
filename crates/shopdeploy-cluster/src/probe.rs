//! Cluster runtime availability probe.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Synchronous reachability check gating every mutating operation.
///
/// A probe never errors: any failure to reach the runtime is simply
/// "not available".
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self) -> bool;
}

/// Probes the local minikube runtime by invoking `minikube status` and
/// looking for a running-state marker in its output.
pub struct MinikubeProber {
    binary: PathBuf,
}

impl MinikubeProber {
    pub fn new() -> Self {
        let binary = which::which("minikube").unwrap_or_else(|_| PathBuf::from("minikube"));
        Self { binary }
    }
}

impl Default for MinikubeProber {
    fn default() -> Self {
        Self::new()
    }
}

/// True iff the status output reports a running component.
fn reports_running(stdout: &str) -> bool {
    stdout.contains("Running")
}

#[async_trait]
impl Prober for MinikubeProber {
    async fn probe(&self) -> bool {
        let output = match Command::new(&self.binary).arg("status").output().await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "minikube status could not be invoked");
                return false;
            }
        };

        if !output.status.success() {
            debug!(code = ?output.status.code(), "minikube status exited non-zero");
            return false;
        }

        reports_running(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_marker_is_detected() {
        let out = "minikube\ntype: Control Plane\nhost: Running\nkubelet: Running\n";
        assert!(reports_running(out));
    }

    #[test]
    fn stopped_output_is_not_running() {
        let out = "minikube\ntype: Control Plane\nhost: Stopped\nkubelet: Stopped\n";
        assert!(!reports_running(out));
        assert!(!reports_running(""));
    }
}
