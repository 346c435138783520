//! Error taxonomy for the deployment pipeline.
//!
//! One variant per failure class; the HTTP layer maps variants onto
//! response codes. External-tool variants carry the captured stderr so
//! the caller sees exactly what the tool reported.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors that can abort a deploy or delete pipeline.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The cluster runtime did not report a running state.
    #[error("Minikube is not running")]
    ClusterUnavailable,

    /// Malformed request field (image reference, namespace).
    #[error("{0}")]
    Validation(String),

    /// A host-provided script exited non-zero.
    #[error("{script} failed: {stderr}")]
    Script { script: String, stderr: String },

    /// `git clone` of the chart repository exited non-zero.
    #[error("failed to clone repository: {stderr}")]
    Clone { stderr: String },

    /// The values document is missing a required subtree, which means
    /// the checked-out chart is incompatible with this pipeline.
    #[error("unexpected chart structure: {0}")]
    ChartStructure(String),

    /// helm install/uninstall exited non-zero.
    #[error("{stderr}")]
    Release { stderr: String },

    /// The cluster API rejected an operation; carries its own status.
    #[error("cluster API error: {reason}")]
    ClusterApi { code: u16, reason: String },

    /// The cluster reported the namespace missing on a read.
    #[error("Namespace '{0}' not found")]
    NamespaceNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("values document error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
