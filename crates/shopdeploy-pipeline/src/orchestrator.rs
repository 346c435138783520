//! The deployment orchestrator.
//!
//! Composes the capabilities into two linear, strictly fail-fast
//! pipelines (deploy, delete) plus the stateless read operations. A
//! failing step aborts everything after it and nothing already done is
//! compensated; re-invocation is safe because the namespace operations
//! are idempotent.

use std::sync::Arc;

use shopdeploy_cluster::client::{ClusterClient, ClusterError};
use shopdeploy_cluster::types::{ClusterInfo, NamespaceInfo, PodInfo};
use shopdeploy_cluster::{namespace, Prober};
use shopdeploy_core::error::{DeployError, DeployResult};
use shopdeploy_core::types::DeploymentRequest;
use shopdeploy_core::{values, Config};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::git::VersionControl;
use crate::helm::PackageManager;
use crate::scripts::ScriptRunner;
use crate::workspace::ChartWorkspace;

pub struct Orchestrator {
    prober: Arc<dyn Prober>,
    cluster: Arc<dyn ClusterClient>,
    packages: Arc<dyn PackageManager>,
    version_control: Arc<dyn VersionControl>,
    scripts: Arc<dyn ScriptRunner>,
    config: Config,
    /// Serializes deploy runs: the chart workspace is a single shared
    /// path, so two interleaved materializations would corrupt both.
    deploy_lock: Mutex<()>,
}

fn cluster_err(err: ClusterError) -> DeployError {
    match err {
        ClusterError::Api { code, reason } => DeployError::ClusterApi { code, reason },
        ClusterError::Client(msg) => DeployError::ClusterApi {
            code: 500,
            reason: msg,
        },
    }
}

impl Orchestrator {
    pub fn new(
        prober: Arc<dyn Prober>,
        cluster: Arc<dyn ClusterClient>,
        packages: Arc<dyn PackageManager>,
        version_control: Arc<dyn VersionControl>,
        scripts: Arc<dyn ScriptRunner>,
        config: Config,
    ) -> Self {
        Self {
            prober,
            cluster,
            packages,
            version_control,
            scripts,
            config,
            deploy_lock: Mutex::new(()),
        }
    }

    /// On-demand availability check for the status page.
    pub async fn available(&self) -> bool {
        self.prober.probe().await
    }

    async fn gate_on_availability(&self) -> DeployResult<()> {
        if self.prober.probe().await {
            Ok(())
        } else {
            warn!("cluster runtime not reachable, refusing operation");
            Err(DeployError::ClusterUnavailable)
        }
    }

    /// Runs the deploy pipeline to completion.
    ///
    /// Sequence: probe, validate, ensure namespace, replicate secret,
    /// materialize chart checkout, rewrite values, register host,
    /// install release.
    pub async fn deploy(&self, request: &DeploymentRequest) -> DeployResult<()> {
        self.gate_on_availability().await?;
        let deployment = request.validate()?;
        let ns = deployment.namespace.as_str();
        info!(
            namespace = ns,
            api_image = %deployment.api_image,
            client_image = %deployment.client_image,
            "deploy pipeline starting"
        );

        let _serialized = self.deploy_lock.lock().await;

        namespace::ensure_created(self.cluster.as_ref(), ns)
            .await
            .map_err(cluster_err)?;

        self.scripts.run(&self.config.secret_script, ns).await?;
        info!(namespace = ns, "secret replicated");

        let workspace = ChartWorkspace::new(&self.config.workspace_dir);
        workspace
            .materialize(self.version_control.as_ref(), &self.config.chart_repo_url)
            .await?;

        values::apply_images(
            &self.config.values_path(),
            &deployment.api_image,
            &deployment.client_image,
            ns,
            &self.config.ingress_host,
        )?;
        info!(namespace = ns, "chart values updated");

        self.scripts.run(&self.config.hosts_script, ns).await?;
        info!(namespace = ns, "host resolution registered");

        self.packages
            .install(&self.config.release_name, &self.config.chart_path(), ns)
            .await?;

        info!(namespace = ns, "deploy pipeline completed");
        Ok(())
    }

    /// Runs the delete pipeline: uninstall the release, then remove the
    /// namespace. An uninstall failure aborts with the namespace left
    /// intact for inspection.
    pub async fn delete(&self, ns: &str) -> DeployResult<()> {
        self.gate_on_availability().await?;
        shopdeploy_core::types::validate_namespace(ns)?;
        info!(namespace = ns, "delete pipeline starting");

        self.packages
            .uninstall(&self.config.release_name, ns)
            .await?;

        namespace::ensure_deleted(self.cluster.as_ref(), ns)
            .await
            .map_err(cluster_err)?;

        info!(namespace = ns, "delete pipeline completed");
        Ok(())
    }

    /// Lists the pods of `ns` as name/phase pairs.
    pub async fn status(&self, ns: &str) -> DeployResult<Vec<PodInfo>> {
        self.gate_on_availability().await?;
        match self.cluster.list_pods(ns).await {
            Ok(pods) => Ok(pods),
            Err(ClusterError::Api { code: 404, .. }) => {
                Err(DeployError::NamespaceNotFound(ns.to_string()))
            }
            Err(err) => Err(cluster_err(err)),
        }
    }

    /// Lists all nodes and namespace names. Performs no availability
    /// probe, matching the rest of the read surface's historic shape.
    pub async fn cluster_info(&self) -> DeployResult<ClusterInfo> {
        let nodes = self.cluster.list_nodes().await.map_err(cluster_err)?;
        let namespaces = self
            .cluster
            .list_namespaces()
            .await
            .map_err(cluster_err)?
            .into_iter()
            .map(|name| NamespaceInfo { name })
            .collect();
        Ok(ClusterInfo { nodes, namespaces })
    }
}
