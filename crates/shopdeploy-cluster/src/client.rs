//! The `ClusterClient` capability and its kube-rs implementation.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::{Client, ResourceExt};
use thiserror::Error;

use crate::types::{NodeInfo, PodInfo};

/// Errors surfaced by cluster operations.
///
/// `Api` carries the cluster's own status code and reason so callers can
/// make idempotency decisions (409 on create, 404 on delete) and pass
/// the code through to HTTP responses.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cluster API error: {reason}")]
    Api { code: u16, reason: String },

    #[error("cluster client error: {0}")]
    Client(String),
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => ClusterError::Api {
                code: resp.code,
                reason: resp.reason,
            },
            other => ClusterError::Client(other.to_string()),
        }
    }
}

/// Namespace/pod/node operations the pipeline needs from the cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn create_namespace(&self, name: &str) -> Result<(), ClusterError>;

    async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>, ClusterError>;

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClusterError>;

    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError>;
}

/// `ClusterClient` backed by a kube-rs client.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        self.namespaces()
            .create(&PostParams::default(), &namespace)
            .await?;
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError> {
        self.namespaces()
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>, ClusterError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods.list(&ListParams::default()).await?;
        Ok(list
            .items
            .into_iter()
            .map(|pod| {
                let status = pod
                    .status
                    .as_ref()
                    .and_then(|s| s.phase.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                PodInfo {
                    name: pod.name_any(),
                    status,
                }
            })
            .collect())
    }

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClusterError> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&ListParams::default()).await?;
        Ok(list
            .items
            .into_iter()
            .map(|node| {
                // The latest reported condition type stands in for a
                // node status summary.
                let status = node
                    .status
                    .as_ref()
                    .and_then(|s| s.conditions.as_ref())
                    .and_then(|conditions| conditions.last())
                    .map(|c| c.type_.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                NodeInfo {
                    name: node.name_any(),
                    status,
                }
            })
            .collect())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
        let list = self.namespaces().list(&ListParams::default()).await?;
        Ok(list.items.into_iter().map(|ns| ns.name_any()).collect())
    }
}
