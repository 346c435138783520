//! Serializable views of cluster state returned by the read operations.

use serde::{Deserialize, Serialize};

/// One pod in a namespace, reduced to name and phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodInfo {
    pub name: String,
    pub status: String,
}

/// One node, reduced to name and its latest reported condition type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
}

/// Aggregate view served by the cluster-info read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub nodes: Vec<NodeInfo>,
    pub namespaces: Vec<NamespaceInfo>,
}
