//! shopdeploy-cluster — cluster access for the deployment pipeline.
//!
//! Wraps everything that talks to the Kubernetes side of the system:
//!
//! - **`client`** — the `ClusterClient` capability trait and its kube-rs
//!   implementation, with structured API errors
//! - **`namespace`** — idempotent create/delete helpers on top of it
//! - **`probe`** — the `minikube status` availability probe that gates
//!   every mutating route

pub mod client;
pub mod namespace;
pub mod probe;
pub mod types;

pub use client::{ClusterClient, ClusterError, KubeClusterClient};
pub use probe::{MinikubeProber, Prober};
pub use types::{ClusterInfo, NamespaceInfo, NodeInfo, PodInfo};
