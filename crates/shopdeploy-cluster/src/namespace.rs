//! Idempotent namespace lifecycle helpers.
//!
//! The pipeline may be re-invoked against the same namespace, and the
//! namespace lifecycle is not exclusively owned by this service, so a
//! conflict on create and a not-found on delete are both successes.

use tracing::{debug, info};

use crate::client::{ClusterClient, ClusterError};

/// Creates `namespace` if it does not already exist.
pub async fn ensure_created(
    cluster: &dyn ClusterClient,
    namespace: &str,
) -> Result<(), ClusterError> {
    match cluster.create_namespace(namespace).await {
        Ok(()) => {
            info!(namespace, "namespace created");
            Ok(())
        }
        Err(ClusterError::Api { code: 409, .. }) => {
            debug!(namespace, "namespace already exists");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Deletes `namespace`, treating an already-absent namespace as done.
pub async fn ensure_deleted(
    cluster: &dyn ClusterClient,
    namespace: &str,
) -> Result<(), ClusterError> {
    match cluster.delete_namespace(namespace).await {
        Ok(()) => {
            info!(namespace, "namespace deleted");
            Ok(())
        }
        Err(ClusterError::Api { code: 404, .. }) => {
            debug!(namespace, "namespace already absent");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::types::{NodeInfo, PodInfo};

    /// Fake cluster that tracks which namespaces exist.
    #[derive(Default)]
    struct FakeCluster {
        existing: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClusterClient for FakeCluster {
        async fn create_namespace(&self, name: &str) -> Result<(), ClusterError> {
            let mut existing = self.existing.lock().unwrap();
            if existing.iter().any(|n| n == name) {
                return Err(ClusterError::Api {
                    code: 409,
                    reason: "AlreadyExists".into(),
                });
            }
            existing.push(name.to_string());
            Ok(())
        }

        async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError> {
            let mut existing = self.existing.lock().unwrap();
            let before = existing.len();
            existing.retain(|n| n != name);
            if existing.len() == before {
                return Err(ClusterError::Api {
                    code: 404,
                    reason: "NotFound".into(),
                });
            }
            Ok(())
        }

        async fn list_pods(&self, _namespace: &str) -> Result<Vec<PodInfo>, ClusterError> {
            Ok(vec![])
        }

        async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClusterError> {
            Ok(vec![])
        }

        async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
            Ok(self.existing.lock().unwrap().clone())
        }
    }

    #[tokio::test]
    async fn ensure_created_twice_succeeds_and_leaves_one_namespace() {
        let cluster = FakeCluster::default();
        ensure_created(&cluster, "shop-1").await.unwrap();
        ensure_created(&cluster, "shop-1").await.unwrap();
        assert_eq!(cluster.list_namespaces().await.unwrap(), vec!["shop-1"]);
    }

    #[tokio::test]
    async fn ensure_deleted_of_absent_namespace_succeeds() {
        let cluster = FakeCluster::default();
        ensure_deleted(&cluster, "never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn other_api_errors_are_surfaced() {
        struct Failing;

        #[async_trait]
        impl ClusterClient for Failing {
            async fn create_namespace(&self, _name: &str) -> Result<(), ClusterError> {
                Err(ClusterError::Api {
                    code: 403,
                    reason: "Forbidden".into(),
                })
            }
            async fn delete_namespace(&self, _name: &str) -> Result<(), ClusterError> {
                Err(ClusterError::Api {
                    code: 500,
                    reason: "InternalError".into(),
                })
            }
            async fn list_pods(&self, _namespace: &str) -> Result<Vec<PodInfo>, ClusterError> {
                Ok(vec![])
            }
            async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ClusterError> {
                Ok(vec![])
            }
            async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
                Ok(vec![])
            }
        }

        let err = ensure_created(&Failing, "shop-1").await.unwrap_err();
        assert!(matches!(err, ClusterError::Api { code: 403, .. }));

        let err = ensure_deleted(&Failing, "shop-1").await.unwrap_err();
        assert!(matches!(err, ClusterError::Api { code: 500, .. }));
    }
}
