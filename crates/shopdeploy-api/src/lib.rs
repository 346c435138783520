//! shopdeploy-api — REST surface for the deployment orchestrator.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Status page with cluster-availability flag |
//! | GET | `/get_images` | Container images from the GitHub registry |
//! | POST | `/deploy` | Run the deploy pipeline |
//! | POST | `/delete` | Run the delete pipeline |
//! | GET | `/status?namespace=` | Pod name/phase pairs for a namespace |
//! | GET | `/cluster_info` | Nodes and namespaces |

pub mod handlers;
pub mod registry;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use shopdeploy_pipeline::Orchestrator;

use crate::registry::GithubRegistry;

/// Shared state cloned into every handler.
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    /// Absent when no GitHub credentials were configured; `get_images`
    /// then answers with an empty list.
    pub registry: Option<Arc<GithubRegistry>>,
}

/// Build the complete router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/get_images", get(handlers::get_images))
        .route("/deploy", post(handlers::deploy))
        .route("/delete", post(handlers::delete))
        .route("/status", get(handlers::status))
        .route("/cluster_info", get(handlers::cluster_info))
        .with_state(state)
}
