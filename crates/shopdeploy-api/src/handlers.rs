//! Route handlers.
//!
//! Success bodies are `{"status": …}` (or the raw payload for reads),
//! failures are `{"error": …}` with the status code derived from the
//! pipeline error class.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shopdeploy_core::error::DeployError;
use shopdeploy_core::types::DeploymentRequest;
use tracing::error;

use crate::ApiState;

fn status_for(err: &DeployError) -> StatusCode {
    match err {
        DeployError::ClusterUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DeployError::Validation(_) => StatusCode::BAD_REQUEST,
        DeployError::NamespaceNotFound(_) => StatusCode::NOT_FOUND,
        DeployError::ClusterApi { code, .. } => {
            StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: DeployError) -> (StatusCode, Json<serde_json::Value>) {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(%err, "pipeline step failed");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

/// GET / — minimal status page with the on-demand availability flag.
pub async fn index(State(state): State<ApiState>) -> Html<String> {
    let available = state.orchestrator.available().await;
    let flag = if available {
        "cluster available"
    } else {
        "cluster unavailable"
    };
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>shopdeploy</title></head>\
         <body><h1>shopdeploy</h1><p>{flag}</p></body></html>"
    ))
}

/// GET /get_images — fully qualified container image references.
pub async fn get_images(State(state): State<ApiState>) -> Json<Vec<String>> {
    match &state.registry {
        Some(registry) => Json(registry.container_images().await),
        None => Json(vec![]),
    }
}

/// POST /deploy — run the deploy pipeline.
pub async fn deploy(
    State(state): State<ApiState>,
    Json(request): Json<DeploymentRequest>,
) -> impl IntoResponse {
    match state.orchestrator.deploy(&request).await {
        Ok(()) => Json(json!({ "status": "Deployment created successfully" })).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    pub namespace: String,
}

/// POST /delete — run the delete pipeline.
pub async fn delete(
    State(state): State<ApiState>,
    Json(request): Json<DeleteRequest>,
) -> impl IntoResponse {
    match state.orchestrator.delete(&request.namespace).await {
        Ok(()) => Json(json!({ "status": "Deployment and namespace deleted successfully" }))
            .into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub namespace: String,
}

/// GET /status?namespace= — pod name/phase pairs.
pub async fn status(
    State(state): State<ApiState>,
    Query(query): Query<StatusQuery>,
) -> impl IntoResponse {
    match state.orchestrator.status(&query.namespace).await {
        Ok(pods) => Json(pods).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /cluster_info — nodes and namespaces.
pub async fn cluster_info(State(state): State<ApiState>) -> impl IntoResponse {
    match state.orchestrator.cluster_info().await {
        Ok(info) => Json(info).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}
