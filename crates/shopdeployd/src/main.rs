//! shopdeployd — the deployment service daemon.
//!
//! Single binary that wires the capabilities together:
//! - kube-rs cluster client
//! - minikube availability prober
//! - helm / git / script process wrappers
//! - orchestrator + REST API
//!
//! # Usage
//!
//! ```text
//! shopdeployd --port 8080
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shopdeploy_api::registry::GithubRegistry;
use shopdeploy_api::{build_router, ApiState};
use shopdeploy_cluster::{KubeClusterClient, MinikubeProber};
use shopdeploy_core::Config;
use shopdeploy_pipeline::{GitCli, HelmCli, Orchestrator, ShellScriptRunner};
use tracing::info;

#[derive(Parser)]
#[command(name = "shopdeployd", about = "Local-cluster deployment service")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shopdeployd=debug,shopdeploy=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    info!(
        chart_repo = %config.chart_repo_url,
        workspace = %config.workspace_dir.display(),
        release = %config.release_name,
        "configuration loaded"
    );

    let kube_client = kube::Client::try_default()
        .await
        .context("no usable kubeconfig; the cluster client cannot be constructed")?;
    info!("cluster client initialized");

    let registry = match (&config.github_username, &config.github_token) {
        (Some(username), Some(token)) => Some(Arc::new(GithubRegistry::new(
            username.clone(),
            token.clone(),
        ))),
        _ => {
            info!("GitHub credentials not set; image listing disabled");
            None
        }
    };

    let orchestrator = Orchestrator::new(
        Arc::new(MinikubeProber::new()),
        Arc::new(KubeClusterClient::new(kube_client)),
        Arc::new(HelmCli::new()),
        Arc::new(GitCli::new()),
        Arc::new(ShellScriptRunner),
        config,
    );
    info!("orchestrator initialized");

    let router = build_router(ApiState {
        orchestrator: Arc::new(orchestrator),
        registry,
    });

    let addr = SocketAddr::new(cli.bind, cli.port);
    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("shopdeploy daemon stopped");
    Ok(())
}
