//! Service configuration, loaded from the environment.

use std::path::PathBuf;

/// Everything the pipeline needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote chart repository cloned on every deploy.
    pub chart_repo_url: String,
    /// Canonical local checkout path, destroyed and replaced each run.
    pub workspace_dir: PathBuf,
    /// Chart directory inside the checkout.
    pub chart_subdir: String,
    /// Name of the helm release managed by this service.
    pub release_name: String,
    /// Hostname written into the chart's ingress values.
    pub ingress_host: String,
    /// Script that copies the pre-provisioned secret into a namespace.
    pub secret_script: PathBuf,
    /// Script that registers the namespace hostname locally.
    pub hosts_script: PathBuf,
    /// GitHub account whose container packages are listed; registry
    /// lookups are disabled when unset.
    pub github_username: Option<String>,
    pub github_token: Option<String>,
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Reads configuration from the environment, falling back to the
    /// defaults of the reference deployment.
    pub fn from_env() -> Self {
        let scripts_dir = PathBuf::from(env_or("SHOPDEPLOY_SCRIPTS_DIR", "."));
        Self {
            chart_repo_url: env_or(
                "SHOPDEPLOY_CHART_REPO",
                "https://github.com/Kuper-S/helm-ShopApp",
            ),
            workspace_dir: PathBuf::from(env_or("SHOPDEPLOY_WORKSPACE", "/tmp/helm-ShopApp")),
            chart_subdir: env_or("SHOPDEPLOY_CHART_SUBDIR", "Shop-Helm"),
            release_name: env_or("SHOPDEPLOY_RELEASE", "custom-app"),
            ingress_host: env_or("SHOPDEPLOY_INGRESS_HOST", "client.example.com"),
            secret_script: scripts_dir.join("copy_secret.sh"),
            hosts_script: scripts_dir.join("update_hosts.sh"),
            github_username: std::env::var("GITHUB_USERNAME").ok(),
            github_token: std::env::var("GITHUB_TOKEN").ok(),
        }
    }

    /// The chart directory inside the current checkout.
    pub fn chart_path(&self) -> PathBuf {
        self.workspace_dir.join(&self.chart_subdir)
    }

    /// The values file consumed by chart templating.
    pub fn values_path(&self) -> PathBuf {
        self.chart_path().join("values.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_workspace_and_subdir() {
        let cfg = Config {
            chart_repo_url: "https://example.com/charts".into(),
            workspace_dir: PathBuf::from("/tmp/checkout"),
            chart_subdir: "Shop-Helm".into(),
            release_name: "custom-app".into(),
            ingress_host: "client.example.com".into(),
            secret_script: PathBuf::from("./copy_secret.sh"),
            hosts_script: PathBuf::from("./update_hosts.sh"),
            github_username: None,
            github_token: None,
        };
        assert_eq!(cfg.chart_path(), PathBuf::from("/tmp/checkout/Shop-Helm"));
        assert_eq!(
            cfg.values_path(),
            PathBuf::from("/tmp/checkout/Shop-Helm/values.yaml")
        );
    }
}
