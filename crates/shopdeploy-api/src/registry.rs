//! GitHub container-registry read-through.
//!
//! A stateless lookup of the account's container packages; any failure
//! (network, auth, deserialization) degrades to an empty list rather
//! than failing the page that embeds it.

use serde::Deserialize;
use tracing::warn;

const USER_AGENT: &str = concat!("shopdeploy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    package_type: String,
}

pub struct GithubRegistry {
    http: reqwest::Client,
    username: String,
    token: String,
}

impl GithubRegistry {
    pub fn new(username: String, token: String) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            username,
            token,
        }
    }

    /// Lists the account's container packages as pullable
    /// `ghcr.io/<user>/<name>:latest` references.
    pub async fn container_images(&self) -> Vec<String> {
        let url = format!(
            "https://api.github.com/users/{}/packages?package_type=container",
            self.username
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await;

        let packages: Vec<Package> = match response {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(packages) => packages,
                Err(err) => {
                    warn!(error = %err, "package listing could not be decoded");
                    return vec![];
                }
            },
            Ok(resp) => {
                warn!(status = %resp.status(), "package listing rejected");
                return vec![];
            }
            Err(err) => {
                warn!(error = %err, "package listing request failed");
                return vec![];
            }
        };

        packages
            .into_iter()
            .filter(|p| p.package_type == "container")
            .map(|p| format!("ghcr.io/{}/{}:latest", self.username, p.name))
            .collect()
    }
}
