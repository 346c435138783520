//! Request types and field validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

/// DNS-1123 label: what the cluster accepts as a namespace name.
static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

/// A container image reference split into repository and tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    /// Parses `repository:tag`, splitting on the first `:`.
    /// Both halves must be non-empty.
    pub fn parse(s: &str) -> DeployResult<Self> {
        let (repository, tag) = s
            .split_once(':')
            .ok_or_else(|| DeployError::Validation(format!("invalid image reference '{s}': expected repository:tag")))?;
        if repository.is_empty() || tag.is_empty() {
            return Err(DeployError::Validation(format!(
                "invalid image reference '{s}': repository and tag must be non-empty"
            )));
        }
        Ok(Self {
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

/// Checks that `namespace` is a syntactically valid namespace name.
pub fn validate_namespace(namespace: &str) -> DeployResult<()> {
    if namespace.len() > 63 || !NAMESPACE_RE.is_match(namespace) {
        return Err(DeployError::Validation(format!(
            "invalid namespace '{namespace}': must be a DNS-1123 label"
        )));
    }
    Ok(())
}

/// Incoming deploy request, as received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub api_image: String,
    pub client_image: String,
    pub namespace: String,
}

impl DeploymentRequest {
    /// Validates all fields up front, before any collaborator is touched.
    pub fn validate(&self) -> DeployResult<ValidatedDeployment> {
        validate_namespace(&self.namespace)?;
        Ok(ValidatedDeployment {
            api_image: ImageRef::parse(&self.api_image)?,
            client_image: ImageRef::parse(&self.client_image)?,
            namespace: self.namespace.clone(),
        })
    }
}

/// A deploy request whose fields have passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedDeployment {
    pub api_image: ImageRef,
    pub client_image: ImageRef,
    pub namespace: String,
}
