pub mod config;
pub mod error;
pub mod types;
pub mod values;

pub use config::Config;
pub use error::{DeployError, DeployResult};
pub use types::{DeploymentRequest, ImageRef, ValidatedDeployment};
