//! shopdeploy-pipeline — the deployment orchestration core.
//!
//! External tools are modeled as capability traits with a single
//! process-invocation implementation each, so the pipelines can be
//! exercised against fakes:
//!
//! - **`helm`** — `PackageManager` (release install/uninstall)
//! - **`git`** — `VersionControl` (chart repository clone)
//! - **`scripts`** — `ScriptRunner` (secret replication, host
//!   registration)
//! - **`workspace`** — the disposable chart checkout
//! - **`orchestrator`** — the deploy/delete pipelines and the stateless
//!   read operations composed from the above

pub mod git;
pub mod helm;
pub mod orchestrator;
pub mod scripts;
pub mod workspace;

pub use git::{GitCli, VersionControl};
pub use helm::{HelmCli, PackageManager};
pub use orchestrator::Orchestrator;
pub use scripts::{ScriptRunner, ShellScriptRunner};
pub use workspace::ChartWorkspace;
