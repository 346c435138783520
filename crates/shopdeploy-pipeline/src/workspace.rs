//! The disposable chart checkout.
//!
//! The workspace lives at one canonical path. Each materialization
//! destroys whatever is there (including a partial tree left by an
//! interrupted clone) and clones fresh; the checkout stays on disk
//! after a successful deploy.

use std::io;
use std::path::{Path, PathBuf};

use shopdeploy_core::error::DeployResult;
use tracing::debug;

use crate::git::VersionControl;

pub struct ChartWorkspace {
    root: PathBuf,
}

impl ChartWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replaces the checkout at the canonical path with a fresh clone of
    /// `url`.
    pub async fn materialize(&self, vc: &dyn VersionControl, url: &str) -> DeployResult<()> {
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => debug!(path = %self.root.display(), "previous checkout removed"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        vc.clone_repo(url, &self.root).await
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use shopdeploy_core::error::DeployError;

    use super::*;

    /// Fake clone that just creates the destination with a marker file.
    struct FakeGit {
        cloned_to: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl FakeGit {
        fn new(fail: bool) -> Self {
            Self {
                cloned_to: Mutex::new(vec![]),
                fail,
            }
        }
    }

    #[async_trait]
    impl VersionControl for FakeGit {
        async fn clone_repo(&self, _url: &str, dest: &Path) -> DeployResult<()> {
            if self.fail {
                return Err(DeployError::Clone {
                    stderr: "fatal: repository not found".into(),
                });
            }
            fs::create_dir_all(dest).unwrap();
            fs::write(dest.join("CLONED"), b"fresh").unwrap();
            self.cloned_to.lock().unwrap().push(dest.to_path_buf());
            Ok(())
        }
    }

    #[tokio::test]
    async fn materialize_replaces_a_stale_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("checkout");

        // Leftovers from a previous (possibly interrupted) run.
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("nested/stale.yaml"), b"old").unwrap();

        let git = FakeGit::new(false);
        let ws = ChartWorkspace::new(&root);
        ws.materialize(&git, "https://example.com/charts").await.unwrap();

        assert!(root.join("CLONED").exists());
        assert!(!root.join("nested").exists());
    }

    #[tokio::test]
    async fn materialize_works_when_nothing_exists_yet() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("never-created");

        let git = FakeGit::new(false);
        let ws = ChartWorkspace::new(&root);
        ws.materialize(&git, "https://example.com/charts").await.unwrap();
        assert!(root.join("CLONED").exists());
    }

    #[tokio::test]
    async fn clone_failure_carries_the_error_stream() {
        let dir = tempfile::tempdir().unwrap();
        let git = FakeGit::new(true);
        let ws = ChartWorkspace::new(dir.path().join("checkout"));

        let err = ws
            .materialize(&git, "https://example.com/charts")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("repository not found"));
    }
}
