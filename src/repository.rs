//! # Repository Client
//!
//! The sync engine never talks to git directly. It depends on the
//! `RepositoryClient` trait, which captures the four capabilities a sync task
//! needs: checking for a local copy, cloning, fetching, and resetting to the
//! remote's default branch.
//!
//! `GitClient` is the production implementation and shells out to the system
//! `git` binary through the `git` module. Tests substitute mock clients to
//! script failures and count calls without touching the network.
//!
//! Every method takes the absolute path of the working copy it acts on.
//! Implementations must not rely on, or modify, the process working
//! directory: several tasks call into the same client concurrently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::git;
use crate::repo_id::RepoId;

/// Capabilities the sync engine needs from a version-control backend.
pub trait RepositoryClient: Send + Sync {
    /// Whether a local working copy exists at `target_dir`.
    fn exists(&self, target_dir: &Path) -> bool {
        target_dir.is_dir()
    }

    /// Create a new working copy of `repo` at `target_dir`.
    ///
    /// On failure, no partial working copy may remain at `target_dir`.
    fn clone_repo(&self, repo: &RepoId, target_dir: &Path) -> Result<()>;

    /// Fetch all refs from every remote of the working copy.
    fn fetch_all(&self, target_dir: &Path) -> Result<()>;

    /// Reset the working copy to the tip of the remote's default branch,
    /// discarding local modifications.
    fn hard_reset_to_remote_default(&self, target_dir: &Path) -> Result<()>;
}

/// A shared client, so callers can keep a handle on a client the engine owns.
impl<C: RepositoryClient + ?Sized> RepositoryClient for Arc<C> {
    fn exists(&self, target_dir: &Path) -> bool {
        (**self).exists(target_dir)
    }

    fn clone_repo(&self, repo: &RepoId, target_dir: &Path) -> Result<()> {
        (**self).clone_repo(repo, target_dir)
    }

    fn fetch_all(&self, target_dir: &Path) -> Result<()> {
        (**self).fetch_all(target_dir)
    }

    fn hard_reset_to_remote_default(&self, target_dir: &Path) -> Result<()> {
        (**self).hard_reset_to_remote_default(target_dir)
    }
}

/// The default implementation of `RepositoryClient`, which uses the system's
/// `git` command.
#[derive(Debug, Clone)]
pub struct GitClient {
    git: PathBuf,
}

impl GitClient {
    /// Create a client that invokes the given git executable.
    pub fn new(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new("git")
    }
}

impl RepositoryClient for GitClient {
    fn clone_repo(&self, repo: &RepoId, target_dir: &Path) -> Result<()> {
        git::clone(&self.git, repo.as_str(), target_dir)
    }

    fn fetch_all(&self, target_dir: &Path) -> Result<()> {
        git::fetch_all(&self.git, target_dir)
    }

    fn hard_reset_to_remote_default(&self, target_dir: &Path) -> Result<()> {
        let branch = git::remote_default_branch(&self.git, target_dir)?;
        git::reset_hard(&self.git, target_dir, &branch)
    }
}
