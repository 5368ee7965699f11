//! # Sync Configuration
//!
//! `SyncConfig` is the resolved, validated configuration for one
//! synchronization run. Front ends (the CLI, or a program embedding the
//! library) build it through the methods here so that validation lives in one
//! place: a configuration that exists is one the engine can run with.
//!
//! | setting             | default                          |
//! |---------------------|----------------------------------|
//! | `concurrency_limit` | 4                                |
//! | `retry`             | 3 attempts, fixed 10 second pause |
//! | `root`              | supplied by the caller           |

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// Default number of repositories synchronized at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Resolved configuration for one synchronization run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    concurrency_limit: usize,
    retry: RetryPolicy,
    root: PathBuf,
}

impl SyncConfig {
    /// Create a configuration rooted at `root` with default limits.
    ///
    /// The root must be an existing directory. It is made absolute here, once,
    /// so that later path joins never depend on the process working directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        if !root.is_dir() {
            return Err(Error::InvalidConfig {
                message: format!("sync root {} is not a directory", root.display()),
            });
        }

        Ok(Self {
            concurrency_limit: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
            root,
        })
    }

    /// Set the maximum number of concurrent sync tasks. Must be at least 1.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Result<Self> {
        Self::check_concurrency_limit(limit)?;
        self.concurrency_limit = limit;
        Ok(self)
    }

    /// Check a concurrency limit without building a configuration, for front
    /// ends that want to reject it before touching the filesystem.
    pub fn check_concurrency_limit(limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(Error::InvalidConfig {
                message: "concurrency limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the retry policy applied to clones.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Absolute directory that local repository names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the working copy for `local_name`.
    pub fn target_dir(&self, local_name: &str) -> PathBuf {
        self.root.join(local_name)
    }
}
