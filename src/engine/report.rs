//! Progress and outcome events emitted by sync tasks.
//!
//! Tasks call a `Reporter` from their worker threads as things happen, so
//! implementations must be thread-safe. `LogReporter` forwards every event to
//! the `log` facade; the CLI configures where those records end up.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use super::outcome::{SyncOutcome, SyncReport};
use crate::error::Error;
use crate::repo_id::RepoId;

/// Receives events from running sync tasks.
pub trait Reporter: Send + Sync {
    /// A clone attempt is about to start. `attempt` is 1-based.
    fn clone_attempt(&self, _repo: &RepoId, _attempt: u32, _max_attempts: u32) {}

    /// A clone attempt failed. `retry_in` is the pause before the next
    /// attempt, or `None` when no attempts remain.
    fn clone_attempt_failed(
        &self,
        _repo: &RepoId,
        _attempt: u32,
        _error: &Error,
        _retry_in: Option<Duration>,
    ) {
    }

    /// An existing working copy is about to be updated.
    fn updating(&self, _repo: &RepoId, _target_dir: &Path) {}

    /// A repository reached its terminal outcome.
    fn finished(&self, report: &SyncReport);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn clone_attempt(&self, repo: &RepoId, attempt: u32, max_attempts: u32) {
        (**self).clone_attempt(repo, attempt, max_attempts);
    }

    fn clone_attempt_failed(
        &self,
        repo: &RepoId,
        attempt: u32,
        error: &Error,
        retry_in: Option<Duration>,
    ) {
        (**self).clone_attempt_failed(repo, attempt, error, retry_in);
    }

    fn updating(&self, repo: &RepoId, target_dir: &Path) {
        (**self).updating(repo, target_dir);
    }

    fn finished(&self, report: &SyncReport) {
        (**self).finished(report);
    }
}

/// Reports every event through the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn clone_attempt(&self, repo: &RepoId, attempt: u32, max_attempts: u32) {
        info!(
            "Attempting to clone {}, try {} of {}",
            repo, attempt, max_attempts
        );
    }

    fn clone_attempt_failed(
        &self,
        repo: &RepoId,
        attempt: u32,
        error: &Error,
        retry_in: Option<Duration>,
    ) {
        match retry_in {
            Some(delay) => warn!(
                "Failed to clone {} on attempt {}, retrying in {}s: {}",
                repo,
                attempt,
                delay.as_secs_f64(),
                error
            ),
            None => error!(
                "Failed to clone {} on attempt {}: {}",
                repo, attempt, error
            ),
        }
    }

    fn updating(&self, repo: &RepoId, target_dir: &Path) {
        info!("Updating {} in {}", repo, target_dir.display());
    }

    fn finished(&self, report: &SyncReport) {
        let repo = &report.repo;
        match &report.outcome {
            SyncOutcome::Cloned { attempts } => {
                info!("Successfully cloned {} (attempts: {})", repo, attempts)
            }
            SyncOutcome::Updated => info!("Successfully updated {}", repo),
            SyncOutcome::UpdateFailed(e) => error!("Failed to update {}: {}", repo, e),
            SyncOutcome::CloneExhausted { attempts, .. } => {
                error!("Max retries exceeded for {} after {} attempts", repo, attempts)
            }
            SyncOutcome::Aborted(e) => error!("Gave up on {}: {}", repo, e),
        }
    }
}
