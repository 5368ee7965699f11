//! Terminal results of synchronizing one repository.

use std::time::Duration;

use crate::error::Error;
use crate::repo_id::RepoId;

/// How a single repository's synchronization ended.
#[derive(Debug)]
pub enum SyncOutcome {
    /// No local copy existed and a clone succeeded on attempt `attempts`.
    Cloned { attempts: u32 },
    /// The existing local copy was fetched and reset to the remote default branch.
    Updated,
    /// Fetching or resetting the existing local copy failed. Never retried.
    UpdateFailed(Error),
    /// Every allowed clone attempt failed; `error` is from the last one.
    CloneExhausted { attempts: u32, error: Error },
    /// The task panicked; siblings kept running.
    Aborted(Error),
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Cloned { .. } | SyncOutcome::Updated)
    }

    /// Short machine-friendly status name.
    pub fn status(&self) -> &'static str {
        match self {
            SyncOutcome::Cloned { .. } => "cloned",
            SyncOutcome::Updated => "updated",
            SyncOutcome::UpdateFailed(_) => "update-failed",
            SyncOutcome::CloneExhausted { .. } => "clone-exhausted",
            SyncOutcome::Aborted(_) => "aborted",
        }
    }

    /// Number of network attempts made: clone attempts, or 1 for an update.
    /// Unknown for an aborted task, reported as 0.
    pub fn attempts(&self) -> u32 {
        match self {
            SyncOutcome::Cloned { attempts } | SyncOutcome::CloneExhausted { attempts, .. } => {
                *attempts
            }
            SyncOutcome::Updated | SyncOutcome::UpdateFailed(_) => 1,
            SyncOutcome::Aborted(_) => 0,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            SyncOutcome::UpdateFailed(error)
            | SyncOutcome::CloneExhausted { error, .. }
            | SyncOutcome::Aborted(error) => Some(error),
            SyncOutcome::Cloned { .. } | SyncOutcome::Updated => None,
        }
    }
}

/// A repository paired with its outcome.
#[derive(Debug)]
pub struct SyncReport {
    pub repo: RepoId,
    pub outcome: SyncOutcome,
    /// Wall-clock time the task spent, including backoff pauses.
    pub elapsed: Duration,
}
