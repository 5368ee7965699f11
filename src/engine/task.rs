//! Synchronization of a single repository.
//!
//! A task looks for the repository's working copy under the sync root. An
//! existing copy is fetched and hard-reset to the remote default branch, once.
//! A missing copy is cloned, retrying under the configured policy. Either way
//! the task ends with exactly one `SyncOutcome`; errors never escape.

use std::path::Path;
use std::thread;
use std::time::Instant;

use super::outcome::{SyncOutcome, SyncReport};
use super::report::Reporter;
use crate::config::SyncConfig;
use crate::repo_id::RepoId;
use crate::repository::RepositoryClient;
use crate::retry::RetryPolicy;

/// Clone or update one repository under `config.root()`.
pub fn sync_repository(
    repo: &RepoId,
    config: &SyncConfig,
    client: &dyn RepositoryClient,
    reporter: &dyn Reporter,
) -> SyncReport {
    let started = Instant::now();
    let target_dir = config.target_dir(repo.local_name());

    let outcome = if client.exists(&target_dir) {
        update(repo, &target_dir, client, reporter)
    } else {
        clone_with_retry(repo, &target_dir, config.retry(), client, reporter)
    };

    SyncReport {
        repo: repo.clone(),
        outcome,
        elapsed: started.elapsed(),
    }
}

fn update(
    repo: &RepoId,
    target_dir: &Path,
    client: &dyn RepositoryClient,
    reporter: &dyn Reporter,
) -> SyncOutcome {
    reporter.updating(repo, target_dir);

    match client
        .fetch_all(target_dir)
        .and_then(|()| client.hard_reset_to_remote_default(target_dir))
    {
        Ok(()) => SyncOutcome::Updated,
        Err(error) => SyncOutcome::UpdateFailed(error),
    }
}

fn clone_with_retry(
    repo: &RepoId,
    target_dir: &Path,
    policy: &RetryPolicy,
    client: &dyn RepositoryClient,
    reporter: &dyn Reporter,
) -> SyncOutcome {
    let mut attempt = 0;
    loop {
        attempt += 1;
        reporter.clone_attempt(repo, attempt, policy.max_attempts());

        let error = match client.clone_repo(repo, target_dir) {
            Ok(()) => return SyncOutcome::Cloned { attempts: attempt },
            Err(error) => error,
        };

        let pause = policy.pause_after(attempt);
        reporter.clone_attempt_failed(repo, attempt, &error, pause);
        match pause {
            Some(delay) => thread::sleep(delay),
            None => {
                return SyncOutcome::CloneExhausted {
                    attempts: attempt,
                    error,
                }
            }
        }
    }
}
