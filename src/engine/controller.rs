//! Bounded-concurrency dispatch of sync tasks.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::time::Instant;

use log::{debug, warn};

use super::outcome::{SyncOutcome, SyncReport};
use super::permit::PermitPool;
use super::report::{LogReporter, Reporter};
use super::task::sync_repository;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::repo_id::RepoId;
use crate::repository::{GitClient, RepositoryClient};

/// Synchronizes a list of repositories, at most `concurrency_limit` at a time.
pub struct SyncEngine {
    config: SyncConfig,
    client: Box<dyn RepositoryClient>,
    reporter: Box<dyn Reporter>,
}

impl SyncEngine {
    /// Creates an engine that uses the system `git` and reports through `log`.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            client: Box::new(GitClient::default()),
            reporter: Box::new(LogReporter),
        }
    }

    /// Replace the repository client.
    pub fn with_client(mut self, client: impl RepositoryClient + 'static) -> Self {
        self.client = Box::new(client);
        self
    }

    /// Replace the reporter that receives task events.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Synchronize every repository, returning one report per input.
    ///
    /// Reports are in completion order, not input order. Per-repository
    /// failures are contained in their reports; an `Err` means the engine
    /// itself malfunctioned.
    pub fn run(&self, repos: &[RepoId]) -> Result<Vec<SyncReport>> {
        let permits = PermitPool::new(self.config.concurrency_limit());
        self.run_with_permits(repos, &permits)
    }

    /// Dispatch loop shared by `run` and tests that inspect the permit pool.
    ///
    /// Permits are taken on the calling thread before each spawn, so a full
    /// pool stalls dispatch rather than queueing work. The scope end is the
    /// join barrier: it returns once every spawned task has finished.
    pub(crate) fn run_with_permits(
        &self,
        repos: &[RepoId],
        permits: &PermitPool,
    ) -> Result<Vec<SyncReport>> {
        if repos.is_empty() {
            warn!("No repositories to synchronize");
            return Ok(Vec::new());
        }

        let threads = worker_count(permits.capacity(), repos.len());
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("repo-sync-{}", i))
            .build()?;

        debug!(
            "Synchronizing {} repositories into {} with {} workers",
            repos.len(),
            self.config.root().display(),
            threads
        );

        let reports = Mutex::new(Vec::with_capacity(repos.len()));
        let mut dispatch = Ok(());

        workers.in_place_scope(|scope| {
            for repo in repos {
                let permit = match permits.acquire() {
                    Ok(permit) => permit,
                    Err(e) => {
                        dispatch = Err(e);
                        break;
                    }
                };

                let reports = &reports;
                scope.spawn(move |_| {
                    let _permit = permit;
                    let report = self.sync_contained(repo);
                    self.reporter.finished(&report);
                    reports
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .push(report);
                });
            }
        });
        dispatch?;

        debug!("Peak concurrent sync tasks: {}", permits.high_water_mark()?);

        reports.into_inner().map_err(|_| Error::LockPoisoned {
            context: "sync reports".to_string(),
        })
    }

    /// Run one task, turning a panic into an `Aborted` outcome for that
    /// repository alone.
    fn sync_contained(&self, repo: &RepoId) -> SyncReport {
        let started = Instant::now();
        panic::catch_unwind(AssertUnwindSafe(|| {
            sync_repository(
                repo,
                &self.config,
                self.client.as_ref(),
                self.reporter.as_ref(),
            )
        }))
        .unwrap_or_else(|payload| SyncReport {
            repo: repo.clone(),
            outcome: SyncOutcome::Aborted(Error::TaskPanicked {
                message: panic_message(payload.as_ref()),
            }),
            elapsed: started.elapsed(),
        })
    }
}

/// Threads to start: never more than there are repositories to work on.
fn worker_count(limit: usize, repos: usize) -> usize {
    limit.min(repos).max(1)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
