//! Mock collaborators shared by the engine's unit tests.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::outcome::SyncReport;
use super::report::Reporter;
use crate::error::{Error, Result};
use crate::repo_id::RepoId;
use crate::repository::RepositoryClient;

/// Scriptable `RepositoryClient` that records every call.
///
/// Successful clones create the target directory, so a second run over the
/// same root sees existing working copies.
#[derive(Default)]
pub struct MockClient {
    clone_failures: u32,
    always_failing: HashSet<String>,
    panicking: HashSet<String>,
    fail_fetch: bool,
    fail_reset: bool,
    hold_for: Duration,
    clone_calls: Arc<Mutex<Vec<PathBuf>>>,
    attempts_by_target: Arc<Mutex<HashMap<PathBuf, u32>>>,
    fetch_calls: Arc<Mutex<Vec<PathBuf>>>,
    reset_calls: Arc<Mutex<Vec<PathBuf>>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `n` clone attempts of every repository.
    pub fn failing_clones(mut self, n: u32) -> Self {
        self.clone_failures = n;
        self
    }

    /// Fail every clone of the repository with this local name.
    pub fn always_failing(mut self, local_name: &str) -> Self {
        self.always_failing.insert(local_name.to_string());
        self
    }

    /// Panic inside every clone of the repository with this local name.
    pub fn panicking(mut self, local_name: &str) -> Self {
        self.panicking.insert(local_name.to_string());
        self
    }

    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn failing_resets(mut self) -> Self {
        self.fail_reset = true;
        self
    }

    /// Make every operation take `duration`, to keep tasks overlapping.
    pub fn holding_for(mut self, duration: Duration) -> Self {
        self.hold_for = duration;
        self
    }

    pub fn clone_calls(&self) -> usize {
        self.clone_calls.lock().unwrap().len()
    }

    pub fn clone_targets(&self) -> Vec<PathBuf> {
        self.clone_calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.lock().unwrap().len()
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls.lock().unwrap().len()
    }

    /// Most operations observed running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.hold_for.is_zero() {
            thread::sleep(self.hold_for);
        }
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RepositoryClient for MockClient {
    fn clone_repo(&self, repo: &RepoId, target_dir: &Path) -> Result<()> {
        if self.panicking.contains(repo.local_name()) {
            panic!("simulated crash cloning {}", repo.local_name());
        }
        self.enter();
        self.clone_calls.lock().unwrap().push(target_dir.to_path_buf());
        let attempt = {
            let mut attempts = self.attempts_by_target.lock().unwrap();
            let count = attempts.entry(target_dir.to_path_buf()).or_insert(0);
            *count += 1;
            *count
        };

        let result = if attempt <= self.clone_failures
            || self.always_failing.contains(repo.local_name())
        {
            Err(Error::GitClone {
                url: repo.to_string(),
                message: format!("simulated network failure on attempt {}", attempt),
                hint: None,
            })
        } else {
            fs::create_dir_all(target_dir).map_err(Error::from)
        };
        self.leave();
        result
    }

    fn fetch_all(&self, target_dir: &Path) -> Result<()> {
        self.enter();
        self.fetch_calls.lock().unwrap().push(target_dir.to_path_buf());
        self.leave();
        if self.fail_fetch {
            return Err(Error::GitCommand {
                command: "fetch --all --prune".to_string(),
                path: target_dir.to_path_buf(),
                stderr: "simulated fetch failure".to_string(),
            });
        }
        Ok(())
    }

    fn hard_reset_to_remote_default(&self, target_dir: &Path) -> Result<()> {
        self.reset_calls.lock().unwrap().push(target_dir.to_path_buf());
        if self.fail_reset {
            return Err(Error::GitCommand {
                command: "reset --hard origin/main".to_string(),
                path: target_dir.to_path_buf(),
                stderr: "simulated reset failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Reporter that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    pauses: Mutex<Vec<Duration>>,
    updates: Mutex<Vec<PathBuf>>,
    finished: Mutex<Vec<(String, &'static str)>>,
}

impl RecordingReporter {
    /// Number of backoff pauses tasks announced.
    pub fn pauses(&self) -> usize {
        self.pauses.lock().unwrap().len()
    }

    pub fn updates(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// `(local_name, status)` for every finished repository, sorted.
    pub fn finished_reports(&self) -> Vec<(String, &'static str)> {
        let mut finished = self.finished.lock().unwrap().clone();
        finished.sort();
        finished
    }
}

impl Reporter for RecordingReporter {
    fn clone_attempt_failed(
        &self,
        _repo: &RepoId,
        _attempt: u32,
        _error: &Error,
        retry_in: Option<Duration>,
    ) {
        if let Some(delay) = retry_in {
            self.pauses.lock().unwrap().push(delay);
        }
    }

    fn updating(&self, _repo: &RepoId, target_dir: &Path) {
        self.updates.lock().unwrap().push(target_dir.to_path_buf());
    }

    fn finished(&self, report: &SyncReport) {
        self.finished
            .lock()
            .unwrap()
            .push((report.repo.local_name().to_string(), report.outcome.status()));
    }
}
