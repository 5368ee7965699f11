//! # Error Handling
//!
//! This module defines the centralized error type for `repo-sync`. It uses
//! `thiserror` to build a single `Error` enum covering every failure mode the
//! library can report, each variant carrying enough context to be useful in a
//! log line or the end-of-run summary.
//!
//! Errors fall into three groups:
//!
//! - **Per-repository errors** (`GitClone`, `GitCommand`, `DefaultBranch`):
//!   produced by the repository client. The engine never propagates these; it
//!   folds them into a `SyncOutcome` for the affected repository.
//! - **Configuration errors** (`InvalidRepoId`, `RepoList`, `DuplicateLocalName`,
//!   `InvalidConfig`): fatal to a run and raised before anything is dispatched.
//! - **Engine errors** (`LockPoisoned`, `WorkerPool`): a malfunction in the
//!   concurrency machinery itself. These are always surfaced to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repo-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// `git clone` failed for a repository.
    ///
    /// Includes an optional hint when the failure looks like an
    /// authentication problem.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git command run inside an existing working copy failed.
    #[error("Git command failed in {}: {command} - {stderr}", path.display())]
    GitCommand {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// The remote's default branch could not be determined.
    #[error("Cannot resolve default branch of origin in {}: {message}", path.display())]
    DefaultBranch { path: PathBuf, message: String },

    /// A repository identifier from which no local directory name can be derived.
    #[error("Invalid repository identifier '{id}': {message}")]
    InvalidRepoId { id: String, message: String },

    /// The repository list could not be read.
    #[error("Cannot read repository list {}: {source}", path.display())]
    RepoList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two identifiers would be synchronized into the same directory.
    #[error("Repositories '{first}' and '{second}' both map to local directory '{local_name}'")]
    DuplicateLocalName {
        local_name: String,
        first: String,
        second: String,
    },

    /// A configuration value is out of range or otherwise unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A mutex guarding engine state has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// The worker pool that runs sync tasks could not be created.
    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    /// A sync task panicked before producing an outcome.
    #[error("Sync task panicked: {message}")]
    TaskPanicked { message: String },

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool {
            message: err.to_string(),
        }
    }
}
