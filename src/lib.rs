//! # Repository Sync Library
//!
//! This library clones or updates a batch of git repositories into a single
//! directory. It is used by the `repo-sync` command-line tool, but the engine
//! can be embedded in other programs that need to mirror many repositories.
//!
//! ## Quick Example
//!
//! ```no_run
//! use repo_sync::config::SyncConfig;
//! use repo_sync::engine::SyncEngine;
//! use repo_sync::repo_list;
//!
//! let repos = repo_list::parse("https://github.com/rust-lang/log.git\n").unwrap();
//! let config = SyncConfig::new("mirrors").unwrap().with_concurrency_limit(8).unwrap();
//!
//! let reports = SyncEngine::new(config).run(&repos).unwrap();
//! assert_eq!(reports.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Identifiers (`repo_id`)**: a repository URL plus the local directory
//!   name derived from it.
//! - **Repository list (`repo_list`)**: reads the input file, skipping blanks
//!   and comments and rejecting entries that would share a directory.
//! - **Configuration (`config`, `retry`)**: the validated settings for a run:
//!   concurrency limit, clone retry policy, and sync root.
//! - **Repository client (`repository`, `git`)**: the clone/fetch/reset
//!   capabilities the engine relies on, backed by the system `git`.
//! - **Engine (`engine`)**: bounded-concurrency dispatch, the per-repository
//!   clone-or-update task, and the outcomes it reports.
//! - **Output (`output`)**: text and JSON summaries of a run.
//!
//! ## Execution Flow
//!
//! 1.  The repository list is parsed into `RepoId`s.
//! 2.  `SyncEngine::run` takes a permit for each repository in turn and starts
//!     its task on a worker thread, never more than the concurrency limit at
//!     once.
//! 3.  Each task updates an existing working copy once, or clones a missing
//!     one with retries, and reports exactly one `SyncOutcome`.
//! 4.  `run` returns after every task finished, with one report per input.

pub mod config;
pub mod engine;
pub mod error;
pub mod git;
pub mod output;
pub mod repo_id;
pub mod repo_list;
pub mod repository;
pub mod retry;

#[cfg(test)]
mod repo_id_proptest;
