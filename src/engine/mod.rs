//! # Synchronization Engine
//!
//! The engine takes an ordered list of repositories and brings each one onto
//! disk under the sync root, running at most `concurrency_limit` of them at
//! once.
//!
//! ## Structure
//!
//! - **`controller`**: `SyncEngine`, which owns the dispatch loop. It takes a
//!   permit from a fixed-size `PermitPool` before starting each task, so a full
//!   pool holds back dispatch, then waits for every task at a join barrier.
//! - **`task`**: the per-repository clone-or-update decision. Existing working
//!   copies are fetched and reset once; missing ones are cloned with bounded,
//!   sequential retries.
//! - **`permit`**: the counting pool. Permits are RAII guards, released
//!   exactly once even when a task panics.
//! - **`outcome`** and **`report`**: the values a task produces and the
//!   `Reporter` trait through which tasks announce progress.
//!
//! ## Working Directory
//!
//! No part of the engine, and no `RepositoryClient` it drives, changes the
//! process working directory. Every task works on the absolute path
//! `root/local_name`, which is what makes running tasks in parallel safe.

pub mod controller;
pub mod outcome;
pub mod permit;
pub mod report;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::SyncEngine;
pub use outcome::{SyncOutcome, SyncReport};
pub use permit::{Permit, PermitPool};
pub use report::{LogReporter, Reporter};
pub use task::sync_repository;
