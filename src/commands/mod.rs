//! # CLI Command Implementations
//!
//! Each subcommand of `repo-sync` lives in its own module, containing an
//! `Args` struct derived with `clap` and an `execute` function that performs
//! the command by calling into the `repo_sync` library.

pub mod completions;
pub mod sync;
