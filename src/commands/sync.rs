//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which reads a repository list
//! and brings every listed repository onto disk under the sync root.
//!
//! ## Functionality
//!
//! - **Clone or update**: repositories without a local directory are cloned,
//!   with up to `--retries` attempts and a `--backoff` pause between them.
//!   Existing directories are fetched and hard-reset to the remote's default
//!   branch, discarding local changes.
//! - **Bounded concurrency**: at most `--threads` repositories are processed
//!   at the same time.
//! - **Summary**: once every repository has finished, a summary is printed to
//!   stdout, as text or as JSON with `--json`.
//!
//! The command exits with status 1 if any repository failed to synchronize.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;

use repo_sync::config::{SyncConfig, DEFAULT_CONCURRENCY};
use repo_sync::engine::SyncEngine;
use repo_sync::output::{self, OutputConfig, RunSummary};
use repo_sync::repo_list;
use repo_sync::repository::GitClient;
use repo_sync::retry::{Backoff, RetryPolicy, DEFAULT_MAX_ATTEMPTS};

/// How the pause between clone attempts grows.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackoffStrategy {
    /// Wait the same time after every failure
    Fixed,
    /// Double the wait after every failure, up to five minutes
    Exponential,
}

/// Clone missing repositories and update existing ones
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// File listing one repository URL per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    #[arg(short, long, value_name = "FILE")]
    pub list: PathBuf,

    /// Maximum number of repositories synchronized at the same time.
    #[arg(short, long, value_name = "N", env = "REPO_SYNC_THREADS", default_value_t = DEFAULT_CONCURRENCY)]
    pub threads: usize,

    /// Maximum number of clone attempts per repository.
    #[arg(short, long, value_name = "N", env = "REPO_SYNC_RETRIES", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub retries: u32,

    /// Seconds to wait between failed clone attempts.
    #[arg(long, value_name = "SECS", env = "REPO_SYNC_BACKOFF", default_value_t = 10.0)]
    pub backoff: f64,

    /// How the wait between clone attempts grows.
    #[arg(long, value_enum, default_value = "fixed")]
    pub backoff_strategy: BackoffStrategy,

    /// Directory repositories are cloned into.
    ///
    /// Defaults to the current directory. Created if it does not exist.
    #[arg(short = 'C', long, value_name = "DIR", env = "REPO_SYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// Git executable to run.
    #[arg(long, value_name = "PATH", env = "REPO_SYNC_GIT", default_value = "git")]
    pub git: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, color: &str) -> Result<ExitCode> {
    let repos = repo_list::load(&args.list)
        .with_context(|| format!("Failed to load repository list {}", args.list.display()))?;
    SyncConfig::check_concurrency_limit(args.threads)?;
    let backoff = backoff(args.backoff_strategy, args.backoff)?;

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    fs::create_dir_all(&root)
        .with_context(|| format!("Failed to create sync root {}", root.display()))?;

    let config = SyncConfig::new(&root)?
        .with_concurrency_limit(args.threads)?
        .with_retry_policy(RetryPolicy::new(args.retries, backoff));

    info!(
        "Synchronizing {} repositories into {} ({} at a time, {} clone attempts each)",
        repos.len(),
        config.root().display(),
        config.concurrency_limit(),
        config.retry().max_attempts()
    );

    let engine = SyncEngine::new(config).with_client(GitClient::new(args.git));
    let reports = engine.run(&repos)?;

    if args.json {
        println!("{}", output::render_json(&reports)?);
    } else if !reports.is_empty() {
        let output_config = OutputConfig::from_env_and_flag(color);
        print!("{}", output::render_text(&output_config, &reports));
    }

    if RunSummary::from_reports(&reports).has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn backoff(strategy: BackoffStrategy, seconds: f64) -> Result<Backoff> {
    let delay = Duration::try_from_secs_f64(seconds).with_context(|| {
        format!(
            "Invalid backoff '{}': expected a non-negative number of seconds",
            seconds
        )
    })?;

    Ok(match strategy {
        BackoffStrategy::Fixed => Backoff::Fixed(delay),
        BackoffStrategy::Exponential => Backoff::exponential(delay),
    })
}
