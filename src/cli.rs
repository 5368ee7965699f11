//! CLI argument parsing and command dispatch

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::logging;

/// Repository Sync - Clone or update many git repositories at once
#[derive(Parser, Debug)]
#[command(name = "repo-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Also append log records to this file
    #[arg(long, global = true, value_name = "FILE", env = "REPO_SYNC_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone missing repositories and update existing ones
    Sync(commands::sync::SyncArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        logging::init(&self.log_level, self.log_file.as_deref())?;

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &self.color),
            Commands::Completions(args) => {
                commands::completions::execute(args)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
