//! # Repository Sync CLI
//!
//! This is the binary entry point for the `repo-sync` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the selected command and mapping its result to an exit code.
//!
//! The synchronization logic lives in the `repo_sync` library crate; the
//! binary is a thin wrapper around it.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
