//! # Completions Command Implementation
//!
//! Generates shell completion scripts for `repo-sync` with `clap_complete`.
//! The script is written to stdout; redirect it to wherever your shell loads
//! completions from.
//!
//! ```bash
//! repo-sync completions bash > ~/.local/share/bash-completion/completions/repo-sync
//! repo-sync completions zsh > ~/.zfunc/_repo-sync
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "repo-sync", &mut io::stdout());
    Ok(())
}
