//! Thin wrappers over the system `git` binary.
//!
//! Every command that operates on an existing working copy is issued with
//! `git -C <dir>`, and clones name their target directory explicitly. Nothing
//! here changes the process working directory, so any number of these calls
//! can run concurrently.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::repo_id::redact;

/// Remote whose default branch working copies are reset to.
const ORIGIN: &str = "origin";

/// Clone `url` into `target_dir`.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
///
/// A failed clone never leaves a partial directory behind, so the next
/// attempt starts from scratch.
pub fn clone(git: &Path, url: &str, target_dir: &Path) -> Result<()> {
    let shown_url = redact(url);

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let output = git_command(git)
        .args(["clone", "--", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: shown_url.clone(),
            message: e.to_string(),
            hint: None,
        })?;
    log_output(&shown_url, &output);

    if output.status.success() {
        return Ok(());
    }

    if target_dir.exists() {
        if let Err(e) = fs::remove_dir_all(target_dir) {
            warn!(
                "Failed to remove partial clone {}: {}",
                target_dir.display(),
                e
            );
        }
    }

    let stderr = String::from_utf8_lossy(&output.stderr).replace(url, &shown_url);
    let hint = if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository: SSH key loaded in \
             ssh-agent, git credentials configured, or a personal access token set up"
                .to_string(),
        )
    } else {
        None
    };

    Err(Error::GitClone {
        url: shown_url,
        message: stderr.trim().to_string(),
        hint,
    })
}

/// Fetch all remotes of the working copy at `dir`, pruning deleted refs.
pub fn fetch_all(git: &Path, dir: &Path) -> Result<()> {
    run_in(git, dir, &["fetch", "--all", "--prune"]).map(|_| ())
}

/// Resolve the branch `origin/HEAD` points at, e.g. `origin/main`.
///
/// When the symbolic ref is missing (for instance in copies created by
/// `git init` + `git remote add`), it is refreshed from the remote first.
pub fn remote_default_branch(git: &Path, dir: &Path) -> Result<String> {
    let head_ref = format!("refs/remotes/{}/HEAD", ORIGIN);
    let query = ["symbolic-ref", "--quiet", "--short", head_ref.as_str()];

    let stdout = match run_in(git, dir, &query) {
        Ok(stdout) => stdout,
        Err(_) => {
            debug!(
                "[{}] origin/HEAD not set, asking the remote for its default branch",
                dir.display()
            );
            run_in(git, dir, &["remote", "set-head", ORIGIN, "--auto"]).map_err(|e| {
                Error::DefaultBranch {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            run_in(git, dir, &query).map_err(|e| Error::DefaultBranch {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?
        }
    };

    let branch = stdout.trim();
    if branch.is_empty() {
        return Err(Error::DefaultBranch {
            path: dir.to_path_buf(),
            message: "origin/HEAD resolved to an empty name".to_string(),
        });
    }
    Ok(branch.to_string())
}

/// Hard-reset the working copy at `dir` to `target`, discarding local changes.
pub fn reset_hard(git: &Path, dir: &Path, target: &str) -> Result<()> {
    run_in(git, dir, &["reset", "--hard", target]).map(|_| ())
}

/// Run a git subcommand inside `dir`, returning its stdout.
fn run_in(git: &Path, dir: &Path, args: &[&str]) -> Result<String> {
    let mut cmd = git_command(git);
    // Never fall through to a repository enclosing the checkout
    if let Some(parent) = dir.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }
    let output = cmd
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            path: dir.to_path_buf(),
            stderr: e.to_string(),
        })?;
    log_output(&dir.display().to_string(), &output);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: args.join(" "),
            path: dir.to_path_buf(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// A git command that fails instead of prompting for credentials, since a
/// prompt from one of several concurrent tasks would stall the whole run.
fn git_command(git: &Path) -> Command {
    let mut cmd = Command::new(git);
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn log_output(label: &str, output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout)
        .lines()
        .chain(String::from_utf8_lossy(&output.stderr).lines())
    {
        let line = line.trim();
        if !line.is_empty() {
            debug!("[{}] {}", label, line);
        }
    }
}
