//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_list("https://example.com/a.git\n");
//!     fixture.command().arg("sync").arg("--list").arg(fixture.list_path());
//! }
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, should_skip_network_tests, TestFixture, Upstream};
}

/// Name of the repository list file written by [`TestFixture::with_list`].
pub const LIST_FILE: &str = "repos.txt";

/// Whether a usable `git` binary is on the PATH.
///
/// Tests that drive real git return early when this is false.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Whether tests that reach the network should be skipped.
///
/// Set `SKIP_NETWORK_TESTS` to skip them even with the `integration-tests`
/// feature enabled.
pub fn should_skip_network_tests() -> bool {
    std::env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// A temporary directory holding a repository list and a sync root.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the repository list file with the given content.
    pub fn with_list(self, content: &str) -> Self {
        self.temp_dir
            .child(LIST_FILE)
            .write_str(content)
            .expect("Failed to write repository list");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the repository list file.
    pub fn list_path(&self) -> PathBuf {
        self.temp_dir.path().join(LIST_FILE)
    }

    /// Directory repositories are synchronized into.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("mirror")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-sync");
        cmd.current_dir(self.path());
        cmd
    }

    /// A `sync` command over this fixture's list and root, with no backoff.
    pub fn sync_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--color")
            .arg("never")
            .arg("sync")
            .arg("--list")
            .arg(self.list_path())
            .arg("--root")
            .arg(self.root())
            .arg("--backoff")
            .arg("0");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository standing in for a remote.
pub struct Upstream {
    dir: PathBuf,
}

impl Upstream {
    /// Create a repository at `dir` whose default branch is `branch`, with one
    /// commit adding `README.md`.
    pub fn create(dir: &Path, branch: &str) -> Self {
        fs::create_dir_all(dir).expect("Failed to create upstream directory");
        let upstream = Self {
            dir: dir.to_path_buf(),
        };
        upstream.git(&["init", "--quiet"]);
        upstream.git(&["symbolic-ref", "HEAD", &format!("refs/heads/{}", branch)]);
        upstream.commit("README.md", "v1\n");
        upstream
    }

    /// Write `file` and commit it.
    pub fn commit(&self, file: &str, content: &str) {
        fs::write(self.dir.join(file), content).expect("Failed to write upstream file");
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "-m", &format!("update {}", file)]);
    }

    /// The identifier to put in a repository list.
    pub fn url(&self) -> String {
        self.dir.to_string_lossy().into_owned()
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}
