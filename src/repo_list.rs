//! Loading the list of repositories to synchronize.
//!
//! The list is a plain text file with one identifier per line. Surrounding
//! whitespace is trimmed, and blank lines and `#` comments are skipped. Every
//! remaining line must yield a usable local directory name, and no two entries
//! may share one: they would be cloned into the same directory concurrently.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::repo_id::RepoId;

/// Read and parse a repository list file.
pub fn load(path: &Path) -> Result<Vec<RepoId>> {
    let content = fs::read_to_string(path).map_err(|source| Error::RepoList {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Parse repository list content, preserving input order.
pub fn parse(content: &str) -> Result<Vec<RepoId>> {
    let mut repos = Vec::new();
    let mut seen: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let id = RepoId::parse(line)?;
        if let Some(first) = seen.get(id.local_name()) {
            return Err(Error::DuplicateLocalName {
                local_name: id.local_name().to_string(),
                first: first.clone(),
                second: id.to_string(),
            });
        }
        seen.insert(id.local_name().to_string(), id.to_string());
        repos.push(id);
    }

    Ok(repos)
}
