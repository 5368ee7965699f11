//! Repository identifiers and local directory name derivation

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Suffix conventionally carried by bare repository URLs.
const GIT_SUFFIX: &str = ".git";

/// An identifier locating a remote repository, usually a URL.
///
/// The raw text is handed to git unchanged. The `local_name` is the directory,
/// relative to the sync root, that the repository is cloned into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    raw: String,
    local_name: String,
}

impl RepoId {
    /// Parse an identifier, deriving its local name.
    ///
    /// Fails if no usable directory name can be derived from the last path
    /// segment.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let local_name = derive_local_name(raw).ok_or_else(|| Error::InvalidRepoId {
            id: redact(raw),
            message: "no directory name can be derived from the last path segment".to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            local_name: local_name.to_string(),
        })
    }

    /// The identifier exactly as it should be passed to git.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The directory name this repository is synchronized into.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

/// Displays the identifier with any embedded password masked.
impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(&self.raw))
    }
}

/// Derive the local directory name for a repository identifier.
///
/// Takes the last segment after `/` (or `:` for scp-like `host:repo.git`
/// addresses), ignoring trailing slashes, and strips a trailing `.git`.
pub fn derive_local_name(id: &str) -> Option<&str> {
    let trimmed = id.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next()?;
    let name = segment.strip_suffix(GIT_SUFFIX).unwrap_or(segment);

    if name.is_empty() || name == "." || name == ".." || name.contains(['\\', '\0']) {
        return None;
    }
    Some(name)
}

/// Mask the password of an HTTP(S) URL so credentials never reach logs.
///
/// Identifiers that are not URLs (scp-like addresses, local paths) are
/// returned unchanged.
pub fn redact(id: &str) -> String {
    match Url::parse(id) {
        Ok(mut url) if url.password().is_some() => {
            // set_password only fails for URLs that cannot carry credentials,
            // which is impossible once a password was parsed
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => id.to_string(),
    }
}
