use crate::error::{Error, Result};

const SSH_PREFIX: &str = "git@github.com:";

/// Repository owner and name parsed from a git remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub owner: String,
    pub repo: String,
}

impl RemoteRef {
    /// Returns `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Extracts owner and repository from a GitHub remote URL.
///
/// Accepts SCP-style SSH (`git@github.com:owner/repo.git`) and any URL
/// containing `github.com`, in which case the last two path segments are
/// used. The `.git` suffix is optional in both forms.
pub fn parse_owner_repo(url: &str) -> Result<RemoteRef> {
    let url = url.trim();
    let unsupported = || Error::UnsupportedRemoteFormat(url.to_string());

    let (owner, repo) = if let Some(path) = url.strip_prefix(SSH_PREFIX) {
        let path = path.strip_suffix(".git").unwrap_or(path);
        path.split_once('/').ok_or_else(unsupported)?
    } else if url.contains("github.com") {
        let mut segments = url.trim_end_matches('/').rsplit('/');
        let repo = segments.next().ok_or_else(unsupported)?;
        let owner = segments.next().ok_or_else(unsupported)?;
        (owner, repo.strip_suffix(".git").unwrap_or(repo))
    } else {
        return Err(unsupported());
    };

    if owner.is_empty() || repo.is_empty() || repo.contains('/') || owner.contains(':') {
        return Err(unsupported());
    }

    Ok(RemoteRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
