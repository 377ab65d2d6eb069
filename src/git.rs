use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Runs `git` with `args` inside `dir` and returns trimmed stdout on success.
///
/// Any failure, including a missing `git` binary, yields `None`.
fn git_output(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| debug!(error = %e, ?args, "Failed to spawn git"))
        .ok()?;

    if !output.status.success() {
        debug!(?args, status = %output.status, "git exited with failure");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Returns true if `dir` is inside a git work tree.
pub fn is_git_repository(dir: &Path) -> bool {
    git_output(dir, &["rev-parse", "--is-inside-work-tree"]).is_some_and(|out| out == "true")
}

/// Returns the top-level directory of the work tree containing `dir`.
pub fn repository_root(dir: &Path) -> Option<PathBuf> {
    git_output(dir, &["rev-parse", "--show-toplevel"])
        .filter(|out| !out.is_empty())
        .map(PathBuf::from)
}

/// Returns the URL of the named remote, or an empty string when it is not configured.
pub fn get_remote_url(dir: &Path, remote: &str) -> String {
    let key = format!("remote.{remote}.url");
    git_output(dir, &["config", "--get", &key]).unwrap_or_default()
}
