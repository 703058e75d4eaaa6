//! Commit hash lookup for the project being packaged.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Query the commit hash of `HEAD` in `dir`.
///
/// Every failure mode (git missing, not a repository, unreadable output)
/// yields `None` so that version resolution degrades instead of failing.
pub fn head_commit(dir: &Path) -> Option<String> {
  let output = Command::new("git")
    .args(["rev-parse", "HEAD"])
    .current_dir(dir)
    .output()
    .ok()?;

  if !output.status.success() {
    debug!(status = %output.status, dir = %dir.display(), "git rev-parse failed");
    return None;
  }

  let sha = String::from_utf8(output.stdout).ok()?.trim().to_string();
  if sha.is_empty() { None } else { Some(sha) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn head_commit_outside_a_repository_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(head_commit(dir.path()), None);
  }
}
