//! Version resolution for a single orchestrator invocation.

use std::path::Path;

use chrono::Local;
use semver::Version;

use crate::git;

/// Environment variable overriding the default-mode version verbatim.
pub const BUILD_VERSION_ENV: &str = "RELKIT_BUILD_VERSION";

/// String form of an unresolved commit hash.
pub const UNKNOWN_SHA: &str = "Unknown";

/// Which release channel this invocation builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
  #[default]
  Default,
  Nightly,
  Release,
}

impl BuildMode {
  /// Mode selected by the mutually exclusive CLI flags.
  pub fn from_flags(nightly: bool, release: bool) -> Self {
    debug_assert!(!(nightly && release), "flags are mutually exclusive");
    match (nightly, release) {
      (true, _) => Self::Nightly,
      (_, true) => Self::Release,
      _ => Self::Default,
    }
  }
}

/// The resolved version identity of one invocation.
///
/// Derived once per run, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
  pub version: String,
  pub commit_sha: Option<String>,
  pub mode: BuildMode,
}

impl VersionDescriptor {
  /// Commit hash, or `"Unknown"` when resolution failed.
  pub fn sha(&self) -> &str {
    self.commit_sha.as_deref().unwrap_or(UNKNOWN_SHA)
  }

  /// First seven characters of the commit hash, when resolved.
  pub fn short_sha(&self) -> Option<&str> {
    self.commit_sha.as_deref().map(short)
  }
}

fn short(sha: &str) -> &str {
  &sha[..7.min(sha.len())]
}

/// Resolve the version for this invocation.
///
/// The commit hash query never fails the resolution; worst case is an
/// unresolved hash and an un-suffixed version.
pub fn resolve_version(base: &Version, mode: BuildMode, root_dir: &Path) -> VersionDescriptor {
  resolve_with_sha(base, mode, git::head_commit(root_dir))
}

fn resolve_with_sha(base: &Version, mode: BuildMode, commit_sha: Option<String>) -> VersionDescriptor {
  let version = match mode {
    BuildMode::Nightly => {
      let stamp = Local::now().format("%Y%m%d");
      format!("{}.{}.{}-dev.{}", base.major, base.minor, base.patch, stamp)
    }
    BuildMode::Release => format!("{}.{}.{}", base.major, base.minor, base.patch),
    BuildMode::Default => match std::env::var(BUILD_VERSION_ENV) {
      Ok(explicit) if !explicit.is_empty() => explicit,
      _ => match &commit_sha {
        Some(sha) => format!("{}+{}", base, short(sha)),
        None => base.to_string(),
      },
    },
  };

  VersionDescriptor {
    version,
    commit_sha,
    mode,
  }
}
