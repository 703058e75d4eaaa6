//! Post-clean sweep of compiled extension artifacts and build directories.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{CoreError, ProjectManifest, Result};

/// Counters for one clean sweep.
#[derive(Debug, Default, serde::Serialize)]
pub struct CleanStats {
  pub artifacts_removed: usize,
  pub build_dirs_removed: usize,
  pub bytes_freed: u64,
}

/// Outcome of one clean sweep.
#[derive(Debug, serde::Serialize)]
pub struct CleanResult {
  pub stats: CleanStats,
  pub deleted_paths: Vec<PathBuf>,
}

fn dir_size(path: &Path) -> u64 {
  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter_map(|e| e.metadata().ok())
    .map(|m| m.len())
    .sum()
}

fn is_artifact(path: &Path, extensions: &[String]) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|ext| extensions.iter().any(|known| known == ext))
}

/// Remove compiled extension artifacts beneath the package directory, then
/// remove the configured build directories.
///
/// A failed artifact deletion aborts the sweep; build-directory removal is
/// best-effort and only logged on failure. Running over an already-clean
/// tree removes nothing and succeeds.
pub fn clean_artifacts(manifest: &ProjectManifest, root: &Path, dry_run: bool) -> Result<CleanResult> {
  let mut stats = CleanStats::default();
  let mut deleted_paths = Vec::new();

  let package_dir = root.join(&manifest.package.package_dir);
  if package_dir.exists() {
    for entry in WalkDir::new(&package_dir).into_iter().filter_map(|e| e.ok()) {
      if !entry.file_type().is_file() {
        continue;
      }
      let path = entry.path();
      if !is_artifact(path, &manifest.packaging.artifact_extensions) {
        continue;
      }

      let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
      info!(path = %path.display(), dry_run, "removing extension artifact");
      if !dry_run {
        fs::remove_file(path).map_err(|e| CoreError::Delete {
          path: path.to_path_buf(),
          message: e.to_string(),
        })?;
      }

      stats.artifacts_removed += 1;
      stats.bytes_freed += size;
      deleted_paths.push(path.to_path_buf());
    }
  }

  for build_dir in &manifest.packaging.build_dirs {
    let path = root.join(build_dir);
    if !path.exists() {
      continue;
    }

    let size = dir_size(&path);
    info!(path = %path.display(), dry_run, "removing build directory");
    if !dry_run {
      if let Err(e) = fs::remove_dir_all(&path) {
        warn!(path = %path.display(), error = %e, "failed to remove build directory");
        continue;
      }
    }

    stats.build_dirs_removed += 1;
    stats.bytes_freed += size;
    deleted_paths.push(path);
  }

  Ok(CleanResult { stats, deleted_paths })
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn manifest() -> ProjectManifest {
    toml::from_str(
      r#"
        [package]
        name = "datakit"
        version = "0.4.0-alpha.0"
        package_dir = "datakit"
      "#,
    )
    .unwrap()
  }

  /// Lay out a dirty tree: sources, nested compiled artifacts, build dir.
  fn dirty_tree() -> TempDir {
    let root = TempDir::new().unwrap();
    let pkg = root.path().join("datakit");
    fs::create_dir_all(pkg.join("io")).unwrap();
    fs::write(pkg.join("lib.rs"), "pub mod io;\n").unwrap();
    fs::write(pkg.join("_ext.so"), vec![0u8; 64]).unwrap();
    fs::write(pkg.join("io").join("_io_ext.so"), vec![0u8; 128]).unwrap();
    fs::create_dir_all(root.path().join("build").join("tmp")).unwrap();
    fs::write(root.path().join("build").join("tmp").join("obj.o"), vec![0u8; 32]).unwrap();
    root
  }

  #[test]
  fn removes_artifacts_and_build_dir_but_keeps_sources() {
    let root = dirty_tree();
    let result = clean_artifacts(&manifest(), root.path(), false).unwrap();

    assert_eq!(result.stats.artifacts_removed, 2);
    assert_eq!(result.stats.build_dirs_removed, 1);
    assert_eq!(result.stats.bytes_freed, 64 + 128 + 32);
    assert!(root.path().join("datakit").join("lib.rs").exists());
    assert!(!root.path().join("datakit").join("_ext.so").exists());
    assert!(!root.path().join("datakit").join("io").join("_io_ext.so").exists());
    assert!(!root.path().join("build").exists());
  }

  #[test]
  fn second_run_is_a_no_op() {
    let root = dirty_tree();
    clean_artifacts(&manifest(), root.path(), false).unwrap();

    let again = clean_artifacts(&manifest(), root.path(), false).unwrap();
    assert_eq!(again.stats.artifacts_removed, 0);
    assert_eq!(again.stats.build_dirs_removed, 0);
    assert!(again.deleted_paths.is_empty());
  }

  #[test]
  fn dry_run_reports_without_deleting() {
    let root = dirty_tree();
    let result = clean_artifacts(&manifest(), root.path(), true).unwrap();

    assert_eq!(result.stats.artifacts_removed, 2);
    assert_eq!(result.stats.build_dirs_removed, 1);
    assert!(root.path().join("datakit").join("_ext.so").exists());
    assert!(root.path().join("build").exists());
  }

  #[test]
  fn missing_package_dir_is_not_an_error() {
    let root = TempDir::new().unwrap();
    let result = clean_artifacts(&manifest(), root.path(), false).unwrap();
    assert_eq!(result.stats.artifacts_removed, 0);
  }
}
