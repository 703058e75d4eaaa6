//! Delegation to the packaging entry point.
//!
//! The entry point is an opaque external command; the orchestrator never
//! interprets packaging subcommands beyond spotting `clean` so the artifact
//! sweep can run afterwards.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::metadata::METADATA_ENV;
use crate::{CoreError, ProjectManifest, Result};

/// True when the forwarded arguments select the packaging `clean` command.
pub fn is_clean_command(forwarded: &[OsString]) -> bool {
  forwarded
    .iter()
    .find(|arg| !arg.to_string_lossy().starts_with('-'))
    .is_some_and(|arg| arg.to_string_lossy() == "clean")
}

/// Invoke the packaging entry point with the forwarded arguments appended.
///
/// Runs synchronously in the project root with inherited stdio; the path of
/// the rendered metadata file is exposed through `RELKIT_METADATA`. A spawn
/// failure or non-zero exit is a hard error. No retries.
pub fn run_entry_point(
  manifest: &ProjectManifest,
  root: &Path,
  forwarded: &[OsString],
  metadata_path: &Path,
) -> Result<()> {
  // Validated non-empty at manifest load.
  let (program, leading) = manifest
    .packaging
    .entry_point
    .split_first()
    .ok_or_else(|| CoreError::ManifestInvalid("packaging.entry_point must name a program".to_string()))?;

  info!(program = %program, args = ?forwarded, "delegating to packaging entry point");

  let mut command = Command::new(program);
  command
    .args(leading)
    .args(forwarded)
    .current_dir(root)
    .env(METADATA_ENV, metadata_path);

  debug!(cwd = %root.display(), "spawning entry point");

  let status = command.status().map_err(|e| CoreError::EntryPointLaunch {
    program: program.clone(),
    message: e.to_string(),
  })?;

  if !status.success() {
    return Err(CoreError::EntryPointFailed {
      program: program.clone(),
      status,
    });
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
  }

  #[test]
  fn clean_is_detected_as_first_non_flag_argument() {
    assert!(is_clean_command(&args(&["clean"])));
    assert!(is_clean_command(&args(&["--quiet", "clean"])));
    assert!(!is_clean_command(&args(&["build"])));
    assert!(!is_clean_command(&args(&["build", "clean"])));
    assert!(!is_clean_command(&args(&[])));
  }

  #[cfg(unix)]
  mod unix {
    use tempfile::TempDir;

    use super::*;

    fn manifest(entry_point: &[&str]) -> ProjectManifest {
      toml::from_str(&format!(
        r#"
          [package]
          name = "datakit"
          version = "0.4.0"
          package_dir = "datakit"

          [packaging]
          entry_point = [{}]
        "#,
        entry_point.iter().map(|s| format!("\"{}\"", s)).collect::<Vec<_>>().join(", ")
      ))
      .unwrap()
    }

    #[test]
    fn successful_entry_point_is_ok() {
      let root = TempDir::new().unwrap();
      let manifest = manifest(&["/bin/sh", "-c", "exit 0"]);
      let metadata = root.path().join("metadata.json");

      run_entry_point(&manifest, root.path(), &args(&[]), &metadata).unwrap();
    }

    #[test]
    fn failing_entry_point_reports_status() {
      let root = TempDir::new().unwrap();
      let manifest = manifest(&["/bin/sh", "-c", "exit 3"]);
      let metadata = root.path().join("metadata.json");

      let err = run_entry_point(&manifest, root.path(), &args(&[]), &metadata).unwrap_err();
      assert!(matches!(err, CoreError::EntryPointFailed { .. }));
    }

    #[test]
    fn missing_program_reports_launch_failure() {
      let root = TempDir::new().unwrap();
      let manifest = manifest(&["/nonexistent/packager"]);
      let metadata = root.path().join("metadata.json");

      let err = run_entry_point(&manifest, root.path(), &args(&[]), &metadata).unwrap_err();
      assert!(matches!(err, CoreError::EntryPointLaunch { .. }));
    }
  }
}
