//! Implementation of the orchestrator run.
//!
//! Version resolution and export always complete before the packaging entry
//! point is invoked, so the generated version file is visible to any build
//! step that compiles the package during the same run.

use std::time::Instant;

use anyhow::{Context, Result};
use relkit_core::{
  BuildMode, PackageMetadata, ProjectManifest, clean_artifacts, export_version, is_clean_command,
  resolve_version, run_entry_point, write_metadata,
};
use tracing::debug;

use crate::Cli;
use crate::output::{format_bytes, format_duration, print_info, print_stat, print_success, print_warning};

pub fn cmd_run(cli: &Cli) -> Result<()> {
  let manifest = ProjectManifest::load(&cli.manifest)
    .with_context(|| format!("failed to load {}", cli.manifest.display()))?;
  let root = ProjectManifest::root_dir(&cli.manifest).context("failed to resolve project root")?;
  debug!(root = %root.display(), "resolved project root");

  let mode = BuildMode::from_flags(cli.nightly, cli.release);
  let desc = resolve_version(&manifest.package.version, mode, &root);

  print_info(&format!("Building {} {}", manifest.package.name, desc.version));
  print_stat("Commit", desc.sha());
  if desc.commit_sha.is_none() {
    print_warning("commit hash could not be resolved");
  }

  if cli.dry_run {
    print_info("Dry run - nothing written, entry point not invoked");
    print_stat("Version file", &manifest.version_file().display().to_string());
    return Ok(());
  }

  let version_file = export_version(&manifest, &root, &desc).context("failed to write version file")?;
  print_stat("Version file", &version_file.display().to_string());

  let metadata = PackageMetadata::render(&manifest, &desc).context("failed to render package metadata")?;
  // Keep the handle alive until delegation finishes; the file is gone after.
  let metadata_file = write_metadata(&metadata).context("failed to write package metadata")?;

  let start = Instant::now();
  run_entry_point(&manifest, &root, &cli.forwarded, metadata_file.path())
    .context("packaging entry point failed")?;

  if is_clean_command(&cli.forwarded) {
    let result = clean_artifacts(&manifest, &root, false).context("artifact sweep failed")?;
    for path in &result.deleted_paths {
      println!("removing '{}'", path.display());
    }

    println!();
    if result.deleted_paths.is_empty() {
      print_info("Nothing left to clean");
    } else {
      print_success("Clean complete!");
      print_stat("Artifacts removed", &result.stats.artifacts_removed.to_string());
      print_stat("Build dirs removed", &result.stats.build_dirs_removed.to_string());
      print_stat("Space freed", &format_bytes(result.stats.bytes_freed));
    }
  }

  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}
