//! Package metadata handed to the packaging entry point.

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::version::VersionDescriptor;
use crate::{ProjectManifest, Result};

/// Environment variable pointing the entry point at the metadata file.
pub const METADATA_ENV: &str = "RELKIT_METADATA";

/// Metadata describing one package build, rendered for the entry point.
#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
  pub name: String,
  pub version: String,
  pub git_version: String,
  pub requires: Vec<String>,
}

impl PackageMetadata {
  /// Render metadata from the manifest and the resolved version, applying
  /// environment pins to the declared requirements.
  pub fn render(manifest: &ProjectManifest, desc: &VersionDescriptor) -> Result<Self> {
    Ok(Self {
      name: manifest.package.name.clone(),
      version: desc.version.clone(),
      git_version: desc.sha().to_string(),
      requires: manifest.resolved_requirements()?,
    })
  }
}

/// Write the metadata as pretty JSON to a temporary file.
///
/// The file lives only as long as the returned handle; the caller keeps it
/// alive across the entry-point invocation and the path travels in
/// `RELKIT_METADATA`.
pub fn write_metadata(metadata: &PackageMetadata) -> Result<NamedTempFile> {
  let file = tempfile::Builder::new()
    .prefix("relkit-metadata-")
    .suffix(".json")
    .tempfile()?;
  serde_json::to_writer_pretty(file.as_file(), metadata)?;

  debug!(path = %file.path().display(), "wrote package metadata");
  Ok(file)
}
