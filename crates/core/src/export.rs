//! Generated version-file export.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::version::VersionDescriptor;
use crate::{ProjectManifest, Result};

/// Overwrite the generated version file with the resolved identity.
///
/// The file carries exactly two constants consumed by the packaged sources:
/// the version string and the commit hash. Always a full overwrite, no merge
/// or backup; filesystem errors propagate and abort the run.
pub fn export_version(manifest: &ProjectManifest, root: &Path, desc: &VersionDescriptor) -> Result<PathBuf> {
  let path = root.join(manifest.version_file());

  let contents = format!(
    "pub const VERSION: &str = \"{}\";\npub const GIT_VERSION: &str = \"{}\";\n",
    desc.version,
    desc.sha()
  );
  fs::write(&path, contents)?;

  info!(path = %path.display(), version = %desc.version, "wrote version file");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::version::BuildMode;

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

  fn descriptor(version: &str, sha: Option<&str>) -> VersionDescriptor {
    VersionDescriptor {
      version: version.to_string(),
      commit_sha: sha.map(String::from),
      mode: BuildMode::Default,
    }
  }

  #[test]
  fn writes_exactly_two_assignments() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("datakit")).unwrap();

    let desc = descriptor("0.4.0-alpha.0+f13a5cf", Some("f13a5cf9c080"));
    let path = export_version(&manifest(), root.path(), &desc).unwrap();

    let written = fs::read_to_string(path).unwrap();
    assert_eq!(
      written,
      "pub const VERSION: &str = \"0.4.0-alpha.0+f13a5cf\";\npub const GIT_VERSION: &str = \"f13a5cf9c080\";\n"
    );
  }

  #[test]
  fn unresolved_hash_is_written_as_unknown() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("datakit")).unwrap();

    let path = export_version(&manifest(), root.path(), &descriptor("0.4.0", None)).unwrap();

    let written = fs::read_to_string(path).unwrap();
    assert!(written.contains("pub const GIT_VERSION: &str = \"Unknown\";"));
  }

  #[test]
  fn overwrites_a_previous_export() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("datakit")).unwrap();

    export_version(&manifest(), root.path(), &descriptor("0.3.0", None)).unwrap();
    let path = export_version(&manifest(), root.path(), &descriptor("0.4.0", None)).unwrap();

    let written = fs::read_to_string(path).unwrap();
    assert!(written.contains("\"0.4.0\""));
    assert!(!written.contains("\"0.3.0\""));
  }

  #[test]
  fn missing_parent_directory_is_an_error() {
    let root = TempDir::new().unwrap();
    // package_dir intentionally not created
    let result = export_version(&manifest(), root.path(), &descriptor("0.4.0", None));
    assert!(result.is_err());
  }
}
