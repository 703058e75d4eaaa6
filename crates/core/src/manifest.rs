//! Project manifest describing the package being orchestrated.
//!
//! The manifest is declarative data loaded from `relkit.toml`: the identity
//! and layout of the packaged project plus how packaging work is delegated.
//! It is immutable after load; every relative path inside it resolves
//! against the manifest file's parent directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Declarative description of the packaged project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
  pub package: Package,
  #[serde(default)]
  pub packaging: Packaging,
}

/// The `[package]` section: identity and layout of the packaged project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
  pub name: String,
  /// Base version, including any pre-release tag (e.g. `0.4.0-alpha.0`).
  pub version: semver::Version,
  /// Directory holding the package sources and compiled extension artifacts.
  pub package_dir: PathBuf,
  /// Generated version file; defaults to `<package_dir>/version.rs`.
  #[serde(default)]
  pub version_file: Option<PathBuf>,
  /// Runtime requirements declared to the packaging entry point.
  #[serde(default)]
  pub requires: Vec<Requirement>,
}

/// A single runtime requirement of the packaged project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
  pub name: String,
  /// Version requirement; `*` accepts any version.
  #[serde(default = "default_version_req")]
  pub version: String,
  /// Environment variable that, when set, pins this requirement exactly.
  #[serde(default)]
  pub pin_env: Option<String>,
}

/// The `[packaging]` section: delegation target and clean targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Packaging {
  /// Packaging entry point argv; forwarded arguments are appended to it.
  pub entry_point: Vec<String>,
  /// Build directories removed (best-effort) by the clean sweep.
  pub build_dirs: Vec<PathBuf>,
  /// File extensions treated as compiled extension artifacts.
  pub artifact_extensions: Vec<String>,
}

fn default_version_req() -> String {
  "*".to_string()
}

impl Default for Packaging {
  fn default() -> Self {
    Self {
      entry_point: vec!["cargo".to_string()],
      build_dirs: vec![PathBuf::from("build")],
      artifact_extensions: vec!["so".to_string(), "dylib".to_string(), "dll".to_string()],
    }
  }
}

impl ProjectManifest {
  /// Load a manifest from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path).map_err(|e| CoreError::ManifestRead {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;

    let manifest: Self = toml::from_str(&raw).map_err(|e| CoreError::ManifestParse {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;

    manifest.validate()?;
    Ok(manifest)
  }

  fn validate(&self) -> Result<()> {
    if !self.package.version.build.is_empty() {
      return Err(CoreError::ManifestInvalid(format!(
        "package.version '{}' must not carry build metadata; it is appended at resolution time",
        self.package.version
      )));
    }
    if self.packaging.entry_point.is_empty() {
      return Err(CoreError::ManifestInvalid(
        "packaging.entry_point must name a program".to_string(),
      ));
    }
    Ok(())
  }

  /// Project root for all relative paths: the manifest's parent directory.
  pub fn root_dir(manifest_path: &Path) -> Result<PathBuf> {
    let parent = manifest_path.parent().filter(|p| !p.as_os_str().is_empty());
    let root = parent.unwrap_or_else(|| Path::new("."));
    Ok(dunce::canonicalize(root)?)
  }

  /// Path of the generated version file, relative to the project root.
  pub fn version_file(&self) -> PathBuf {
    self
      .package
      .version_file
      .clone()
      .unwrap_or_else(|| self.package.package_dir.join("version.rs"))
  }

  /// Resolve all requirements, applying environment pins.
  pub fn resolved_requirements(&self) -> Result<Vec<String>> {
    self.package.requires.iter().map(Requirement::resolve).collect()
  }
}

impl Requirement {
  /// Requirement string handed to the packaging entry point.
  ///
  /// When `pin_env` names a set environment variable, the requirement is
  /// pinned to exactly that version instead of the declared range.
  pub fn resolve(&self) -> Result<String> {
    if let Some(var) = &self.pin_env {
      if let Ok(value) = std::env::var(var) {
        let exact = semver::Version::parse(&value).map_err(|e| CoreError::InvalidPin {
          var: var.clone(),
          value: value.clone(),
          message: e.to_string(),
        })?;
        return Ok(format!("{} ={}", self.name, exact));
      }
    }

    if self.version == "*" {
      return Ok(self.name.clone());
    }

    let req = semver::VersionReq::parse(&self.version).map_err(|e| CoreError::InvalidRequirement {
      name: self.name.clone(),
      value: self.version.clone(),
      message: e.to_string(),
    })?;
    Ok(format!("{} {}", self.name, req))
  }
}
