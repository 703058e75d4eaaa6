//! Error types for relkit-core

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to read manifest '{path}': {message}")]
  ManifestRead { path: PathBuf, message: String },

  #[error("failed to parse manifest '{path}': {message}")]
  ManifestParse { path: PathBuf, message: String },

  #[error("invalid manifest: {0}")]
  ManifestInvalid(String),

  #[error("invalid version requirement '{value}' for '{name}': {message}")]
  InvalidRequirement {
    name: String,
    value: String,
    message: String,
  },

  #[error("invalid pinned version '{value}' from ${var}: {message}")]
  InvalidPin {
    var: String,
    value: String,
    message: String,
  },

  #[error("failed to delete {path}: {message}")]
  Delete { path: PathBuf, message: String },

  #[error("failed to launch entry point '{program}': {message}")]
  EntryPointLaunch { program: String, message: String },

  #[error("entry point '{program}' exited with {status}")]
  EntryPointFailed { program: String, status: ExitStatus },
}
