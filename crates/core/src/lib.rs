//! relkit-core: Core logic for the relkit build orchestrator
//!
//! This crate provides manifest loading, version resolution, version-file
//! export, package metadata rendering, entry-point delegation, and the
//! post-clean artifact sweep.

mod clean;
mod delegate;
mod error;
mod export;
mod git;
mod manifest;
mod metadata;
mod version;

pub use clean::{CleanResult, CleanStats, clean_artifacts};
pub use delegate::{is_clean_command, run_entry_point};
pub use error::CoreError;
pub use export::export_version;
pub use git::head_commit;
pub use manifest::{Package, Packaging, ProjectManifest, Requirement};
pub use metadata::{METADATA_ENV, PackageMetadata, write_metadata};
pub use version::{BUILD_VERSION_ENV, BuildMode, UNKNOWN_SHA, VersionDescriptor, resolve_version};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
