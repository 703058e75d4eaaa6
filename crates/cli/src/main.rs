use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod output;
mod run;

/// relkit - package build orchestrator
///
/// Resolves the release version, writes the generated version file, and
/// hands every packaging subcommand to the configured entry point.
#[derive(Parser)]
#[command(name = "relkit")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("RELKIT_BUILD_HASH"), ")"))]
pub struct Cli {
  /// Nightly build: date-stamped dev pre-release
  #[arg(long)]
  pub nightly: bool,

  /// Official/RC release build: pre-release suffix stripped
  #[arg(long, conflicts_with = "nightly")]
  pub release: bool,

  /// Path to the project manifest
  #[arg(short, long, default_value = "relkit.toml")]
  pub manifest: PathBuf,

  /// Resolve and report without writing files or invoking the entry point
  #[arg(long)]
  pub dry_run: bool,

  /// Arguments forwarded unchanged to the packaging entry point
  #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
  pub forwarded: Vec<OsString>,
}

fn main() -> Result<()> {
  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();
  run::cmd_run(&cli)
}
