//! Build script to capture the orchestrator's own git commit hash.

use std::process::Command;

fn main() {
  // Re-run if git HEAD changes
  println!("cargo:rerun-if-changed=.git/HEAD");
  println!("cargo:rerun-if-changed=.git/refs/heads/");

  let hash = Command::new("git")
    .args(["rev-parse", "--short=7", "HEAD"])
    .output()
    .ok()
    .filter(|o| o.status.success())
    .and_then(|o| String::from_utf8(o.stdout).ok())
    .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string());

  println!("cargo:rustc-env=RELKIT_BUILD_HASH={hash}");
}
