//! Temporary `.netrc` files for credential tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a test `.netrc` file
///
/// Writes the given content to `.netrc` inside a fresh temporary directory
/// that stands in for the user's home. `HOME` itself is left untouched, so
/// callers pass [`NetrcGuard::home_dir`] wherever a home directory is
/// expected.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");
    fs::write(&netrc_path, content).expect("Failed to write test .netrc");

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the directory acting as home
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
