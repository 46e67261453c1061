//! Test helpers for building throwaway project trees.

use std::path::Path;

use crate::env::{EnvRegistry, Environment};

/// Write a file relative to `root`, creating parent directories.
pub fn write_file(root: &Path, relative_path: &str, content: &str) {
  let path = root.join(relative_path);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, content).unwrap();
}

/// Write `<root>/<dir>/manifest.json`.
pub fn write_manifest(root: &Path, dir: &str, content: &str) {
  write_file(root, &format!("{}/manifest.json", dir), content);
}

/// The builtin host environment.
pub fn host_env() -> Environment {
  EnvRegistry::builtin().get("host").unwrap().clone()
}
