//! Removing generated output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[error("failed to remove {path}")]
pub struct CleanError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

/// Remove `root/dir` recursively. A directory that does not exist is not an error.
fn remove_tree(root: &Path, dir: &Path) -> Result<bool, CleanError> {
  let path = root.join(dir);
  match fs::remove_dir_all(&path) {
    Ok(()) => {
      info!(path = %path.display(), "removed");
      Ok(true)
    }
    Err(err) if err.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "nothing to remove");
      Ok(false)
    }
    Err(source) => Err(CleanError { path, source }),
  }
}

/// Remove the build root. Returns whether anything was removed.
pub fn clean(root: &Path, build_dir: &Path) -> Result<bool, CleanError> {
  remove_tree(root, build_dir)
}

/// Remove the build root and the cache root.
pub fn nuke(root: &Path, build_dir: &Path, cache_dir: &Path) -> Result<bool, CleanError> {
  let build = remove_tree(root, build_dir)?;
  let cache = remove_tree(root, cache_dir)?;
  Ok(build || cache)
}
