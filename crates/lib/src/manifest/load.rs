//! Manifest discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::consts::MANIFEST_FILENAME;

use super::types::Manifest;

/// Errors raised while discovering or reading manifests.
///
/// Both are fatal: the run stops before any resolution starts.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// A manifest could not be read or is not valid JSON for [`Manifest`].
  #[error("error loading manifest {path}: {message}")]
  Load { path: PathBuf, message: String },

  /// The project tree could not be walked.
  #[error("failed to walk {path}: {message}")]
  Walk { path: PathBuf, message: String },
}

/// Hidden directories (`.git`, `.build`, `.cache`, ...) never hold components.
fn is_hidden_dir(entry: &DirEntry) -> bool {
  entry.depth() > 0
    && entry.file_type().is_dir()
    && entry.file_name().to_str().map(|name| name.starts_with('.')).unwrap_or(false)
}

/// Find every manifest under `root`, in file-name order.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>, ManifestError> {
  let mut result = Vec::new();

  let walker = WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| !is_hidden_dir(e));

  for entry in walker {
    let entry = entry.map_err(|e| ManifestError::Walk {
      path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
      message: e.to_string(),
    })?;

    if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILENAME {
      trace!(path = %entry.path().display(), "found manifest");
      result.push(entry.into_path());
    }
  }

  Ok(result)
}

/// Load one manifest and record its directory relative to `root`.
pub fn load_manifest(root: &Path, path: &Path) -> Result<Manifest, ManifestError> {
  let content = fs::read_to_string(path).map_err(|e| ManifestError::Load {
    path: path.to_path_buf(),
    message: e.to_string(),
  })?;

  let mut manifest: Manifest = serde_json::from_str(&content).map_err(|e| ManifestError::Load {
    path: path.to_path_buf(),
    message: e.to_string(),
  })?;

  let dir = path.parent().unwrap_or(root);
  manifest.dir = dir.strip_prefix(root).unwrap_or(dir).to_path_buf();

  Ok(manifest)
}

/// Discover and load every manifest under `root`.
///
/// Stops at the first unreadable or malformed file; no partial result is returned.
pub fn load_manifests(root: &Path) -> Result<Vec<Manifest>, ManifestError> {
  let paths = find_manifests(root)?;
  debug!(count = paths.len(), root = %root.display(), "discovered manifests");

  paths.iter().map(|path| load_manifest(root, path)).collect()
}
