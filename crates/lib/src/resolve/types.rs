use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::Manifest;

/// Fatal configuration errors found while resolving manifests.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// A `requires` clause names a field the environment does not have.
  #[error("unknown environment field '{field}' in requires of '{id}'")]
  UnknownField { id: String, field: String },

  /// Two accepted manifests share an id.
  #[error("duplicate component id '{id}' (declared in '{first}' and '{second}')")]
  DuplicateId { id: String, first: PathBuf, second: PathBuf },

  /// A dependency names a component that is not in the accepted set.
  #[error("unknown dependency '{dep}' required by '{dependent}'")]
  UnknownDependency { dep: String, dependent: String },

  /// The dependency relation has a cycle. `path` ends with the repeated id.
  #[error("circular dependency detected: {}", .path.join(" -> "))]
  CircularDependency { path: Vec<String> },
}

/// Accepted manifests keyed by id.
///
/// Ordered by id so every later stage iterates deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
  manifests: BTreeMap<String, Manifest>,
}

impl Registry {
  /// Key `manifests` by id. Fails on the first duplicate.
  pub fn index(manifests: Vec<Manifest>) -> Result<Self, ResolveError> {
    let mut result: BTreeMap<String, Manifest> = BTreeMap::new();

    for manifest in manifests {
      if let Some(existing) = result.get(&manifest.id) {
        return Err(ResolveError::DuplicateId {
          id: manifest.id.clone(),
          first: existing.dir.clone(),
          second: manifest.dir.clone(),
        });
      }
      result.insert(manifest.id.clone(), manifest);
    }

    Ok(Self { manifests: result })
  }

  pub fn get(&self, id: &str) -> Option<&Manifest> {
    self.manifests.get(id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.manifests.contains_key(id)
  }

  pub fn len(&self) -> usize {
    self.manifests.len()
  }

  pub fn is_empty(&self) -> bool {
    self.manifests.is_empty()
  }

  pub fn ids(&self) -> impl Iterator<Item = &str> {
    self.manifests.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Manifest)> {
    self.manifests.iter().map(|(id, m)| (id.as_str(), m))
  }

  /// Directories of `root-include` components, in id order.
  pub fn include_dirs(&self) -> Vec<PathBuf> {
    self
      .manifests
      .values()
      .filter(|m| m.root_include)
      .map(|m| m.dir.clone())
      .collect()
  }

  pub fn into_inner(self) -> BTreeMap<String, Manifest> {
    self.manifests
  }

  pub(crate) fn from_map(manifests: BTreeMap<String, Manifest>) -> Self {
    Self { manifests }
  }
}

impl IntoIterator for Registry {
  type Item = (String, Manifest);
  type IntoIter = std::collections::btree_map::IntoIter<String, Manifest>;

  fn into_iter(self) -> Self::IntoIter {
    self.manifests.into_iter()
  }
}
