//! Raw manifest types, as read from `manifest.json`.
//!
//! # Example
//!
//! ```json
//! {
//!   "id": "karm-ui",
//!   "type": "lib",
//!   "deps": ["karm-base", "karm-gfx"],
//!   "requires": { "freestanding": [false] },
//!   "inject": ["karm-app"],
//!   "root-include": true
//! }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Allowed values per environment field name.
pub type Requirements = BTreeMap<String, Vec<Value>>;

/// A component descriptor.
///
/// `kind` is kept as the string found in the file: an unrecognized type is
/// only an error once the component survives environment filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub id: String,

  #[serde(rename = "type")]
  pub kind: String,

  /// Direct dependencies, in declared order.
  #[serde(default)]
  pub deps: Vec<String>,

  /// Environment gate. The component is dropped unless every listed field matches.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub requires: Option<Requirements>,

  /// Components that must depend on this one whenever they are part of the build.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub inject: Vec<String>,

  /// Adds this component's directory to every compile's include path.
  #[serde(rename = "root-include", default, skip_serializing_if = "std::ops::Not::not")]
  pub root_include: bool,

  /// Directory the manifest was loaded from, relative to the project root.
  /// Always overwritten by the loader.
  #[serde(default)]
  pub dir: PathBuf,

  /// Keys this tool does not interpret (`description`, `$schema`, ...).
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

impl Manifest {
  /// Create a manifest with no dependencies or gates.
  pub fn new(id: &str, kind: &str) -> Self {
    Self {
      id: id.to_string(),
      kind: kind.to_string(),
      deps: Vec::new(),
      requires: None,
      inject: Vec::new(),
      root_include: false,
      dir: PathBuf::new(),
      extra: BTreeMap::new(),
    }
  }

  pub fn with_deps(mut self, deps: &[&str]) -> Self {
    self.deps = deps.iter().map(|d| d.to_string()).collect();
    self
  }

  pub fn with_inject(mut self, targets: &[&str]) -> Self {
    self.inject = targets.iter().map(|t| t.to_string()).collect();
    self
  }

  pub fn with_requires(mut self, field: &str, allowed: Vec<Value>) -> Self {
    self
      .requires
      .get_or_insert_with(BTreeMap::new)
      .insert(field.to_string(), allowed);
    self
  }

  pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.dir = dir.into();
    self
  }
}
