use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::consts::{EXE_SUFFIX, LIB_SUFFIX};
use crate::manifest::Requirements;

#[derive(Debug, Error)]
pub enum FilesError {
  /// The manifest `type` is neither `lib` nor `exe`.
  #[error("unknown type '{kind}' for component '{id}'")]
  UnknownType { id: String, kind: String },

  #[error("failed to read directory {path}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Error)]
pub enum LookupError {
  #[error("component '{0}' not found")]
  UnknownComponent(String),
}

/// What a component produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
  /// Static archive.
  Lib,
  /// Linked executable.
  Exe,
}

impl ComponentKind {
  pub fn parse(kind: &str) -> Option<Self> {
    match kind {
      "lib" => Some(Self::Lib),
      "exe" => Some(Self::Exe),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Lib => "lib",
      Self::Exe => "exe",
    }
  }

  /// Artifact file suffix, including the dot.
  pub fn suffix(&self) -> &'static str {
    match self {
      Self::Lib => LIB_SUFFIX,
      Self::Exe => EXE_SUFFIX,
    }
  }
}

impl fmt::Display for ComponentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Source language, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLang {
  C,
  Cxx,
  Asm,
}

impl SourceLang {
  pub fn from_path(path: &Path) -> Option<Self> {
    match path.extension()?.to_str()? {
      "c" => Some(Self::C),
      "cpp" => Some(Self::Cxx),
      "s" | "asm" => Some(Self::Asm),
      _ => None,
    }
  }

  /// Name of the build graph rule compiling this language.
  pub fn rule(&self) -> &'static str {
    match self {
      Self::C => "cc",
      Self::Cxx => "cxx",
      Self::Asm => "as",
    }
  }
}

/// A fully resolved component, as dumped to `build.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
  pub id: String,

  #[serde(rename = "type")]
  pub kind: ComponentKind,

  /// Linearized transitive closure.
  pub deps: Vec<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub requires: Option<Requirements>,

  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub inject: Vec<String>,

  #[serde(rename = "root-include", skip_serializing_if = "std::ops::Not::not")]
  pub root_include: bool,

  pub dir: PathBuf,
  pub srcs: Vec<PathBuf>,
  pub tests: Vec<PathBuf>,
  pub assets: Vec<PathBuf>,

  /// `(object, source)` pairs, in source order.
  pub objs: Vec<(PathBuf, PathBuf)>,

  /// Archive or executable produced by this component.
  pub out: PathBuf,

  /// Archives of library dependencies, in closure order.
  pub libs: Vec<PathBuf>,

  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

/// The resolved component set of one run, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Components(BTreeMap<String, Component>);

impl Components {
  pub fn new(components: BTreeMap<String, Component>) -> Self {
    Self(components)
  }

  pub fn get(&self, id: &str) -> Option<&Component> {
    self.0.get(id)
  }

  /// Artifact path of a component, for building or running it by name.
  pub fn output_of(&self, id: &str) -> Result<&Path, LookupError> {
    self
      .0
      .get(id)
      .map(|c| c.out.as_path())
      .ok_or_else(|| LookupError::UnknownComponent(id.to_string()))
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
    self.0.iter().map(|(id, c)| (id.as_str(), c))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
