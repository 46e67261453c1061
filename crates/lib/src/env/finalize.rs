//! Finalized environments.
//!
//! Finalizing binds an environment to one resolved component set: include
//! paths of `root-include` components and identity defines are folded into
//! the compile flags, and the build paths are derived from the fingerprint.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::consts::NINJA_FILENAME;

use super::hash::{EnvHash, env_id, fingerprint};
use super::types::{Environment, FieldValue, IdentityField};

const C_FLAGS: &str = "-std=gnu2x -Isrc -Wall -Wextra -Werror -fcolor-diagnostics";
const CXX_FLAGS: &str = "-std=gnu++2b -Isrc -Wall -Wextra -Werror -fcolor-diagnostics -fno-exceptions -fno-rtti";

/// Names written by the finalizer itself. Extra fields may not shadow them.
const RESERVED_FIELDS: [&str; 16] = [
  "cc", "cflags", "cxx", "cxxflags", "ld", "ldflags", "ar", "arflags", "as", "asflags", "id", "hash", "dir", "bindir",
  "objdir", "ninjafile",
];

fn is_reserved(name: &str) -> bool {
  RESERVED_FIELDS.contains(&name) || IdentityField::ALL.iter().any(|field| field.as_str() == name)
}

/// An environment ready to be written into a build graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalEnv {
  #[serde(flatten)]
  pub env: Environment,
  pub id: String,
  pub hash: EnvHash,
  pub dir: PathBuf,
  pub bindir: PathBuf,
  pub objdir: PathBuf,
  pub ninjafile: PathBuf,
}

/// `-D__sk_<field>_<value>__` for text fields, `-D__sk_<field>__` for set flags.
fn identity_defines(env: &Environment) -> Vec<String> {
  IdentityField::ALL
    .iter()
    .filter_map(|field| match env.identity(*field) {
      FieldValue::Text(value) => Some(format!("-D__sk_{}_{}__", field, value)),
      FieldValue::Flag(true) => Some(format!("-D__sk_{}__", field)),
      FieldValue::Flag(false) => None,
    })
    .collect()
}

fn include_flags(include_dirs: &[PathBuf]) -> Vec<String> {
  include_dirs
    .iter()
    .map(|dir| {
      if dir.as_os_str().is_empty() {
        "-I.".to_string()
      } else {
        format!("-I{}", dir.display())
      }
    })
    .collect()
}

fn join_flags(prefix: &str, flags: &str, extra: &[String]) -> String {
  let mut parts = vec![prefix];
  if !flags.is_empty() {
    parts.push(flags);
  }
  parts.extend(extra.iter().map(String::as_str));
  parts.join(" ")
}

/// Finalize `env` for a run whose `root-include` components live in `include_dirs`.
///
/// `build_dir` is the build root; the environment gets `<build_dir>/<hash prefix>`.
pub fn finalize(env: Environment, include_dirs: &[PathBuf], build_dir: &Path) -> FinalEnv {
  let id = env_id(&env);
  let hash = fingerprint(&env);

  let mut extra = include_flags(include_dirs);
  extra.extend(identity_defines(&env));

  let mut env = env;
  env.extra.retain(|name, _| {
    let reserved = is_reserved(name);
    if reserved {
      warn!(field = %name, "dropping extra environment field that shadows a derived field");
    }
    !reserved
  });
  env.cflags = join_flags(C_FLAGS, &env.cflags, &extra);
  env.cxxflags = join_flags(CXX_FLAGS, &env.cxxflags, &extra);

  let dir = build_dir.join(hash.short());

  FinalEnv {
    env,
    id,
    bindir: dir.join("bin"),
    objdir: dir.join("obj"),
    ninjafile: dir.join(NINJA_FILENAME),
    dir,
    hash,
  }
}

impl FinalEnv {
  /// Every field as a `(name, value)` pair, in a stable order, for the build graph header.
  pub fn variables(&self) -> Vec<(String, String)> {
    let env = &self.env;

    let mut vars: Vec<(String, String)> = IdentityField::ALL
      .iter()
      .map(|field| (field.as_str().to_string(), env.identity(*field).to_string()))
      .collect();

    let tools = [
      ("cc", &env.cc),
      ("cflags", &env.cflags),
      ("cxx", &env.cxx),
      ("cxxflags", &env.cxxflags),
      ("ld", &env.ld),
      ("ldflags", &env.ldflags),
      ("ar", &env.ar),
      ("arflags", &env.arflags),
      ("as", &env.asm),
      ("asflags", &env.asflags),
    ];
    vars.extend(tools.iter().map(|(name, value)| (name.to_string(), value.to_string())));
    vars.extend(env.extra.iter().map(|(name, value)| (name.clone(), value.clone())));

    vars.push(("id".to_string(), self.id.clone()));
    vars.push(("hash".to_string(), self.hash.0.clone()));
    for (name, path) in [
      ("dir", &self.dir),
      ("bindir", &self.bindir),
      ("objdir", &self.objdir),
      ("ninjafile", &self.ninjafile),
    ] {
      vars.push((name.to_string(), path.display().to_string()));
    }

    vars
  }
}
