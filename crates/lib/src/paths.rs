//! Locations of generated output, overridable from the process environment.
//!
//! Paths returned here are relative to the project root unless the override
//! is absolute. They are written verbatim into the build graph, which the
//! executor runs from the project root.

use std::path::PathBuf;

use crate::consts::{BUILD_DIR, CACHE_DIR, DEFAULT_NINJA};

pub const BUILD_DIR_VAR: &str = "SK_BUILD_DIR";
pub const CACHE_DIR_VAR: &str = "SK_CACHE_DIR";
pub const NINJA_VAR: &str = "SK_NINJA";

fn var_or(name: &str, default: &str) -> String {
  match std::env::var(name) {
    Ok(value) if !value.is_empty() => value,
    _ => default.to_string(),
  }
}

/// Returns the build root holding one directory per environment fingerprint.
pub fn build_dir() -> PathBuf {
  PathBuf::from(var_or(BUILD_DIR_VAR, BUILD_DIR))
}

/// Returns the cache root (compiler caches, downloaded toolchains).
pub fn cache_dir() -> PathBuf {
  PathBuf::from(var_or(CACHE_DIR_VAR, CACHE_DIR))
}

/// Returns the executor program used to run the generated build graph.
pub fn ninja_program() -> String {
  var_or(NINJA_VAR, DEFAULT_NINJA)
}
