//! Dependency resolution.
//!
//! Turns the loaded manifests into a registry whose `deps` lists are full,
//! link-ordered closures:
//!
//! 1. [`filter_manifests`] drops components whose `requires` gate rejects the environment
//! 2. [`Registry::index`] keys the survivors by id, rejecting duplicates
//! 3. [`inject`] adds the implicit edges declared with `inject`
//! 4. [`resolve_closures`] expands every component's dependencies depth-first,
//!    detecting cycles and dangling ids, and [`linearize`]s the result
//!
//! Every stage takes its input by value and returns a new structure.

mod closure;
mod filter;
mod inject;
mod types;

pub use closure::{linearize, resolve_closures};
pub use filter::{accepts, filter_manifests};
pub use inject::inject;
pub use types::*;

use tracing::debug;

use crate::env::Environment;
use crate::manifest::Manifest;

/// Run the whole resolution pipeline for one environment.
pub fn resolve(manifests: Vec<Manifest>, env: &Environment) -> Result<Registry, ResolveError> {
  let total = manifests.len();
  let accepted = filter_manifests(manifests, env)?;
  debug!(total, accepted = accepted.len(), "filtered manifests");

  let registry = Registry::index(accepted)?;
  let registry = inject(registry);
  let registry = resolve_closures(registry)?;
  debug!(components = registry.len(), "resolved dependency closures");
  Ok(registry)
}
