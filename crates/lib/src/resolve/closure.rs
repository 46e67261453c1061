//! Transitive closures and their linearization.

use std::collections::HashMap;

use tracing::trace;

use super::types::{Registry, ResolveError};

/// Collapse `ids` to unique entries, keeping each id at its **last** position.
///
/// In a raw closure a component's own dependencies follow it, so keeping the
/// last occurrence puts every library after everything that uses it, which is
/// the order a single-pass linker wants. This is not a full topological sort.
/// Applying it twice gives the same list.
pub fn linearize(ids: Vec<String>) -> Vec<String> {
  let keep: Vec<bool> = {
    let mut last: HashMap<&str, usize> = HashMap::new();
    for (pos, id) in ids.iter().enumerate() {
      last.insert(id.as_str(), pos);
    }
    ids.iter().enumerate().map(|(pos, id)| last[id.as_str()] == pos).collect()
  };

  ids.into_iter().zip(keep).filter_map(|(id, keep)| keep.then_some(id)).collect()
}

/// Depth-first closure computation with an explicit stack for cycle detection.
///
/// The raw closure of a component is its direct `deps` in declared order,
/// followed by the raw closure of each of them. Finished closures are cached
/// in linearized form: linearizing a segment before concatenation does not
/// change which position of an id is last, so the result is the same.
struct ClosureResolver<'a> {
  registry: &'a Registry,
  stack: Vec<String>,
  done: HashMap<String, Vec<String>>,
}

impl<'a> ClosureResolver<'a> {
  fn new(registry: &'a Registry) -> Self {
    Self {
      registry,
      stack: Vec::new(),
      done: HashMap::new(),
    }
  }

  fn closure(&mut self, id: &str) -> Result<Vec<String>, ResolveError> {
    if let Some(closure) = self.done.get(id) {
      return Ok(closure.clone());
    }

    if self.stack.iter().any(|entry| entry == id) {
      let mut path = self.stack.clone();
      path.push(id.to_string());
      return Err(ResolveError::CircularDependency { path });
    }

    let registry = self.registry;
    let manifest = registry.get(id).ok_or_else(|| ResolveError::UnknownDependency {
      dep: id.to_string(),
      dependent: self.stack.last().cloned().unwrap_or_default(),
    })?;

    self.stack.push(id.to_string());
    let mut raw = manifest.deps.clone();
    for dep in &manifest.deps {
      raw.extend(self.closure(dep)?);
    }
    self.stack.pop();

    let closure = linearize(raw);
    trace!(id, deps = ?closure, "resolved closure");
    self.done.insert(id.to_string(), closure.clone());
    Ok(closure)
  }
}

/// Replace every component's `deps` with its linearized transitive closure.
pub fn resolve_closures(registry: Registry) -> Result<Registry, ResolveError> {
  let mut closures = {
    let mut resolver = ClosureResolver::new(&registry);
    let mut closures = HashMap::new();
    for id in registry.ids() {
      closures.insert(id.to_string(), resolver.closure(id)?);
    }
    closures
  };

  let mut manifests = registry.into_inner();
  for (id, manifest) in manifests.iter_mut() {
    if let Some(deps) = closures.remove(id) {
      manifest.deps = deps;
    }
  }

  Ok(Registry::from_map(manifests))
}
