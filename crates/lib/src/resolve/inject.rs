//! Implicit dependency edges.
//!
//! A component listing `inject: ["app"]` says "if `app` is built, it depends
//! on me". Injection runs once, before closures are computed, and is not
//! transitive: an edge added here is never itself a source of injection.

use tracing::debug;

use super::types::Registry;

/// Append every injecting component to the `deps` of each target present in `registry`.
///
/// Targets missing from the registry (filtered out, or never declared) are
/// skipped. Running this twice duplicates edges; [`super::linearize`] removes them.
pub fn inject(registry: Registry) -> Registry {
  let edges: Vec<(String, String)> = registry
    .iter()
    .flat_map(|(id, manifest)| {
      manifest
        .inject
        .iter()
        .filter(|target| registry.contains(target))
        .map(move |target| (target.clone(), id.to_string()))
    })
    .collect();

  let mut manifests = registry.into_inner();
  for (target, source) in edges {
    debug!(target = %target, source = %source, "injecting dependency");
    if let Some(manifest) = manifests.get_mut(&target) {
      manifest.deps.push(source);
    }
  }

  Registry::from_map(manifests)
}
