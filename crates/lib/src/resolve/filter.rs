//! Environment gating via `requires`.

use tracing::trace;

use crate::env::Environment;
use crate::manifest::Manifest;

use super::types::ResolveError;

/// Whether `manifest` may be built for `env`.
///
/// A manifest without `requires` is always accepted. Otherwise every listed
/// field must currently hold one of its allowed values. All field names are
/// checked, so a typo is reported even when another field already rejects.
pub fn accepts(manifest: &Manifest, env: &Environment) -> Result<bool, ResolveError> {
  let Some(requires) = &manifest.requires else {
    return Ok(true);
  };

  let mut accepted = true;
  for (field, allowed) in requires {
    let value = env.field(field).ok_or_else(|| ResolveError::UnknownField {
      id: manifest.id.clone(),
      field: field.clone(),
    })?;

    if !allowed.iter().any(|candidate| value.matches(candidate)) {
      trace!(id = %manifest.id, field = %field, value = %value, "requirement not met");
      accepted = false;
    }
  }

  Ok(accepted)
}

/// Keep the manifests accepted by `env`, preserving order.
pub fn filter_manifests(manifests: Vec<Manifest>, env: &Environment) -> Result<Vec<Manifest>, ResolveError> {
  let mut result = Vec::with_capacity(manifests.len());
  for manifest in manifests {
    if accepts(&manifest, env)? {
      result.push(manifest);
    }
  }
  Ok(result)
}
