//! File and object mapping.
//!
//! Given a resolved [`Registry`] and a finalized environment, enumerate each
//! component's files and derive the object, artifact and link paths that the
//! build graph is made of.
//!
//! Stages, in order:
//!
//! - [`scan_files`] lists sources, tests and assets on disk
//! - [`aggregate_tests`] gathers every component's tests into the `tests` component
//! - [`derive_outputs`] maps sources to objects and picks the artifact path
//! - [`link_libraries`] collects the archives each component links against

mod outputs;
mod scan;
mod types;

pub use outputs::{derive_outputs, link_libraries, object_path, output_path};
pub use scan::{FileSet, aggregate_tests, scan_files};
pub use types::*;

use std::path::Path;

use tracing::debug;

use crate::env::FinalEnv;
use crate::resolve::Registry;

/// Map every resolved component to its files and outputs.
///
/// `root` is the project root that manifest directories are relative to.
pub fn map_components(registry: Registry, env: &FinalEnv, root: &Path) -> Result<Components, FilesError> {
  let scanned = scan_files(registry, root)?;
  let scanned = aggregate_tests(scanned);
  let components = derive_outputs(scanned, env)?;
  let components = link_libraries(components);

  debug!(
    components = components.len(),
    objects = components.iter().map(|(_, c)| c.objs.len()).sum::<usize>(),
    "mapped components"
  );

  Ok(components)
}
