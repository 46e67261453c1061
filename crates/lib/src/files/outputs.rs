use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::consts::{OBJ_SUFFIX, SOURCE_ROOT};
use crate::env::FinalEnv;

use super::scan::FileSet;
use super::types::{Component, ComponentKind, Components, FilesError};

/// Object file for `src`: the path below the source root, moved under `objdir`, with `.o` appended.
///
/// `src/libs/karm-base/vec.cpp` becomes `<objdir>/libs/karm-base/vec.cpp.o`.
pub fn object_path(src: &Path, objdir: &Path) -> PathBuf {
  let relative = src.strip_prefix(SOURCE_ROOT).unwrap_or(src);
  let mut object: OsString = objdir.join(relative).into_os_string();
  object.push(OBJ_SUFFIX);
  PathBuf::from(object)
}

/// Artifact of component `id`: `<bindir>/<id>.a` or `<bindir>/<id>.elf`.
pub fn output_path(bindir: &Path, id: &str, kind: ComponentKind) -> PathBuf {
  bindir.join(format!("{}{}", id, kind.suffix()))
}

/// Turn scanned file sets into components with objects and artifact paths.
///
/// `libs` is left empty; [`link_libraries`] fills it once every artifact is known.
pub fn derive_outputs(
  sets: BTreeMap<String, FileSet>,
  env: &FinalEnv,
) -> Result<BTreeMap<String, Component>, FilesError> {
  let mut result = BTreeMap::new();

  for (id, set) in sets {
    let FileSet {
      manifest,
      srcs,
      tests,
      assets,
    } = set;

    let kind = ComponentKind::parse(&manifest.kind).ok_or_else(|| FilesError::UnknownType {
      id: id.clone(),
      kind: manifest.kind.clone(),
    })?;

    let objs = srcs
      .iter()
      .map(|src| (object_path(src, &env.objdir), src.clone()))
      .collect();
    let out = output_path(&env.bindir, &id, kind);

    result.insert(
      id.clone(),
      Component {
        id,
        kind,
        deps: manifest.deps,
        requires: manifest.requires,
        inject: manifest.inject,
        root_include: manifest.root_include,
        dir: manifest.dir,
        srcs,
        tests,
        assets,
        objs,
        out,
        libs: Vec::new(),
        extra: manifest.extra,
      },
    );
  }

  Ok(result)
}

/// Fill `libs` with the archives of each component's library dependencies, in closure order.
pub fn link_libraries(mut components: BTreeMap<String, Component>) -> Components {
  let archives: BTreeMap<String, PathBuf> = components
    .iter()
    .filter(|(_, c)| c.kind == ComponentKind::Lib)
    .map(|(id, c)| (id.clone(), c.out.clone()))
    .collect();

  for component in components.values_mut() {
    component.libs = component
      .deps
      .iter()
      .filter_map(|dep| archives.get(dep).cloned())
      .collect();
  }

  Components::new(components)
}
