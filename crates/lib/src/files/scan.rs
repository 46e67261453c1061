//! Directory listing for components.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::consts::{ASSETS_DIR, TESTS_COMPONENT, TESTS_DIR};
use crate::manifest::Manifest;
use crate::resolve::{Registry, linearize};

use super::types::{FilesError, SourceLang};

/// A resolved manifest with the files found next to it.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSet {
  pub manifest: Manifest,
  pub srcs: Vec<PathBuf>,
  pub tests: Vec<PathBuf>,
  pub assets: Vec<PathBuf>,
}

/// Regular files directly inside `root/dir` accepted by `keep`, sorted.
///
/// A missing directory is an error unless `optional` is set, in which case
/// it yields nothing.
fn list_files(root: &Path, dir: &Path, optional: bool, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>, FilesError> {
  let full = root.join(dir);
  if optional && !full.is_dir() {
    return Ok(Vec::new());
  }

  let read_err = |source| FilesError::ReadDir {
    path: full.clone(),
    source,
  };

  let mut result = Vec::new();
  for entry in fs::read_dir(&full).map_err(read_err)? {
    let entry = entry.map_err(read_err)?;
    if !entry.path().is_file() {
      continue;
    }
    let rel = dir.join(entry.file_name());
    if keep(&rel) {
      result.push(rel);
    }
  }

  result.sort();
  Ok(result)
}

fn is_source(path: &Path) -> bool {
  SourceLang::from_path(path).is_some()
}

fn any_file(_: &Path) -> bool {
  true
}

/// List sources, `tests/` sources and `assets/` files of every component.
pub fn scan_files(registry: Registry, root: &Path) -> Result<BTreeMap<String, FileSet>, FilesError> {
  let mut result = BTreeMap::new();

  for (id, manifest) in registry {
    let srcs = list_files(root, &manifest.dir, false, is_source)?;
    let tests = list_files(root, &manifest.dir.join(TESTS_DIR), true, is_source)?;
    let assets = list_files(root, &manifest.dir.join(ASSETS_DIR), true, any_file)?;
    trace!(id = %id, srcs = srcs.len(), tests = tests.len(), assets = assets.len(), "scanned component");

    result.insert(
      id,
      FileSet {
        manifest,
        srcs,
        tests,
        assets,
      },
    );
  }

  Ok(result)
}

/// Fold every component's tests into the `tests` aggregator component.
///
/// The aggregator compiles the collected test sources and depends on each
/// contributing component together with its closure, so the single test
/// binary links everything the tests exercise. Without an aggregator in the
/// set, nothing changes.
pub fn aggregate_tests(mut sets: BTreeMap<String, FileSet>) -> BTreeMap<String, FileSet> {
  if !sets.contains_key(TESTS_COMPONENT) {
    return sets;
  }

  let mut srcs = Vec::new();
  let mut deps = Vec::new();
  for (id, set) in &sets {
    if id == TESTS_COMPONENT || set.tests.is_empty() {
      continue;
    }
    srcs.extend(set.tests.iter().cloned());
    deps.push(id.clone());
    deps.extend(set.manifest.deps.iter().filter(|dep| *dep != TESTS_COMPONENT).cloned());
  }

  if srcs.is_empty() {
    return sets;
  }

  if let Some(aggregator) = sets.get_mut(TESTS_COMPONENT) {
    debug!(sources = srcs.len(), "aggregating component tests");
    aggregator.srcs.extend(srcs);
    let mut all_deps = std::mem::take(&mut aggregator.manifest.deps);
    all_deps.extend(deps);
    aggregator.manifest.deps = linearize(all_deps);
  }

  sets
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testutil::write_file;
  use tempfile::tempdir;

  fn manifest(id: &str, dir: &str) -> Manifest {
    Manifest::new(id, "lib").with_dir(dir)
  }

  fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
  }

  #[test]
  fn lists_sources_by_extension() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "src/a/z.cpp", "");
    write_file(temp.path(), "src/a/b.c", "");
    write_file(temp.path(), "src/a/boot.s", "");
    write_file(temp.path(), "src/a/b.h", "");
    write_file(temp.path(), "src/a/manifest.json", "{}");
    write_file(temp.path(), "src/a/nested/deep.cpp", "");

    let registry = Registry::index(vec![manifest("a", "src/a")]).unwrap();
    let sets = scan_files(registry, temp.path()).unwrap();

    assert_eq!(sets["a"].srcs, paths(&["src/a/b.c", "src/a/boot.s", "src/a/z.cpp"]));
    assert!(sets["a"].tests.is_empty());
    assert!(sets["a"].assets.is_empty());
  }

  #[test]
  fn lists_tests_and_assets() {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "src/a/a.cpp", "");
    write_file(temp.path(), "src/a/tests/test-a.cpp", "");
    write_file(temp.path(), "src/a/tests/README.md", "");
    write_file(temp.path(), "src/a/assets/logo.svg", "");
    write_file(temp.path(), "src/a/assets/font.ttf", "");

    let registry = Registry::index(vec![manifest("a", "src/a")]).unwrap();
    let sets = scan_files(registry, temp.path()).unwrap();

    assert_eq!(sets["a"].tests, paths(&["src/a/tests/test-a.cpp"]));
    assert_eq!(
      sets["a"].assets,
      paths(&["src/a/assets/font.ttf", "src/a/assets/logo.svg"])
    );
  }

  #[test]
  fn missing_component_dir_is_an_error() {
    let temp = tempdir().unwrap();
    let registry = Registry::index(vec![manifest("a", "src/gone")]).unwrap();

    let err = scan_files(registry, temp.path()).unwrap_err();

    assert!(matches!(err, FilesError::ReadDir { .. }));
  }

  fn set(id: &str, deps: &[&str], tests: &[&str]) -> FileSet {
    FileSet {
      manifest: Manifest::new(id, "lib").with_deps(deps),
      srcs: Vec::new(),
      tests: paths(tests),
      assets: Vec::new(),
    }
  }

  fn sets(list: Vec<FileSet>) -> BTreeMap<String, FileSet> {
    list.into_iter().map(|s| (s.manifest.id.clone(), s)).collect()
  }

  #[test]
  fn aggregator_collects_tests_and_deps() {
    let mut aggregator = set("tests", &["karm-test"], &[]);
    aggregator.manifest.kind = "exe".to_string();
    aggregator.srcs = paths(&["src/tests/main.cpp"]);

    let result = aggregate_tests(sets(vec![
      aggregator,
      set("karm-test", &[], &[]),
      set("karm-base", &[], &["src/karm-base/tests/test-vec.cpp"]),
      set("karm-ui", &["karm-base"], &["src/karm-ui/tests/test-layout.cpp"]),
      set("karm-gfx", &["karm-base"], &[]),
    ]));

    let tests = &result["tests"];
    assert_eq!(
      tests.srcs,
      paths(&[
        "src/tests/main.cpp",
        "src/karm-base/tests/test-vec.cpp",
        "src/karm-ui/tests/test-layout.cpp",
      ])
    );
    assert_eq!(tests.manifest.deps, vec!["karm-test", "karm-ui", "karm-base"]);
    assert!(result["karm-gfx"].manifest.deps == vec!["karm-base"]);
  }

  #[test]
  fn aggregator_ignores_its_own_tests() {
    let result = aggregate_tests(sets(vec![
      set("tests", &[], &["src/tests/tests/self.cpp"]),
      set("a", &[], &["src/a/tests/a.cpp"]),
    ]));

    assert_eq!(result["tests"].srcs, paths(&["src/a/tests/a.cpp"]));
    assert_eq!(result["tests"].manifest.deps, vec!["a"]);
  }

  #[test]
  fn without_aggregator_nothing_changes() {
    let input = sets(vec![set("a", &[], &["src/a/tests/a.cpp"])]);
    assert_eq!(aggregate_tests(input.clone()), input);
  }
}
