//! End-to-end configure runs over throwaway project trees.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sk_lib::configure::{ConfigureError, ConfigureOptions, Configured, configure, configure_named};
use sk_lib::env::EnvRegistry;
use sk_lib::resolve::ResolveError;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
}

fn options() -> ConfigureOptions {
  ConfigureOptions {
    cache: false,
    sanitize: false,
    build_dir: PathBuf::from(".build"),
  }
}

fn run(root: &Path, env: &str) -> Result<Configured, ConfigureError> {
  configure_named(root, &EnvRegistry::builtin(), env, &options())
}

fn read_json(path: PathBuf) -> Value {
  serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// A small tree: a base library, a UI library injected into apps, an app, a
/// freestanding-only kernel and a test aggregator.
fn sample_project() -> TempDir {
  let temp = TempDir::new().unwrap();
  let root = temp.path();

  write(root, "src/libs/karm-base/manifest.json", r#"{"id": "karm-base", "type": "lib", "root-include": true}"#);
  write(root, "src/libs/karm-base/vec.cpp", "");
  write(root, "src/libs/karm-base/tests/test-vec.cpp", "");

  write(
    root,
    "src/libs/karm-ui/manifest.json",
    r#"{"id": "karm-ui", "type": "lib", "deps": ["karm-base"], "inject": ["shell"]}"#,
  );
  write(root, "src/libs/karm-ui/ui.cpp", "");

  write(root, "src/apps/shell/manifest.json", r#"{"id": "shell", "type": "exe"}"#);
  write(root, "src/apps/shell/main.cpp", "");
  write(root, "src/apps/shell/assets/icon.svg", "");

  write(
    root,
    "src/kernel/manifest.json",
    r#"{"id": "kernel", "type": "exe", "deps": ["karm-base"], "requires": {"freestanding": [true]}}"#,
  );
  write(root, "src/kernel/entry.c", "");

  write(root, "src/tests/manifest.json", r#"{"id": "tests", "type": "exe"}"#);
  write(root, "src/tests/main.cpp", "");

  temp
}

#[test]
fn host_configuration() {
  let temp = sample_project();
  let configured = run(temp.path(), "host").unwrap();
  let components = &configured.components;

  assert!(components.get("kernel").is_none());

  let shell = components.get("shell").unwrap();
  assert_eq!(shell.deps, vec!["karm-ui", "karm-base"]);
  assert_eq!(
    shell.libs,
    vec![
      configured.env.bindir.join("karm-ui.a"),
      configured.env.bindir.join("karm-base.a"),
    ]
  );
  assert_eq!(shell.out, configured.env.bindir.join("shell.elf"));
  assert_eq!(shell.assets, vec![PathBuf::from("src/apps/shell/assets/icon.svg")]);

  let tests = components.get("tests").unwrap();
  assert!(tests.srcs.contains(&PathBuf::from("src/libs/karm-base/tests/test-vec.cpp")));
  assert_eq!(tests.deps, vec!["karm-base"]);

  assert!(configured.env.env.cflags.contains("-Isrc/libs/karm-base"));
  assert!(configured.env.env.cflags.contains("-D__sk_toolchain_clang__"));
  assert!(!configured.env.env.cflags.contains("-D__sk_freestanding__"));
}

#[test]
fn freestanding_configuration() {
  let temp = sample_project();
  let configured = run(temp.path(), "efi-x86_64").unwrap();

  let kernel = configured.components.get("kernel").unwrap();
  assert_eq!(kernel.deps, vec!["karm-base"]);
  assert!(configured.env.env.cflags.contains("-D__sk_freestanding__"));
  assert!(configured.env.env.cflags.contains("-D__sk_sys_efi__"));
}

#[test]
fn snapshots_and_graph_are_written() {
  let temp = sample_project();
  let configured = run(temp.path(), "host").unwrap();
  let dir = temp.path().join(&configured.env.dir);

  assert_eq!(
    configured.env.dir,
    PathBuf::from(".build").join(&configured.env.hash.0[..8])
  );

  let build = read_json(dir.join("build.json"));
  assert_eq!(build["shell"]["type"], "exe");
  assert_eq!(build["karm-base"]["root-include"], true);

  let env = read_json(dir.join("env.json"));
  assert_eq!(env["hash"], configured.env.hash.0.as_str());
  assert_eq!(env["ninjafile"], configured.env.ninjafile.display().to_string());

  let graph = fs::read_to_string(configured.ninjafile()).unwrap();
  let bin = configured.env.bindir.display();
  assert!(graph.contains(&format!("build {bin}/karm-base.a: ar ")));
  assert!(graph.contains(&format!("build {bin}/shell.elf: ld ")));
  assert!(graph.contains("default all"));
  assert_eq!(graph.matches(": cxx ").count(), 5);
}

#[test]
fn configure_is_deterministic() {
  let temp = sample_project();

  let first = run(temp.path(), "host").unwrap();
  let graph = fs::read_to_string(first.ninjafile()).unwrap();
  let second = run(temp.path(), "host").unwrap();

  assert_eq!(first.env, second.env);
  assert_eq!(first.components, second.components);
  assert_eq!(fs::read_to_string(second.ninjafile()).unwrap(), graph);
}

#[test]
fn environments_get_separate_directories() {
  let temp = sample_project();

  let host = run(temp.path(), "host").unwrap();
  let efi = run(temp.path(), "efi-x86_64").unwrap();

  assert_ne!(host.env.dir, efi.env.dir);
  assert!(host.ninjafile().is_file());
  assert!(efi.ninjafile().is_file());
}

#[test]
fn cycle_is_reported_and_nothing_written() {
  let temp = TempDir::new().unwrap();
  write(temp.path(), "src/a/manifest.json", r#"{"id": "a", "type": "lib", "deps": ["b"]}"#);
  write(temp.path(), "src/b/manifest.json", r#"{"id": "b", "type": "lib", "deps": ["a"]}"#);

  let err = run(temp.path(), "host").unwrap_err();

  match err {
    ConfigureError::Resolve(ResolveError::CircularDependency { path }) => {
      assert!(path.contains(&"a".to_string()));
      assert!(path.contains(&"b".to_string()));
    }
    other => panic!("expected a cycle, got {other}"),
  }
  assert!(!temp.path().join(".build").exists());
}

#[test]
fn duplicate_id_is_reported() {
  let temp = TempDir::new().unwrap();
  write(temp.path(), "src/a/manifest.json", r#"{"id": "same", "type": "lib"}"#);
  write(temp.path(), "src/b/manifest.json", r#"{"id": "same", "type": "lib"}"#);

  let err = run(temp.path(), "host").unwrap_err();

  assert!(matches!(err, ConfigureError::Resolve(ResolveError::DuplicateId { .. })));
}

#[test]
fn unknown_type_only_fails_when_selected() {
  let temp = TempDir::new().unwrap();
  write(
    temp.path(),
    "src/odd/manifest.json",
    r#"{"id": "odd", "type": "dll", "requires": {"freestanding": [true]}}"#,
  );

  assert!(run(temp.path(), "host").is_ok());
  assert!(matches!(run(temp.path(), "efi-x86_64").unwrap_err(), ConfigureError::Files(_)));
}

#[test]
fn malformed_manifest_is_a_load_error() {
  let temp = TempDir::new().unwrap();
  write(temp.path(), "src/a/manifest.json", "{ not json");

  let err = run(temp.path(), "host").unwrap_err();

  assert!(matches!(err, ConfigureError::Manifest(_)));
}

#[test]
fn explicit_environment_value() {
  let temp = sample_project();
  let mut env = EnvRegistry::builtin().get("host").unwrap().clone();
  env.cflags = "-O2".to_string();

  let configured = configure(temp.path(), env, &options()).unwrap();
  let baseline = run(temp.path(), "host").unwrap();

  assert!(configured.env.env.cflags.contains("-O2"));
  assert_eq!(configured.env.hash, baseline.env.hash);
}

#[test]
fn dollar_in_include_dir_is_escaped_in_graph() {
  let temp = TempDir::new().unwrap();
  write(temp.path(), "src/libs/$inc/manifest.json", r#"{"id": "inc", "type": "lib", "root-include": true}"#);
  write(temp.path(), "src/libs/$inc/inc.c", "");

  let configured = run(temp.path(), "host").unwrap();
  let graph = fs::read_to_string(configured.ninjafile()).unwrap();

  assert!(configured.env.env.cflags.contains("-Isrc/libs/$inc"));
  let cflags = graph.lines().find(|line| line.starts_with("cflags = ")).unwrap();
  assert!(cflags.contains("-Isrc/libs/$$inc "));
  assert!(!cflags.contains("-Isrc/libs/$inc "));
  assert!(graph.contains("cc src/libs/$$inc/inc.c\n"));
}
