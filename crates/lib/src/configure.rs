//! The configure pipeline.
//!
//! Loads the project's manifests, resolves them for one environment, maps
//! files to objects and writes the build graph with its JSON snapshots into
//! the environment's build directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{BUILD_JSON_FILENAME, ENV_JSON_FILENAME};
use crate::env::{EnvError, EnvRegistry, Environment, FinalEnv, enable_cache, enable_sanitizer, env_id, finalize};
use crate::files::{Components, FilesError, map_components};
use crate::manifest::{ManifestError, load_manifests};
use crate::ninja::write_build_graph;
use crate::paths;
use crate::resolve::{ResolveError, resolve};

#[derive(Debug, Error)]
pub enum ConfigureError {
  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Env(#[from] EnvError),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error(transparent)]
  Files(#[from] FilesError),

  #[error("failed to serialize {what}")]
  Serialize {
    what: &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to write {path}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Per-run knobs.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
  /// Prefix compilers with `ccache`.
  pub cache: bool,
  /// Build with address and undefined-behavior sanitizers.
  pub sanitize: bool,
  /// Build root, relative to the project root unless absolute.
  pub build_dir: PathBuf,
}

impl Default for ConfigureOptions {
  fn default() -> Self {
    Self {
      cache: true,
      sanitize: true,
      build_dir: paths::build_dir(),
    }
  }
}

/// Result of a successful configure run.
#[derive(Debug, Clone)]
pub struct Configured {
  /// Project root; every path in `env` and `components` is relative to it.
  pub root: PathBuf,
  pub env: FinalEnv,
  pub components: Components,
}

impl Configured {
  /// Absolute location of the emitted build graph.
  pub fn ninjafile(&self) -> PathBuf {
    self.root.join(&self.env.ninjafile)
  }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ConfigureError> {
  let mut temp = path.as_os_str().to_owned();
  temp.push(".tmp");
  let temp = PathBuf::from(temp);

  let write_err = |source| ConfigureError::Write {
    path: path.to_path_buf(),
    source,
  };
  fs::write(&temp, content).map_err(write_err)?;
  fs::rename(&temp, path).map_err(write_err)?;
  Ok(())
}

/// Configure the project at `root` for `env`.
///
/// Every output is rendered before anything touches the disk, so a failing
/// run leaves the build directory as it was.
pub fn configure(root: &Path, env: Environment, options: &ConfigureOptions) -> Result<Configured, ConfigureError> {
  let manifests = load_manifests(root)?;
  debug!(count = manifests.len(), root = %root.display(), "loaded manifests");

  let registry = resolve(manifests, &env)?;
  if registry.is_empty() {
    warn!(env = %env_id(&env), "no component accepts this environment");
  }

  let mut env = env;
  if options.cache {
    env = enable_cache(env);
  }
  if options.sanitize {
    env = enable_sanitizer(env);
  }

  let env = finalize(env, &registry.include_dirs(), &options.build_dir);
  let components = map_components(registry, &env, root)?;

  let mut graph = Vec::new();
  write_build_graph(&mut graph, &components, &env).map_err(|source| ConfigureError::Write {
    path: env.ninjafile.clone(),
    source,
  })?;
  let build_json = serde_json::to_string_pretty(&components).map_err(|source| ConfigureError::Serialize {
    what: "component map",
    source,
  })?;
  let env_json = serde_json::to_string_pretty(&env).map_err(|source| ConfigureError::Serialize {
    what: "environment",
    source,
  })?;

  let dir = root.join(&env.dir);
  fs::create_dir_all(&dir).map_err(|source| ConfigureError::Write {
    path: dir.clone(),
    source,
  })?;
  write_atomic(&root.join(&env.ninjafile), &graph)?;
  write_atomic(&dir.join(BUILD_JSON_FILENAME), build_json.as_bytes())?;
  write_atomic(&dir.join(ENV_JSON_FILENAME), env_json.as_bytes())?;

  info!(
    env = %env.id,
    hash = %env.hash.short(),
    components = components.len(),
    dir = %env.dir.display(),
    "configured build"
  );

  Ok(Configured {
    root: root.to_path_buf(),
    env,
    components,
  })
}

/// Look `name` up in `registry`, then [`configure`].
pub fn configure_named(
  root: &Path,
  registry: &EnvRegistry,
  name: &str,
  options: &ConfigureOptions,
) -> Result<Configured, ConfigureError> {
  let env = registry.get(name)?.clone();
  configure(root, env, options)
}
