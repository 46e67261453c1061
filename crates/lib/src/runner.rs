//! Invoking the build executor and built artifacts.
//!
//! Exit codes are handed back untouched. Interpreting them is up to the
//! caller.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::configure::Configured;
use crate::files::LookupError;
use crate::paths;

#[derive(Debug, Error)]
pub enum RunnerError {
  #[error("failed to spawn {program}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Lookup(#[from] LookupError),
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
  /// Passed to the executor as `-j`.
  pub jobs: usize,
  /// Executor program, looked up on `PATH` when it is a bare name.
  pub ninja: String,
}

impl Default for RunnerConfig {
  fn default() -> Self {
    Self {
      jobs: 1,
      ninja: paths::ninja_program(),
    }
  }
}

/// Resolve a program relative to the project root unless it is a bare name or absolute.
fn program_path(root: &Path, program: &str) -> PathBuf {
  let path = Path::new(program);
  if path.is_relative() && path.components().count() > 1 {
    root.join(path)
  } else {
    path.to_path_buf()
  }
}

fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      warn!(signal, "process terminated by signal");
      return 128 + signal;
    }
  }

  1
}

fn spawn(mut command: Command, program: &Path) -> Result<i32, RunnerError> {
  let status = command.status().map_err(|source| RunnerError::Spawn {
    program: program.display().to_string(),
    source,
  })?;
  let code = exit_code(status);
  debug!(program = %program.display(), code, "process exited");
  Ok(code)
}

/// Run the executor on the configured graph. No targets means the default target.
pub fn build(configured: &Configured, targets: &[PathBuf], config: &RunnerConfig) -> Result<i32, RunnerError> {
  let program = program_path(&configured.root, &config.ninja);
  info!(
    program = %program.display(),
    jobs = config.jobs,
    targets = targets.len(),
    "running build"
  );

  let mut command = Command::new(&program);
  command
    .arg("-j")
    .arg(config.jobs.to_string())
    .arg("-f")
    .arg(&configured.env.ninjafile)
    .args(targets)
    .current_dir(&configured.root);

  spawn(command, &program)
}

/// Build the artifacts of the named components.
///
/// Every id is checked before the executor starts.
pub fn build_components(configured: &Configured, ids: &[String], config: &RunnerConfig) -> Result<i32, RunnerError> {
  let targets = ids
    .iter()
    .map(|id| configured.components.output_of(id).map(Path::to_path_buf))
    .collect::<Result<Vec<_>, _>>()?;

  build(configured, &targets, config)
}

/// Build everything, then execute the artifact of `id` with `args`.
///
/// A failing build returns its exit code without running anything.
pub fn run_component(
  configured: &Configured,
  id: &str,
  args: &[String],
  config: &RunnerConfig,
) -> Result<i32, RunnerError> {
  let artifact = configured.root.join(configured.components.output_of(id)?);

  let code = build(configured, &[], config)?;
  if code != 0 {
    return Ok(code);
  }

  info!(component = %id, artifact = %artifact.display(), "running component");
  let mut command = Command::new(&artifact);
  command.args(args).current_dir(&configured.root);

  spawn(command, &artifact)
}
