use std::path::Path;

use anyhow::{Context, Result};

use sk_lib::runner::{RunnerConfig, run_component};

use super::EnvArgs;

/// Build, then run `component`. The component's exit code becomes ours.
pub fn cmd_run(root: &Path, component: &str, args: &[String], env: &EnvArgs, jobs: usize) -> Result<i32> {
  let configured = env.configure(root)?;
  let config = RunnerConfig {
    jobs,
    ..RunnerConfig::default()
  };

  run_component(&configured, component, args, &config)
    .with_context(|| format!("Failed to run component '{}'", component))
}
