use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use sk_lib::runner::{RunnerConfig, build, build_components};

use super::EnvArgs;
use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_stat, print_success};

#[derive(Serialize)]
struct BuildReport<'a> {
  env: &'a str,
  hash: &'a str,
  targets: &'a [String],
  exit_code: i32,
  duration_ms: u128,
}

pub fn cmd_build(root: &Path, components: &[String], env: &EnvArgs, jobs: usize, output: OutputFormat) -> Result<i32> {
  let start = Instant::now();
  let configured = env.configure(root)?;
  let config = RunnerConfig {
    jobs,
    ..RunnerConfig::default()
  };

  if !output.is_json() {
    if components.is_empty() {
      print_info("Building all components");
    } else {
      print_info(&format!("Building {}", components.join(", ")));
    }
  }

  let code = if components.is_empty() {
    build(&configured, &[], &config)
  } else {
    build_components(&configured, components, &config)
  }
  .context("Failed to run build")?;

  if output.is_json() {
    print_json(&BuildReport {
      env: &configured.env.id,
      hash: &configured.env.hash.0,
      targets: components,
      exit_code: code,
      duration_ms: start.elapsed().as_millis(),
    })?;
  } else if code == 0 {
    print_success("Build complete");
    print_stat("Environment", &configured.env.id);
    print_stat("Duration", &format_duration(start.elapsed()));
  } else {
    print_error(&format!("Build failed with exit code {}", code));
  }

  Ok(code)
}
