use std::path::Path;

use anyhow::{Context, Result};

use sk_lib::clean::{clean, nuke};
use sk_lib::paths::{build_dir, cache_dir};

use crate::output::{OutputFormat, print_info, print_json, print_success};

fn report(removed: bool, what: &str, output: OutputFormat) -> Result<i32> {
  if output.is_json() {
    print_json(&serde_json::json!({ "removed": removed }))?;
  } else if removed {
    print_success(&format!("Removed {}", what));
  } else {
    print_info("Nothing to remove");
  }
  Ok(0)
}

pub fn cmd_clean(root: &Path, output: OutputFormat) -> Result<i32> {
  let removed = clean(root, &build_dir()).context("Failed to clean")?;
  report(removed, "build directory", output)
}

pub fn cmd_nuke(root: &Path, output: OutputFormat) -> Result<i32> {
  let removed = nuke(root, &build_dir(), &cache_dir()).context("Failed to nuke")?;
  report(removed, "build and cache directories", output)
}
