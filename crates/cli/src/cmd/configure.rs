use std::path::Path;

use anyhow::Result;

use super::EnvArgs;
use crate::output::{OutputFormat, print_json, print_stat, print_success, truncate_hash};

pub fn cmd_configure(root: &Path, env: &EnvArgs, output: OutputFormat) -> Result<i32> {
  let configured = env.configure(root)?;
  let final_env = &configured.env;

  if output.is_json() {
    print_json(&serde_json::json!({
      "env": final_env.id,
      "hash": final_env.hash,
      "dir": final_env.dir,
      "ninjafile": final_env.ninjafile,
      "components": configured.components.len(),
    }))?;
  } else {
    print_success(&format!("Configured {}", env.env));
    print_stat("Id", &final_env.id);
    print_stat("Hash", truncate_hash(&final_env.hash.0));
    print_stat("Directory", &final_env.dir.display().to_string());
    print_stat("Components", &configured.components.len().to_string());
  }

  Ok(0)
}
