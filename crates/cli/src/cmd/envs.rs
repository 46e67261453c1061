use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use sk_lib::env::{EnvRegistry, env_id, fingerprint};

use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
struct EnvEntry {
  name: String,
  id: String,
  hash: String,
}

pub fn cmd_envs(output: OutputFormat) -> Result<i32> {
  let registry = EnvRegistry::builtin();
  let entries: Vec<EnvEntry> = registry
    .iter()
    .map(|(name, env)| EnvEntry {
      name: name.to_string(),
      id: env_id(env),
      hash: fingerprint(env).short().to_string(),
    })
    .collect();

  if output.is_json() {
    print_json(&entries)?;
  } else {
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
      println!(
        "  {:<width$}  {}  {}",
        entry.name,
        entry.hash.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        entry.id,
        width = width
      );
    }
  }

  Ok(0)
}
