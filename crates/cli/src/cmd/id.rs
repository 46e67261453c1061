use anyhow::Result;
use rand::RngExt;

use crate::output::{OutputFormat, print_json};

fn format_id(id: u64) -> String {
  format!("{:#x}", id)
}

pub fn cmd_id(output: OutputFormat) -> Result<i32> {
  let mut rng = rand::rng();
  let id = format_id(rng.random());

  if output.is_json() {
    print_json(&serde_json::json!({ "id": id }))?;
  } else {
    println!("{}", id);
  }

  Ok(0)
}
