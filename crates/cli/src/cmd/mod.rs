mod build;
mod clean;
mod configure;
mod envs;
mod id;
mod run;

pub use build::cmd_build;
pub use clean::{cmd_clean, cmd_nuke};
pub use configure::cmd_configure;
pub use envs::cmd_envs;
pub use id::cmd_id;
pub use run::cmd_run;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use sk_lib::configure::{ConfigureOptions, Configured, configure_named};
use sk_lib::env::EnvRegistry;

/// Environment selection shared by every command that configures.
#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
  /// Target environment (see `sk envs`)
  #[arg(short, long, default_value = "host")]
  pub env: String,

  /// Do not prefix compilers with ccache
  #[arg(long)]
  pub no_cache: bool,

  /// Build without sanitizers
  #[arg(long)]
  pub no_sanitize: bool,
}

impl EnvArgs {
  pub fn options(&self) -> ConfigureOptions {
    ConfigureOptions {
      cache: !self.no_cache,
      sanitize: !self.no_sanitize,
      ..ConfigureOptions::default()
    }
  }

  /// Configure the project at `root` for the selected environment.
  pub fn configure(&self, root: &Path) -> Result<Configured> {
    debug!(env = %self.env, root = %root.display(), "configuring");
    configure_named(root, &EnvRegistry::builtin(), &self.env, &self.options())
      .with_context(|| format!("Failed to configure environment '{}'", self.env))
  }
}
