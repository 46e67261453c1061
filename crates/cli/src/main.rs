mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::EnvArgs;
use output::{OutputFormat, print_error};

/// sk - configuration generator for multi-component C/C++ projects
#[derive(Parser)]
#[command(name = "sk")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root holding the component tree
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, global = true, value_enum, default_value = "text")]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure and build components (all of them when none are named)
  Build {
    /// Components to build
    components: Vec<String>,

    #[command(flatten)]
    env: EnvArgs,

    /// Parallel jobs passed to the executor
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
  },

  /// Build everything, then run a component's executable
  Run {
    /// Component to run
    component: String,

    /// Arguments passed to the component
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    #[command(flatten)]
    env: EnvArgs,

    /// Parallel jobs passed to the executor
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
  },

  /// Generate the build graph without building
  Configure {
    #[command(flatten)]
    env: EnvArgs,
  },

  /// List the available environments
  Envs,

  /// Remove the build directory
  Clean,

  /// Remove the build and cache directories
  Nuke,

  /// Print a random 64-bit identifier
  Id,
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = cli.root.as_path();
  let output = cli.output;
  let result = match cli.command {
    Commands::Build { components, env, jobs } => cmd::cmd_build(root, &components, &env, jobs, output),
    Commands::Run {
      component,
      args,
      env,
      jobs,
    } => cmd::cmd_run(root, &component, &args, &env, jobs),
    Commands::Configure { env } => cmd::cmd_configure(root, &env, output),
    Commands::Envs => cmd::cmd_envs(output),
    Commands::Clean => cmd::cmd_clean(root, output),
    Commands::Nuke => cmd::cmd_nuke(root, output),
    Commands::Id => cmd::cmd_id(output),
  };

  let code = match result {
    Ok(code) => code,
    Err(err) => {
      print_error(&format!("{:#}", err));
      1
    }
  };

  std::process::exit(code);
}
