mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use xbuild_lib::Config;
use xbuild_lib::execute::FailurePolicy;
use xbuild_lib::platform::{Arch, Os, Platform};

use crate::output::{OutputFormat, print_error};

/// Cross-compile a binary for every release platform, stamped with its git version
#[derive(Parser)]
#[command(name = "xbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Build binaries for all target platforms
  #[arg(long)]
  release: bool,

  /// Remove all created binaries from the current directory
  #[arg(long)]
  clean: bool,

  /// Print the artifact name of every target platform
  #[arg(long)]
  list: bool,

  /// Operating system to build for [default: host]
  #[arg(long, value_name = "OS")]
  os: Option<Os>,

  /// Architecture to build for [default: host]
  #[arg(long, value_name = "ARCH")]
  arch: Option<Arch>,

  /// With --release, cancel the remaining builds as soon as one fails
  #[arg(long)]
  fail_fast: bool,

  /// Configuration file [default: ./xbuild.toml if present]
  #[arg(short, long, env = "XBUILD_CONFIG", value_name = "PATH")]
  config: Option<PathBuf>,

  /// Output format
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      debug!(error = ?e, "xbuild failed");
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let cwd = std::env::current_dir().context("Failed to determine working directory")?;
  let dir = dunce::canonicalize(&cwd).unwrap_or(cwd);

  let mut config = Config::load(cli.config.as_deref(), &dir).context("Failed to load configuration")?;
  if cli.fail_fast {
    config.execute.failure = FailurePolicy::FailFast;
  }
  debug!(
    dir = %dir.display(),
    targets = config.targets.len(),
    policy = ?config.execute.failure,
    "configuration loaded"
  );

  if cli.list {
    return cmd::cmd_list(&config, &dir, cli.output);
  }
  if cli.release {
    return cmd::cmd_release(&config, &dir, cli.output);
  }
  if cli.clean {
    return cmd::cmd_clean(&config, &dir, cli.output);
  }

  let platform = match (cli.os, cli.arch) {
    (Some(os), Some(arch)) => Platform::new(os, arch),
    (os, arch) => {
      let host = Platform::detect().context("Failed to detect host platform")?;
      Platform::new(os.unwrap_or(host.os), arch.unwrap_or(host.arch))
    }
  };
  cmd::cmd_build(&config, &dir, platform, cli.output)
}
