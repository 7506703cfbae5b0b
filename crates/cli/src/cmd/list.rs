use std::path::Path;

use anyhow::Result;

use xbuild_lib::Config;

use crate::output::{OutputFormat, print_artifact_names};

/// Print the artifact name of every configured target, one per line.
pub fn cmd_list(config: &Config, dir: &Path, output: OutputFormat) -> Result<()> {
  let rt = super::runtime()?;
  let orch = super::orchestrator(&rt, config, dir)?;

  print_artifact_names(&orch.descriptor().artifact_names(), output)
}
