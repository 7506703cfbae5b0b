//! Implementation of `xbuild --clean`.

use std::path::Path;

use anyhow::Result;

use xbuild_lib::Config;

use crate::output::{OutputFormat, print_clean_report};

/// Remove the artifacts of every configured target.
///
/// Removal failures are reported but never make the command fail.
pub fn cmd_clean(config: &Config, dir: &Path, output: OutputFormat) -> Result<()> {
  let rt = super::runtime()?;
  let orch = super::orchestrator(&rt, config, dir)?;

  let report = rt.block_on(orch.clean_all());

  print_clean_report(&report, output)
}
