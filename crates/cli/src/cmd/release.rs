//! Implementation of `xbuild --release`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use xbuild_lib::Config;

use crate::output::{OutputFormat, print_building, print_release_summary};

/// Build every configured target concurrently.
///
/// Fails if any target fails; with the default policy this only happens after
/// every other target has finished.
pub fn cmd_release(config: &Config, dir: &Path, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let rt = super::runtime()?;
  let orch = super::orchestrator(&rt, config, dir)?;
  let descriptor = orch.descriptor();

  for name in descriptor.artifact_names() {
    print_building(&name, output);
  }

  let artifacts = rt.block_on(orch.build_all()).context("Release build failed")?;

  print_release_summary(descriptor.version(), &artifacts, start.elapsed(), output)
}
