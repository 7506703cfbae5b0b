//! Implementation of the default single-platform build.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use xbuild_lib::{Config, Platform};

use crate::output::{OutputFormat, print_build_summary, print_building};

/// Build the binary for one platform (the host unless `--os`/`--arch` say otherwise).
pub fn cmd_build(config: &Config, dir: &Path, platform: Platform, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let rt = super::runtime()?;
  let orch = super::orchestrator(&rt, config, dir)?;
  let descriptor = orch.descriptor();

  print_building(&descriptor.artifact_name(platform), output);

  let artifact = rt.block_on(orch.build_one(platform)).context("Build failed")?;

  print_build_summary(descriptor.version(), platform, &artifact, start.elapsed(), output)
}
