mod build;
mod clean;
mod list;
mod release;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use list::cmd_list;
pub use release::cmd_release;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::debug;

use xbuild_lib::version::resolve_version;
use xbuild_lib::{BinaryDescriptor, Config, Orchestrator};

/// Resolve the version and set up an orchestrator for `config`.
///
/// Version resolution happens here, once, before any target is touched.
fn orchestrator(rt: &Runtime, config: &Config, dir: &Path) -> Result<Orchestrator> {
  let version = rt
    .block_on(resolve_version(&config.version, dir))
    .context("Failed to resolve version")?;

  let descriptor = BinaryDescriptor::new(&config.binary.name, version, config.targets.clone());
  debug!(
    binary = %descriptor.name(),
    version = %descriptor.version(),
    dir = %dir.display(),
    "descriptor ready"
  );

  Ok(Orchestrator::new(descriptor, config.toolchain.clone(), dir).with_policy(config.execute.failure))
}

fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
