//! `xbuild.toml` configuration.
//!
//! Every section is optional. A missing file means "use the defaults", which
//! build `example-command` for six desktop targets with cargo.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::execute::FailurePolicy;
use crate::placeholder::PlaceholderError;
use crate::platform::{Platform, default_targets};
use crate::toolchain::Toolchain;
use crate::version::VersionCommand;

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILENAME: &str = "xbuild.toml";

/// Name of the binary built when the configuration does not name one.
pub const DEFAULT_BINARY_NAME: &str = "example-command";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: Box<toml::de::Error>,
  },

  #[error("binary name must not be empty")]
  EmptyName,

  #[error("at least one target platform is required")]
  NoTargets,

  #[error("invalid toolchain template: {0}")]
  Template(#[from] PlaceholderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinaryConfig {
  pub name: String,
}

impl Default for BinaryConfig {
  fn default() -> Self {
    Self {
      name: DEFAULT_BINARY_NAME.to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecuteSection {
  #[serde(default)]
  pub failure: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  #[serde(default)]
  pub binary: BinaryConfig,

  #[serde(default = "default_targets")]
  pub targets: Vec<Platform>,

  #[serde(default)]
  pub version: VersionCommand,

  #[serde(default)]
  pub toolchain: Toolchain,

  #[serde(default)]
  pub execute: ExecuteSection,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      binary: BinaryConfig::default(),
      targets: default_targets(),
      version: VersionCommand::default(),
      toolchain: Toolchain::default(),
      execute: ExecuteSection::default(),
    }
  }
}

impl Config {
  /// Parse and validate configuration text. `path` is only used in errors.
  pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: Box::new(e),
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Load configuration.
  ///
  /// An explicit `path` must exist. Without one, `xbuild.toml` in `dir` is
  /// used if present and the defaults otherwise.
  pub fn load(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
    let path = match path {
      Some(p) => p.to_path_buf(),
      None => {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
          debug!(dir = %dir.display(), "no config file found, using defaults");
          return Ok(Self::default());
        }
        candidate
      }
    };

    debug!(path = %path.display(), "loading config");
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    Self::from_toml(&text, &path)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.binary.name.trim().is_empty() {
      return Err(ConfigError::EmptyName);
    }
    if self.targets.is_empty() {
      return Err(ConfigError::NoTargets);
    }
    self.toolchain.validate()?;
    Ok(())
  }
}
