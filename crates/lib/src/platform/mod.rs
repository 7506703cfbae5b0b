pub mod arch;
pub mod os;

pub use arch::Arch;
pub use os::Os;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing or detecting a platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
  #[error("unknown operating system: {0} (expected linux, darwin or windows)")]
  UnknownOs(String),

  #[error("unknown architecture: {0} (expected x86, x86_64 or aarch64)")]
  UnknownArch(String),

  #[error("unsupported host platform {os}/{arch}; pass --os and --arch explicitly")]
  UnsupportedHost { os: String, arch: String },
}

/// Target platform: an operating system and architecture pair (e.g., "linux-x86_64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the host platform
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      os: Os::current()?,
      arch: Arch::current()?,
    })
  }

  /// Like [`Platform::current`], but reports what the host actually is.
  pub fn detect() -> Result<Self, PlatformError> {
    Self::current().ok_or_else(|| PlatformError::UnsupportedHost {
      os: std::env::consts::OS.to_string(),
      arch: std::env::consts::ARCH.to_string(),
    })
  }

  /// Rust target triple for this platform (e.g., "aarch64-apple-darwin").
  ///
  /// Windows targets use the MSVC ABI when the host is Windows and the GNU
  /// (mingw) ABI when cross-compiling from anywhere else.
  pub fn target_triple(&self) -> String {
    let arch = self.arch.triple_prefix();
    match self.os {
      Os::Linux => format!("{arch}-unknown-linux-gnu"),
      Os::MacOs => format!("{arch}-apple-darwin"),
      Os::Windows if Os::current() == Some(Os::Windows) => format!("{arch}-pc-windows-msvc"),
      Os::Windows => format!("{arch}-pc-windows-gnu"),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.os, self.arch)
  }
}

/// Targets built by `--release` when no configuration overrides them.
pub fn default_targets() -> Vec<Platform> {
  vec![
    Platform::new(Os::Linux, Arch::X86),
    Platform::new(Os::Linux, Arch::X86_64),
    Platform::new(Os::Windows, Arch::X86),
    Platform::new(Os::Windows, Arch::X86_64),
    Platform::new(Os::MacOs, Arch::X86_64),
    Platform::new(Os::MacOs, Arch::Aarch64),
  ]
}
