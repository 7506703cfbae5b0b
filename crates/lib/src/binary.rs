//! The binary being released and the names of its per-platform artifacts.

use crate::platform::Platform;

/// A versioned binary together with the platforms it is built for.
///
/// The version is fixed at construction, after it has been resolved from
/// source control, so build and clean passes always derive the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDescriptor {
  name: String,
  version: String,
  targets: Vec<Platform>,
}

impl BinaryDescriptor {
  pub fn new(name: impl Into<String>, version: impl Into<String>, targets: Vec<Platform>) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
      targets,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn targets(&self) -> &[Platform] {
    &self.targets
  }

  /// Returns the artifact file name for a platform, e.g.
  /// `example-command_1.2.3_windows-x86_64.exe`.
  pub fn artifact_name(&self, platform: Platform) -> String {
    format!(
      "{}_{}_{}-{}{}",
      self.name,
      self.version,
      platform.os,
      platform.arch,
      platform.os.exe_suffix()
    )
  }

  /// Returns the artifact names of every target, in target order.
  pub fn artifact_names(&self) -> Vec<String> {
    self.targets.iter().map(|t| self.artifact_name(*t)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::{Arch, Os, default_targets};

  fn descriptor() -> BinaryDescriptor {
    BinaryDescriptor::new("example-command", "1.2.3", default_targets())
  }

  #[test]
  fn artifact_name_format() {
    let bin = descriptor();
    assert_eq!(
      bin.artifact_name(Platform::new(Os::Linux, Arch::X86_64)),
      "example-command_1.2.3_linux-x86_64"
    );
    assert_eq!(
      bin.artifact_name(Platform::new(Os::MacOs, Arch::Aarch64)),
      "example-command_1.2.3_darwin-aarch64"
    );
  }

  #[test]
  fn exe_suffix_only_for_windows() {
    let bin = descriptor();
    for platform in bin.targets() {
      let name = bin.artifact_name(*platform);
      let prefix = format!("example-command_1.2.3_{}-{}", platform.os, platform.arch);
      assert!(name.starts_with(&prefix), "{name} should start with {prefix}");
      assert_eq!(name.ends_with(".exe"), platform.os == Os::Windows, "{name}");
      assert_eq!(name.len() - prefix.len(), platform.os.exe_suffix().len());
    }
  }

  #[test]
  fn artifact_names_follow_target_order() {
    let bin = BinaryDescriptor::new(
      "app",
      "0.1.0-3-gabc123",
      vec![
        Platform::new(Os::Windows, Arch::X86),
        Platform::new(Os::Linux, Arch::Aarch64),
      ],
    );
    assert_eq!(
      bin.artifact_names(),
      vec!["app_0.1.0-3-gabc123_windows-x86.exe", "app_0.1.0-3-gabc123_linux-aarch64"]
    );
  }
}
