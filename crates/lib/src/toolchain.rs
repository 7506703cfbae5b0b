//! The external compiler command and how it is specialised per target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::binary::BinaryDescriptor;
use crate::env::EnvSnapshot;
use crate::placeholder::{self, Placeholder, PlaceholderError, Resolver};
use crate::platform::Platform;

/// Environment variable the greeting program reads its version from at compile time.
pub const VERSION_ENV: &str = "EXAMPLE_COMMAND_VERSION";

/// Compiler invocation template.
///
/// `args`, `env` values and `produces` may contain placeholders (see
/// [`crate::placeholder`]). When `produces` is set, the toolchain writes its
/// output there and the file is copied to the artifact name afterwards;
/// otherwise the toolchain is expected to write `$${output}` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Toolchain {
  pub program: String,

  #[serde(default)]
  pub args: Vec<String>,

  /// Target selector keys set on top of the inherited environment.
  #[serde(default)]
  pub env: BTreeMap<String, String>,

  #[serde(default)]
  pub produces: Option<String>,
}

impl Default for Toolchain {
  /// `cargo build` for the configured binary. The target is selected through
  /// `CARGO_BUILD_TARGET` and the version is stamped through [`VERSION_ENV`],
  /// both replacing any inherited value in the child's environment.
  fn default() -> Self {
    Self {
      program: "cargo".to_string(),
      args: vec![
        "build".to_string(),
        "--release".to_string(),
        "--bin".to_string(),
        "$${name}".to_string(),
      ],
      env: BTreeMap::from([
        ("CARGO_BUILD_TARGET".to_string(), "$${triple}".to_string()),
        (VERSION_ENV.to_string(), "$${version}".to_string()),
      ]),
      produces: Some("target/$${triple}/release/$${name}$${exe}".to_string()),
    }
  }
}

/// A fully expanded toolchain command for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub env: EnvSnapshot,
  pub produces: Option<String>,
  pub artifact: String,
}

/// Resolves placeholders for a single (descriptor, platform) pair.
pub struct TargetResolver<'a> {
  descriptor: &'a BinaryDescriptor,
  platform: Platform,
}

impl<'a> TargetResolver<'a> {
  pub fn new(descriptor: &'a BinaryDescriptor, platform: Platform) -> Self {
    Self { descriptor, platform }
  }
}

impl Resolver for TargetResolver<'_> {
  fn resolve(&self, placeholder: Placeholder) -> String {
    match placeholder {
      Placeholder::Name => self.descriptor.name().to_string(),
      Placeholder::Version => self.descriptor.version().to_string(),
      Placeholder::Os => self.platform.os.to_string(),
      Placeholder::Arch => self.platform.arch.to_string(),
      Placeholder::GoOs => self.platform.os.go_name().to_string(),
      Placeholder::GoArch => self.platform.arch.go_name().to_string(),
      Placeholder::Triple => self.platform.target_triple(),
      Placeholder::Output => self.descriptor.artifact_name(self.platform),
      Placeholder::Exe => self.platform.os.exe_suffix().to_string(),
    }
  }
}

impl Toolchain {
  /// Check that every template parses, so configuration mistakes surface
  /// before any compiler is started.
  pub fn validate(&self) -> Result<(), PlaceholderError> {
    let templates = self
      .args
      .iter()
      .chain(self.env.values())
      .chain(self.produces.iter());

    for template in templates {
      placeholder::parse(template)?;
    }
    Ok(())
  }

  /// Expand the templates for `platform`, layering the target keys over a
  /// private copy of `base_env`.
  pub fn prepare(
    &self,
    descriptor: &BinaryDescriptor,
    platform: Platform,
    base_env: &EnvSnapshot,
  ) -> Result<Invocation, PlaceholderError> {
    let resolver = TargetResolver::new(descriptor, platform);

    let args = self
      .args
      .iter()
      .map(|arg| placeholder::substitute(arg, &resolver))
      .collect::<Result<Vec<_>, _>>()?;

    let mut env = base_env.clone();
    for (key, value) in &self.env {
      env.set(key, placeholder::substitute(value, &resolver)?);
    }

    let produces = self
      .produces
      .as_deref()
      .map(|p| placeholder::substitute(p, &resolver))
      .transpose()?;

    Ok(Invocation {
      program: self.program.clone(),
      args,
      env,
      produces,
      artifact: descriptor.artifact_name(platform),
    })
  }
}
