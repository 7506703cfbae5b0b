//! A program that prints its own version.
//!
//! The version is stamped in at compile time through the
//! `EXAMPLE_COMMAND_VERSION` environment variable and reads `devel` when the
//! binary was built without it.

/// Version stamped in at compile time.
pub const VERSION: &str = match option_env!("EXAMPLE_COMMAND_VERSION") {
  Some(version) => version,
  None => "devel",
};

/// Compiler that produced this binary, e.g. `rustc 1.85.0 (4d91de4e4 2025-02-17)`.
pub const RUNTIME: &str = env!("EXAMPLE_COMMAND_RUNTIME");

/// Format the greeting line (without the trailing newline).
pub fn greeting(program: &str, version: &str, runtime: &str) -> String {
  format!("{program} {version} (runtime: {runtime})")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn greeting_format() {
    assert_eq!(
      greeting("app", "1.2.3", "rustc 1.85.0"),
      "app 1.2.3 (runtime: rustc 1.85.0)"
    );
  }

  #[test]
  fn runtime_names_the_compiler() {
    assert!(RUNTIME.starts_with("rustc"), "{RUNTIME}");
  }

  #[test]
  fn version_is_never_empty() {
    assert!(!VERSION.is_empty());
  }
}
