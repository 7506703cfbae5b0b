//! Version resolution from source control.
//!
//! The version is the nearest tag (or the abbreviated commit when there is no
//! tag) as reported by `git describe --tags --always`, without a leading `v`.

use std::path::Path;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors that can occur while resolving the version.
#[derive(Debug, Error)]
pub enum VersionError {
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("{program} exited with code {code:?}")]
  Failed { program: String, code: Option<i32> },

  #[error("{program} printed non UTF-8 output")]
  InvalidOutput { program: String },

  #[error("{program} printed an empty version")]
  Empty { program: String },
}

/// The command whose output is the version string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionCommand {
  pub program: String,
  pub args: Vec<String>,
}

impl Default for VersionCommand {
  fn default() -> Self {
    Self {
      program: "git".to_string(),
      args: vec!["describe".to_string(), "--tags".to_string(), "--always".to_string()],
    }
  }
}

/// Trim whitespace and drop a single leading `v`.
pub fn normalize_version(raw: &str) -> &str {
  let trimmed = raw.trim();
  trimmed.strip_prefix('v').unwrap_or(trimmed)
}

/// Run the version command in `dir` and return the normalized version.
///
/// The command's stderr goes straight to ours so git's diagnostics (e.g. "not
/// a git repository") reach the user.
pub async fn resolve_version(command: &VersionCommand, dir: &Path) -> Result<String, VersionError> {
  debug!(program = %command.program, args = ?command.args, "resolving version");

  let output = Command::new(&command.program)
    .args(&command.args)
    .current_dir(dir)
    .stdin(Stdio::null())
    .stderr(Stdio::inherit())
    .output()
    .await
    .map_err(|source| VersionError::Spawn {
      program: command.program.clone(),
      source,
    })?;

  if !output.status.success() {
    return Err(VersionError::Failed {
      program: command.program.clone(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8(output.stdout).map_err(|_| VersionError::InvalidOutput {
    program: command.program.clone(),
  })?;

  let version = normalize_version(&stdout);
  if version.is_empty() {
    return Err(VersionError::Empty {
      program: command.program.clone(),
    });
  }

  info!(version = %version, "resolved version");
  Ok(version.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn strips_leading_v() {
    assert_eq!(normalize_version("v1.2.3\n"), "1.2.3");
  }

  #[test]
  fn describe_output_without_v_is_unchanged() {
    assert_eq!(normalize_version("1.2.3-4-gabc123\n"), "1.2.3-4-gabc123");
  }

  #[test]
  fn strips_only_one_v() {
    assert_eq!(normalize_version("vv2"), "v2");
  }

  #[test]
  fn commit_hash_fallback_is_kept() {
    assert_eq!(normalize_version("  abc1234  "), "abc1234");
  }

  #[cfg(unix)]
  fn sh(script: &str) -> VersionCommand {
    VersionCommand {
      program: "/bin/sh".to_string(),
      args: vec!["-c".to_string(), script.to_string()],
    }
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn resolves_tag_output() {
    let dir = TempDir::new().unwrap();
    let version = resolve_version(&sh("echo v1.2.3"), dir.path()).await.unwrap();
    assert_eq!(version, "1.2.3");
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn runs_in_given_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("VERSION"), "v0.9.0\n").unwrap();

    let version = resolve_version(&sh("cat VERSION"), dir.path()).await.unwrap();
    assert_eq!(version, "0.9.0");
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn nonzero_exit_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = resolve_version(&sh("echo 'fatal: not a git repository' >&2; exit 128"), dir.path()).await;
    assert!(matches!(result, Err(VersionError::Failed { code: Some(128), .. })));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn empty_output_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = resolve_version(&sh("echo v"), dir.path()).await;
    assert!(matches!(result, Err(VersionError::Empty { .. })));
  }

  #[tokio::test]
  async fn missing_program_is_a_spawn_error() {
    let dir = TempDir::new().unwrap();
    let command = VersionCommand {
      program: "xbuild-definitely-not-installed".to_string(),
      args: vec![],
    };
    let result = resolve_version(&command, dir.path()).await;
    assert!(matches!(result, Err(VersionError::Spawn { .. })));
  }
}
