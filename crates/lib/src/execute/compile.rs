//! Compile action: run the toolchain for one target.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::execute::types::ExecuteError;
use crate::toolchain::Invocation;

/// Run an expanded toolchain invocation in `dir`.
///
/// The child gets exactly the invocation's environment and inherits our
/// stdout/stderr, so output from concurrent builds interleaves live. The
/// child is killed if this future is dropped.
///
/// Returns the path of the artifact on success.
pub async fn compile(invocation: &Invocation, dir: &Path) -> Result<PathBuf, ExecuteError> {
  info!(artifact = %invocation.artifact, "building binary");
  debug!(program = %invocation.program, args = ?invocation.args, "spawning toolchain");

  let status = Command::new(&invocation.program)
    .args(&invocation.args)
    .current_dir(dir)
    .env_clear()
    .envs(invocation.env.iter())
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .kill_on_drop(true)
    .status()
    .await
    .map_err(|source| ExecuteError::Spawn {
      program: invocation.program.clone(),
      artifact: invocation.artifact.clone(),
      source,
    })?;

  if !status.success() {
    return Err(ExecuteError::CompileFailed {
      artifact: invocation.artifact.clone(),
      code: status.code(),
    });
  }

  let artifact = dir.join(&invocation.artifact);

  if let Some(produced) = &invocation.produces {
    let from = dir.join(produced);
    debug!(from = %from.display(), to = %artifact.display(), "collecting artifact");
    tokio::fs::copy(&from, &artifact)
      .await
      .map_err(|source| ExecuteError::Collect {
        from,
        to: artifact.clone(),
        source,
      })?;
  }

  info!(artifact = %invocation.artifact, "built binary");
  Ok(artifact)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;
  use crate::env::EnvSnapshot;
  use tempfile::TempDir;

  fn sh(script: &str, env: EnvSnapshot, produces: Option<&str>) -> Invocation {
    Invocation {
      program: "/bin/sh".to_string(),
      args: vec!["-c".to_string(), script.to_string()],
      env,
      produces: produces.map(str::to_string),
      artifact: "app_1.0.0_linux-x86_64".to_string(),
    }
  }

  fn path_only() -> EnvSnapshot {
    EnvSnapshot::from_pairs([("PATH", std::env::var_os("PATH").unwrap_or_default())])
  }

  #[tokio::test]
  async fn toolchain_writes_output_directly() {
    let dir = TempDir::new().unwrap();
    let inv = sh("echo built > app_1.0.0_linux-x86_64", path_only(), None);

    let artifact = compile(&inv, dir.path()).await.unwrap();

    assert_eq!(artifact, dir.path().join("app_1.0.0_linux-x86_64"));
    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "built\n");
  }

  #[tokio::test]
  async fn produced_file_is_copied_to_artifact_name() {
    let dir = TempDir::new().unwrap();
    let inv = sh("mkdir -p out && echo binary > out/app", path_only(), Some("out/app"));

    let artifact = compile(&inv, dir.path()).await.unwrap();

    assert_eq!(std::fs::read_to_string(artifact).unwrap(), "binary\n");
    assert!(dir.path().join("out/app").exists());
  }

  #[tokio::test]
  async fn child_sees_only_invocation_env() {
    let dir = TempDir::new().unwrap();
    let mut env = path_only();
    env.set("TARGET_OS", "windows");
    let inv = sh(
      "printf '%s:%s' \"$TARGET_OS\" \"${HOME:-unset}\" > app_1.0.0_linux-x86_64",
      env,
      None,
    );

    let artifact = compile(&inv, dir.path()).await.unwrap();

    assert_eq!(std::fs::read_to_string(artifact).unwrap(), "windows:unset");
  }

  #[tokio::test]
  async fn nonzero_exit_is_compile_failure() {
    let dir = TempDir::new().unwrap();
    let inv = sh("exit 2", path_only(), None);

    let result = compile(&inv, dir.path()).await;

    assert!(matches!(
      result,
      Err(ExecuteError::CompileFailed { code: Some(2), ref artifact }) if artifact == "app_1.0.0_linux-x86_64"
    ));
  }

  #[tokio::test]
  async fn missing_produced_file_is_collect_error() {
    let dir = TempDir::new().unwrap();
    let inv = sh("true", path_only(), Some("target/release/app"));

    let result = compile(&inv, dir.path()).await;

    assert!(matches!(result, Err(ExecuteError::Collect { .. })));
    assert!(!dir.path().join("app_1.0.0_linux-x86_64").exists());
  }

  #[tokio::test]
  async fn missing_program_is_spawn_error() {
    let dir = TempDir::new().unwrap();
    let mut inv = sh("true", path_only(), None);
    inv.program = "/nonexistent/toolchain".to_string();

    let result = compile(&inv, dir.path()).await;

    assert!(matches!(result, Err(ExecuteError::Spawn { .. })));
  }
}
