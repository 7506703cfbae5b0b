//! Types for build and clean passes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placeholder::PlaceholderError;
use crate::platform::Platform;

/// Errors raised by a single target's build or clean unit.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// A toolchain template could not be expanded.
  #[error("placeholder error: {0}")]
  Placeholder(#[from] PlaceholderError),

  /// The toolchain could not be started.
  #[error("failed to run {program} for {artifact}: {source}")]
  Spawn {
    program: String,
    artifact: String,
    #[source]
    source: std::io::Error,
  },

  /// The toolchain exited unsuccessfully.
  #[error("build of {artifact} failed with exit code {code:?}")]
  CompileFailed { artifact: String, code: Option<i32> },

  /// The toolchain succeeded but its output could not be copied into place.
  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Collect {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Removing an artifact failed for a reason other than it being absent.
  #[error("failed to remove {artifact}: {source}")]
  Remove {
    artifact: String,
    #[source]
    source: std::io::Error,
  },

  /// The unit was cancelled because a sibling failed under fail-fast.
  #[error("{artifact} was cancelled after another target failed")]
  Aborted { artifact: String },

  /// The unit's task panicked.
  #[error("{artifact} task panicked")]
  Panicked { artifact: String },
}

/// What happens to in-flight units once one of them fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
  /// Let every unit run to completion, then report the first failure.
  #[default]
  WaitAll,

  /// Cancel the remaining units (killing their processes) on first failure.
  FailFast,
}

/// Result of one unit of a fan-out.
#[derive(Debug)]
pub struct TargetOutcome<T> {
  pub platform: Platform,
  pub artifact: String,

  /// Position in completion order; `None` if the unit never finished.
  pub finished: Option<usize>,

  pub result: Result<T, ExecuteError>,
}

/// Successful outcome of deleting one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
  Removed,
  Absent,
}

/// Result of a clean pass. Clean never fails as a whole.
#[derive(Debug, Default)]
pub struct CleanReport {
  pub removed: Vec<String>,
  pub absent: Vec<String>,
  pub failed: Vec<(String, ExecuteError)>,
}

impl CleanReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }

  pub fn total(&self) -> usize {
    self.removed.len() + self.absent.len() + self.failed.len()
  }
}
