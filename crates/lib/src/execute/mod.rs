//! Build and clean orchestration.
//!
//! This module fans out one unit of work per target platform and joins them:
//! - `build_all` compiles every target concurrently
//! - `clean_all` removes every target's artifact concurrently
//! - `build_one` compiles a single platform without fan-out
//!
//! Units share only read-only state. Each compile unit layers its target keys
//! over a private copy of the inherited environment.

pub mod compile;
pub mod remove;
pub mod types;

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::binary::BinaryDescriptor;
use crate::env::EnvSnapshot;
use crate::platform::Platform;
use crate::toolchain::Toolchain;

pub use compile::compile;
pub use remove::remove;
pub use types::{CleanReport, ExecuteError, FailurePolicy, Removal, TargetOutcome};

/// Run `unit` once per target of `descriptor`, concurrently, and wait for all of them.
///
/// Every unit is spawned up front with no concurrency limit. Under
/// [`FailurePolicy::WaitAll`] the join waits for every unit even after one
/// fails; under [`FailurePolicy::FailFast`] the remaining units are aborted
/// and reported as [`ExecuteError::Aborted`]. A unit that panics is reported
/// as [`ExecuteError::Panicked`] and counts as a failure.
///
/// Outcomes are returned in target order.
pub async fn for_each_target<T, F, Fut>(
  descriptor: &Arc<BinaryDescriptor>,
  policy: FailurePolicy,
  unit: F,
) -> Vec<TargetOutcome<T>>
where
  T: Send + 'static,
  F: Fn(Arc<BinaryDescriptor>, Platform) -> Fut,
  Fut: Future<Output = Result<T, ExecuteError>> + Send + 'static,
{
  let targets = descriptor.targets();
  debug!(targets = targets.len(), policy = ?policy, "fanning out");

  let mut join_set = JoinSet::new();
  let mut indices = HashMap::with_capacity(targets.len());
  for (index, platform) in targets.iter().copied().enumerate() {
    let fut = unit(Arc::clone(descriptor), platform);
    let handle = join_set.spawn(async move { (index, fut.await) });
    indices.insert(handle.id(), index);
  }

  let mut slots: Vec<Option<(usize, Result<T, ExecuteError>)>> = targets.iter().map(|_| None).collect();
  let mut completed = 0;
  let mut aborted = false;

  while let Some(joined) = join_set.join_next().await {
    let (index, result) = match joined {
      Ok(done) => done,
      Err(e) if e.is_cancelled() => continue,
      Err(e) => {
        let Some(&index) = indices.get(&e.id()) else {
          error!(error = %e, "unknown task panicked");
          continue;
        };
        error!(platform = %targets[index], error = %e, "target task panicked");
        let artifact = descriptor.artifact_name(targets[index]);
        (index, Err(ExecuteError::Panicked { artifact }))
      }
    };

    if result.is_err() && policy == FailurePolicy::FailFast && !aborted {
      warn!(platform = %targets[index], "target failed, cancelling remaining units");
      join_set.abort_all();
      aborted = true;
    }
    slots[index] = Some((completed, result));
    completed += 1;
  }

  targets
    .iter()
    .zip(slots)
    .map(|(platform, slot)| {
      let artifact = descriptor.artifact_name(*platform);
      match slot {
        Some((order, result)) => TargetOutcome {
          platform: *platform,
          artifact,
          finished: Some(order),
          result,
        },
        None => TargetOutcome {
          platform: *platform,
          result: Err(if aborted {
            ExecuteError::Aborted {
              artifact: artifact.clone(),
            }
          } else {
            ExecuteError::Panicked {
              artifact: artifact.clone(),
            }
          }),
          artifact,
          finished: None,
        },
      }
    })
    .collect()
}

/// Drives build and clean passes for a single binary.
#[derive(Debug, Clone)]
pub struct Orchestrator {
  descriptor: Arc<BinaryDescriptor>,
  toolchain: Arc<Toolchain>,
  env: Arc<EnvSnapshot>,
  dir: PathBuf,
  policy: FailurePolicy,
}

impl Orchestrator {
  /// Create an orchestrator working in `dir`, inheriting the current
  /// process environment.
  pub fn new(descriptor: BinaryDescriptor, toolchain: Toolchain, dir: impl Into<PathBuf>) -> Self {
    Self {
      descriptor: Arc::new(descriptor),
      toolchain: Arc::new(toolchain),
      env: Arc::new(EnvSnapshot::capture()),
      dir: dir.into(),
      policy: FailurePolicy::default(),
    }
  }

  /// Replace the environment children inherit.
  pub fn with_env(mut self, env: EnvSnapshot) -> Self {
    self.env = Arc::new(env);
    self
  }

  pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn descriptor(&self) -> &BinaryDescriptor {
    &self.descriptor
  }

  /// Build every target concurrently.
  ///
  /// Returns the artifact paths in target order, or the first failure to be
  /// reported. All failures are logged.
  pub async fn build_all(&self) -> Result<Vec<PathBuf>, ExecuteError> {
    info!(
      binary = %self.descriptor.name(),
      version = %self.descriptor.version(),
      targets = self.descriptor.targets().len(),
      "building all targets"
    );

    let toolchain = Arc::clone(&self.toolchain);
    let env = Arc::clone(&self.env);
    let dir = self.dir.clone();

    let outcomes = for_each_target(&self.descriptor, self.policy, move |descriptor, platform| {
      let prepared = toolchain.prepare(&descriptor, platform, &env);
      let dir = dir.clone();
      async move { compile(&prepared?, &dir).await }
    })
    .await;

    let mut artifacts = Vec::with_capacity(outcomes.len());
    let mut first_failure: Option<(usize, ExecuteError)> = None;

    for outcome in outcomes {
      match outcome.result {
        Ok(path) => artifacts.push(path),
        Err(e) => {
          error!(platform = %outcome.platform, error = %e, "build failed");
          let order = outcome.finished.unwrap_or(usize::MAX);
          if first_failure.as_ref().is_none_or(|(first, _)| order < *first) {
            first_failure = Some((order, e));
          }
        }
      }
    }

    match first_failure {
      Some((_, e)) => Err(e),
      None => {
        info!(built = artifacts.len(), "all targets built");
        Ok(artifacts)
      }
    }
  }

  /// Build a single platform in the foreground.
  pub async fn build_one(&self, platform: Platform) -> Result<PathBuf, ExecuteError> {
    let invocation = self.toolchain.prepare(&self.descriptor, platform, &self.env)?;
    compile(&invocation, &self.dir).await
  }

  /// Remove every target's artifact concurrently.
  ///
  /// Missing artifacts are not errors; other failures are collected in the
  /// report and never stop sibling deletions.
  pub async fn clean_all(&self) -> CleanReport {
    let dir = self.dir.clone();

    let outcomes = for_each_target(&self.descriptor, FailurePolicy::WaitAll, move |descriptor, platform| {
      let artifact = descriptor.artifact_name(platform);
      let dir = dir.clone();
      async move { remove(&artifact, &dir).await }
    })
    .await;

    let mut report = CleanReport::default();
    for outcome in outcomes {
      match outcome.result {
        Ok(Removal::Removed) => report.removed.push(outcome.artifact),
        Ok(Removal::Absent) => report.absent.push(outcome.artifact),
        Err(e) => {
          debug!(artifact = %outcome.artifact, error = %e, "failed to remove binary");
          report.failed.push((outcome.artifact, e));
        }
      }
    }

    info!(
      removed = report.removed.len(),
      absent = report.absent.len(),
      failed = report.failed.len(),
      "clean complete"
    );
    report
  }
}
