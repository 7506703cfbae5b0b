//! What `xbuild` prints for each mode.
//!
//! Every mode has a text rendering for terminals and a JSON rendering for
//! scripts. Progress and summaries go to stdout; warnings and errors go to
//! stderr so JSON output stays parseable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use xbuild_lib::Platform;
use xbuild_lib::execute::CleanReport;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct BuildSummary<'a> {
  version: &'a str,
  platform: String,
  artifact: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ReleaseSummary<'a> {
  version: &'a str,
  artifacts: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CleanSummary<'a> {
  removed: &'a [String],
  absent: &'a [String],
  failed: Vec<FailedRemoval<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct FailedRemoval<'a> {
  artifact: &'a str,
  error: String,
}

impl<'a> From<&'a CleanReport> for CleanSummary<'a> {
  fn from(report: &'a CleanReport) -> Self {
    Self {
      removed: &report.removed,
      absent: &report.absent,
      failed: report
        .failed
        .iter()
        .map(|(artifact, err)| FailedRemoval {
          artifact,
          error: err.to_string(),
        })
        .collect(),
    }
  }
}

fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

fn paths(artifacts: &[PathBuf]) -> Vec<String> {
  artifacts.iter().map(|a| a.display().to_string()).collect()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

/// Announce that an artifact is about to be built. Silent in JSON mode.
pub fn print_building(artifact: &str, format: OutputFormat) {
  if format.is_json() {
    return;
  }
  println!(
    "{} Building binary: {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    artifact
  );
}

/// `--list`: one artifact name per line, or a JSON array.
pub fn print_artifact_names(names: &[String], format: OutputFormat) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(&names);
  }
  for name in names {
    println!("{name}");
  }
  Ok(())
}

pub fn print_build_summary(
  version: &str,
  platform: Platform,
  artifact: &Path,
  elapsed: Duration,
  format: OutputFormat,
) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(&BuildSummary {
      version,
      platform: platform.to_string(),
      artifact: artifact.display().to_string(),
    });
  }
  print_success(&format!("Built {} in {}", artifact.display(), format_duration(elapsed)));
  Ok(())
}

pub fn print_release_summary(
  version: &str,
  artifacts: &[PathBuf],
  elapsed: Duration,
  format: OutputFormat,
) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(&ReleaseSummary {
      version,
      artifacts: paths(artifacts),
    });
  }
  println!();
  print_success("Release build complete!");
  print_stat("Version", version);
  print_stat("Binaries", &artifacts.len().to_string());
  print_stat("Duration", &format_duration(elapsed));
  Ok(())
}

/// `--clean`: a warning per failed removal on stderr, then the counts.
pub fn print_clean_report(report: &CleanReport, format: OutputFormat) -> anyhow::Result<()> {
  for (_, err) in &report.failed {
    print_warning(&format!("Error removing binary: {err}"));
  }

  if format.is_json() {
    return print_json(&CleanSummary::from(report));
  }
  print_success("Clean complete!");
  print_stat("Targets", &report.total().to_string());
  print_stat("Removed", &report.removed.len().to_string());
  print_stat("Not present", &report.absent.len().to_string());
  if !report.is_success() {
    print_stat("Failed", &report.failed.len().to_string());
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use xbuild_lib::execute::ExecuteError;

  #[test]
  fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
    assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
  }

  #[test]
  fn text_is_default_format() {
    assert!(!OutputFormat::default().is_json());
    assert!(OutputFormat::Json.is_json());
  }

  #[test]
  fn clean_summary_lists_failures_with_their_error() {
    let report = CleanReport {
      removed: vec!["app_1.2.3_linux-x86_64".to_string()],
      absent: vec![],
      failed: vec![(
        "app_1.2.3_windows-x86.exe".to_string(),
        ExecuteError::Remove {
          artifact: "app_1.2.3_windows-x86.exe".to_string(),
          source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        },
      )],
    };

    let json = serde_json::to_value(CleanSummary::from(&report)).unwrap();

    assert_eq!(json["removed"], serde_json::json!(["app_1.2.3_linux-x86_64"]));
    assert_eq!(json["absent"], serde_json::json!([]));
    assert_eq!(json["failed"][0]["artifact"], "app_1.2.3_windows-x86.exe");
    assert!(
      json["failed"][0]["error"]
        .as_str()
        .unwrap()
        .contains("app_1.2.3_windows-x86.exe")
    );
  }

  #[test]
  fn release_summary_renders_artifact_paths() {
    let artifacts = vec![PathBuf::from("/work/app_1.2.3_linux-x86_64")];
    let summary = ReleaseSummary {
      version: "1.2.3",
      artifacts: paths(&artifacts),
    };

    assert_eq!(
      serde_json::to_value(&summary).unwrap(),
      serde_json::json!({
        "version": "1.2.3",
        "artifacts": ["/work/app_1.2.3_linux-x86_64"],
      })
    );
  }
}
