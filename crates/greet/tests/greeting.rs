//! Runs the built greeting binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn example_cmd() -> Command {
  cargo_bin_cmd!("example-command")
}

#[test]
fn prints_greeting_and_exits_zero() {
  let expected = format!(
    " {} (runtime: {})\n",
    example_command::VERSION,
    example_command::RUNTIME
  );

  example_cmd()
    .assert()
    .success()
    .stdout(predicate::str::ends_with(expected))
    .stdout(predicate::str::contains("example-command"));
}

#[test]
fn ignores_arguments() {
  example_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("(runtime: rustc"));
}

#[test]
fn prints_a_single_line() {
  let output = example_cmd().output().unwrap();
  let stdout = String::from_utf8(output.stdout).unwrap();
  assert_eq!(stdout.lines().count(), 1);
  assert!(output.stderr.is_empty());
}

#[test]
fn reports_the_name_it_was_invoked_as() {
  let dir = tempfile::TempDir::new().unwrap();
  let app = dir.path().join(format!("app{}", std::env::consts::EXE_SUFFIX));
  std::fs::copy(env!("CARGO_BIN_EXE_example-command"), &app).unwrap();

  Command::new("app")
    .env("PATH", dir.path())
    .assert()
    .success()
    .stdout(format!(
      "app {} (runtime: {})\n",
      example_command::VERSION,
      example_command::RUNTIME
    ));
}
