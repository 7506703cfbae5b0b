//! Records the compiler version so the binary can report its runtime.

use std::process::Command;

fn main() {
  println!("cargo:rerun-if-env-changed=EXAMPLE_COMMAND_VERSION");
  println!("cargo:rerun-if-env-changed=RUSTC");

  let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_owned());
  let runtime = Command::new(rustc)
    .arg("--version")
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|s| s.trim().to_owned())
    .unwrap_or_else(|| "rustc unknown".to_owned());

  println!("cargo:rustc-env=EXAMPLE_COMMAND_RUNTIME={runtime}");
}
