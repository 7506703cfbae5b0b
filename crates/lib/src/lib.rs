//! xbuild-lib: cross-platform release builds for a single binary
//!
//! This crate provides the pieces the `xbuild` command is made of:
//! - `Platform`: an operating system / architecture pair
//! - `BinaryDescriptor`: a versioned binary and its artifact names
//! - `version`: version resolution from `git describe`
//! - `Toolchain`: the compiler command, expanded per target
//! - `Orchestrator`: concurrent build and clean passes over all targets

pub mod binary;
pub mod config;
pub mod env;
pub mod execute;
pub mod placeholder;
pub mod platform;
pub mod toolchain;
pub mod version;

pub use binary::BinaryDescriptor;
pub use config::Config;
pub use execute::Orchestrator;
pub use platform::Platform;
pub use toolchain::Toolchain;
