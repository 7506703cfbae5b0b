//! Environment snapshots for child processes.
//!
//! Each compile unit gets a private copy of the inherited environment and
//! overrides its target keys on that copy. The parent's environment is never
//! mutated, so concurrent units cannot observe each other's overrides.

use std::ffi::{OsStr, OsString};

/// An ordered list of `KEY=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
  vars: Vec<(OsString, OsString)>,
}

impl EnvSnapshot {
  /// Capture the current process environment.
  pub fn capture() -> Self {
    Self {
      vars: std::env::vars_os().collect(),
    }
  }

  pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<OsString>,
    V: Into<OsString>,
  {
    Self {
      vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }

  /// Set `key` to `value`.
  ///
  /// An existing entry is replaced at its original position; otherwise the
  /// pair is appended. Either way exactly one entry for `key` remains.
  pub fn set(&mut self, key: impl AsRef<OsStr>, value: impl Into<OsString>) {
    let key = key.as_ref();
    let value = value.into();

    match self.vars.iter().position(|(k, _)| k == key) {
      Some(index) => {
        self.vars[index].1 = value;
        // Keep a single entry even if the inherited list carried duplicates.
        let mut seen = false;
        self.vars.retain(|(k, _)| {
          if k != key {
            return true;
          }
          let keep = !seen;
          seen = true;
          keep
        });
      }
      None => self.vars.push((key.to_os_string(), value)),
    }
  }

  pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
    let key = key.as_ref();
    self.vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_os_str())
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
    self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
  }
}
