//! Delete action: remove one target's artifact.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::execute::types::{ExecuteError, Removal};

/// Remove `artifact` from `dir`. A file that is already gone is not an error.
pub async fn remove(artifact: &str, dir: &Path) -> Result<Removal, ExecuteError> {
  let path = dir.join(artifact);

  match tokio::fs::remove_file(&path).await {
    Ok(()) => {
      info!(artifact = %artifact, "removed binary");
      Ok(Removal::Removed)
    }
    Err(e) if e.kind() == ErrorKind::NotFound => {
      debug!(artifact = %artifact, "binary already absent");
      Ok(Removal::Absent)
    }
    Err(source) => Err(ExecuteError::Remove {
      artifact: artifact.to_string(),
      source,
    }),
  }
}
