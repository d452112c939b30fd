//! Files owned by one pipeline run: the temporary ambient track and the
//! output it may leave half-written

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::{Builder, TempPath};
use tracing::debug;

/// Prefix shared by every temporary ambient artifact
pub const ARTIFACT_PREFIX: &str = "ambient-";

/// Extension of the intermediate ambient track
pub const ARTIFACT_SUFFIX: &str = ".mp3";

/// Scratch file deleted on release or drop, whichever comes first
///
/// The name combines a UTC timestamp with a random component and is created
/// exclusively, so concurrent runs sharing a scratch directory never collide.
#[derive(Debug)]
pub struct TemporaryAudio {
    path: TempPath,
}

impl TemporaryAudio {
    /// Reserve a fresh artifact in `scratch_dir`
    pub fn create(scratch_dir: &Path) -> std::io::Result<Self> {
        let prefix = format!(
            "{}{}-",
            ARTIFACT_PREFIX,
            Utc::now().format("%Y%m%dT%H%M%S%3f")
        );
        let file = Builder::new()
            .prefix(&prefix)
            .suffix(ARTIFACT_SUFFIX)
            .rand_bytes(8)
            .tempfile_in(scratch_dir)?;
        let path = file.into_temp_path();
        debug!(path = %path.display(), "Reserved temporary audio");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the artifact; failures are logged and never returned
    pub fn release(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => debug!(path = %shown, "Removed temporary audio"),
            Err(e) => debug!(path = %shown, error = %e, "Could not remove temporary audio"),
        }
    }
}

/// Output file removed on drop unless the run commits it
///
/// Inert when the file already existed before the run, so a previous
/// result is never deleted by a failed retry.
#[derive(Debug)]
pub struct PartialOutput {
    path: Option<PathBuf>,
}

impl PartialOutput {
    pub fn guard(path: &Path) -> Self {
        Self {
            path: (!path.exists()).then(|| path.to_path_buf()),
        }
    }

    /// Keep the output
    pub fn commit(mut self) {
        self.path = None;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed partial output"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => debug!(path = %path.display(), error = %e, "Could not remove partial output"),
        }
    }
}
