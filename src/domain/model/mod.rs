// Domain models - Core types and data structures

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::scene::SceneId;

/// Options for a single ambient audio track
///
/// `duration` is in seconds. `fade_duration` and `volume` fall back to the
/// configured defaults when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioOptions {
    pub duration: f64,
    pub fade_duration: Option<f64>,
    pub volume: Option<f64>,
}

impl AudioOptions {
    /// Create options for the given duration with default fade and volume
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            fade_duration: None,
            volume: None,
        }
    }

    pub fn with_fade(mut self, fade_duration: f64) -> Self {
        self.fade_duration = Some(fade_duration);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Codec and bitrate for an encoded audio track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioEncoding {
    pub codec: String,
    pub bitrate: String,
}

impl AudioEncoding {
    pub fn new(codec: impl Into<String>, bitrate: impl Into<String>) -> Self {
        Self {
            codec: codec.into(),
            bitrate: bitrate.into(),
        }
    }

    /// Intermediate ambient track: MP3 at 192 kbit/s
    pub fn generation_default() -> Self {
        Self::new("libmp3lame", "192k")
    }

    /// Muxed audio track: AAC at 192 kbit/s
    pub fn mix_default() -> Self {
        Self::new("aac", "192k")
    }
}

/// Caller options for the full pipeline; `duration` is probed when unset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientOptions {
    pub duration: Option<f64>,
    pub fade_duration: Option<f64>,
    pub volume: Option<f64>,
}

impl AmbientOptions {
    /// Resolve into per-track options once the duration is known
    pub fn with_duration(&self, duration: f64) -> AudioOptions {
        AudioOptions {
            duration,
            fade_duration: self.fade_duration,
            volume: self.volume,
        }
    }
}

/// Request to add ambient audio to a video
#[derive(Debug, Clone)]
pub struct AmbientRequest {
    pub video_path: PathBuf,
    pub scene: String,
    pub output_path: PathBuf,
    pub options: AmbientOptions,
}

impl AmbientRequest {
    pub fn new(
        video_path: impl Into<PathBuf>,
        scene: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            scene: scene.into(),
            output_path: output_path.into(),
            options: AmbientOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AmbientOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a successful pipeline run
#[derive(Debug, Clone)]
pub struct AmbientReport {
    pub scene: SceneId,
    pub output_path: PathBuf,
    /// Seconds of ambient audio generated
    pub duration: f64,
    /// Whether the duration came from probing the video
    pub duration_probed: bool,
    pub processing_time: Duration,
}

/// One external tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInvocation {
    pub executable: String,
    pub args: Vec<String>,
    pub capture_stdout: bool,
}

impl ProcessInvocation {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a file path that the tool must never read as an option
    ///
    /// Relative paths starting with `-` are prefixed with `./`.
    pub fn path_arg(self, path: &Path) -> Self {
        let text = path.to_string_lossy();
        if path.is_relative() && text.starts_with('-') {
            self.arg(format!("./{}", text))
        } else {
            self.arg(text)
        }
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// Command line for logging; not suitable for shell execution
    pub fn display_command(&self) -> String {
        let mut line = self.executable.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') || arg.contains(';') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Result of a finished tool invocation
///
/// A non-zero exit is not an error at this layer; callers translate it into
/// their stage error with `stderr` attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Receiving side of a cancellation request
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

/// Sending side of a cancellation request
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Create a connected cancellation handle and signal
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    /// Request cancellation of every operation observing the paired signal
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested; pends forever otherwise
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Handle dropped without cancelling.
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}

#[cfg(test)]
mod tests;
