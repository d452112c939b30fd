// Probe interactor - Reads a video's container duration

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::model::*;
use crate::error::{AmbimuxError, AmbimuxResult};
use crate::ports::ProcessPort;

/// Interactor for duration probing
pub struct ProbeInteractor {
    process_port: Arc<dyn ProcessPort>,
    ffprobe_path: String,
}

impl ProbeInteractor {
    /// Create new probe interactor with injected process port
    pub fn new(process_port: Arc<dyn ProcessPort>, ffprobe_path: impl Into<String>) -> Self {
        Self {
            process_port,
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Probe the container duration of `video_path` in seconds
    pub async fn probe(&self, video_path: &Path, cancel: &CancelSignal) -> AmbimuxResult<f64> {
        let invocation = self.build_invocation(video_path);
        let result = self.process_port.run(&invocation, cancel).await?;

        if !result.success() {
            warn!(video = %video_path.display(), exit_code = ?result.exit_code, "Duration probe failed");
            return Err(AmbimuxError::Probe {
                message: format!("ffprobe could not read {}", video_path.display()),
                exit_code: result.exit_code,
                diagnostics: result.stderr,
            });
        }

        let duration = parse_duration(&result.stdout).ok_or_else(|| AmbimuxError::Probe {
            message: format!(
                "no usable duration for {} (got {:?})",
                video_path.display(),
                result.stdout.trim()
            ),
            exit_code: result.exit_code,
            diagnostics: result.stderr.clone(),
        })?;
        debug!(video = %video_path.display(), duration, "Probed duration");
        Ok(duration)
    }

    /// Build the ffprobe invocation printing only the bare duration value
    pub fn build_invocation(&self, video_path: &Path) -> ProcessInvocation {
        ProcessInvocation::new(self.ffprobe_path.as_str())
            .args(["-v", "error"])
            .args(["-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .path_arg(video_path)
            .capture_stdout()
    }
}

/// Parse the first line of probe output as positive, finite seconds
fn parse_duration(stdout: &str) -> Option<f64> {
    let value: f64 = stdout.lines().next()?.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted_process::{ScriptedProcessAdapter, ScriptedStep};

    fn interactor(step: ScriptedStep) -> ProbeInteractor {
        ProbeInteractor::new(Arc::new(ScriptedProcessAdapter::new([step])), "ffprobe")
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12.345000\n"), Some(12.345));
        assert_eq!(parse_duration("  7\n"), Some(7.0));
        assert_eq!(parse_duration("N/A\n"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("0.000000"), None);
        assert_eq!(parse_duration("-3"), None);
    }

    #[test]
    fn test_invocation_shape() {
        let probe = interactor(ScriptedStep::prints("1"));
        let invocation = probe.build_invocation(Path::new("clip.mp4"));
        assert_eq!(invocation.executable, "ffprobe");
        assert!(invocation.capture_stdout);
        assert_eq!(invocation.args.last().unwrap(), "clip.mp4");
        assert!(invocation
            .args
            .windows(2)
            .any(|w| w == ["-show_entries", "format=duration"]));
    }

    #[test]
    fn test_dash_leading_input_stays_positional() {
        let probe = interactor(ScriptedStep::prints("1"));
        let invocation = probe.build_invocation(Path::new("-clip.mp4"));
        assert_eq!(invocation.args.last().unwrap(), "./-clip.mp4");
    }

    #[tokio::test]
    async fn test_probe_success() {
        let probe = interactor(ScriptedStep::prints("31.250000\n"));
        let duration = probe
            .probe(Path::new("clip.mp4"), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(duration, 31.25);
    }

    #[tokio::test]
    async fn test_missing_duration_is_probe_error() {
        let probe = interactor(ScriptedStep::prints("N/A\n"));
        let err = probe
            .probe(Path::new("clip.mp4"), &CancelSignal::never())
            .await
            .unwrap_err();
        assert!(matches!(err, AmbimuxError::Probe { exit_code: Some(0), .. }));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_probe_error() {
        let probe = interactor(ScriptedStep::fails(1, "clip.mp4: No such file or directory"));
        let err = probe
            .probe(Path::new("clip.mp4"), &CancelSignal::never())
            .await
            .unwrap_err();
        assert_eq!(err.stage(), "probe");
        assert!(err.diagnostics().unwrap().contains("No such file"));
    }
}
