// Mux interactor - Lays a looped ambient track under an existing video

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::model::*;
use crate::domain::rules::{AudioDefaults, FadePlan};
use crate::error::{AmbimuxError, AmbimuxResult};
use crate::ports::ProcessPort;

/// Interactor for audio/video muxing
pub struct MuxInteractor {
    process_port: Arc<dyn ProcessPort>,
    ffmpeg_path: String,
    encoding: AudioEncoding,
    defaults: AudioDefaults,
}

impl MuxInteractor {
    /// Create new mux interactor with injected process port
    pub fn new(
        process_port: Arc<dyn ProcessPort>,
        ffmpeg_path: impl Into<String>,
        encoding: AudioEncoding,
        defaults: AudioDefaults,
    ) -> Self {
        Self {
            process_port,
            ffmpeg_path: ffmpeg_path.into(),
            encoding,
            defaults,
        }
    }

    /// Resolve and validate the fade plan for `options`
    pub fn plan(&self, options: &AudioOptions) -> AmbimuxResult<FadePlan> {
        FadePlan::resolve(options, &self.defaults)
    }

    /// Mix `audio_path` under the video stream of `video_path` into `output_path`
    ///
    /// The video stream is copied; the audio is looped, trimmed, faded and
    /// re-encoded, and the output ends with the shorter of the two streams.
    pub async fn mix(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
        options: &AudioOptions,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<()> {
        let plan = self.plan(options)?;
        info!(
            video = %video_path.display(),
            output = %output_path.display(),
            duration = plan.duration,
            fade = plan.fade_duration,
            volume = plan.volume,
            "Mixing ambient audio into video"
        );

        let invocation = self.build_invocation(video_path, audio_path, output_path, &plan);
        let result = self.process_port.run(&invocation, cancel).await?;
        if !result.success() {
            warn!(output = %output_path.display(), exit_code = ?result.exit_code, "Mux failed");
            return Err(AmbimuxError::Mux {
                exit_code: result.exit_code,
                diagnostics: result.stderr,
            });
        }
        Ok(())
    }

    /// Build the ffmpeg invocation for a validated plan
    pub fn build_invocation(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
        plan: &FadePlan,
    ) -> ProcessInvocation {
        ProcessInvocation::new(self.ffmpeg_path.as_str())
            .args(["-hide_banner", "-nostdin", "-loglevel", "error"])
            .arg("-i")
            .path_arg(video_path)
            .args(["-stream_loop", "-1", "-i"])
            .path_arg(audio_path)
            .arg("-filter_complex")
            .arg(format!("[1:a]{}[aout]", plan.audio_filter()))
            .args(["-map", "0:v", "-map", "[aout]"])
            .args(["-c:v", "copy"])
            .arg("-c:a")
            .arg(self.encoding.codec.as_str())
            .arg("-b:a")
            .arg(self.encoding.bitrate.as_str())
            .arg("-shortest")
            .arg("-y")
            .path_arg(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted_process::{ScriptedProcessAdapter, ScriptedStep};

    fn interactor(steps: Vec<ScriptedStep>) -> (MuxInteractor, Arc<ScriptedProcessAdapter>) {
        let process = Arc::new(ScriptedProcessAdapter::new(steps));
        let interactor = MuxInteractor::new(
            process.clone(),
            "ffmpeg",
            AudioEncoding::mix_default(),
            AudioDefaults::default(),
        );
        (interactor, process)
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> &'a str {
        let index = args.iter().position(|a| a == flag).unwrap();
        &args[index + 1]
    }

    #[test]
    fn test_invocation_shape() {
        let (interactor, _) = interactor(vec![]);
        let plan = interactor
            .plan(&AudioOptions::new(10.0).with_fade(2.0).with_volume(0.3))
            .unwrap();
        let invocation = interactor.build_invocation(
            Path::new("clip.mp4"),
            Path::new("/tmp/ambient.mp3"),
            Path::new("out.mp4"),
            &plan,
        );
        let args = &invocation.args;

        // Video is input 0, looped audio is input 1.
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
        assert_eq!(value_after(args, "-i"), "clip.mp4");
        assert_eq!(value_after(args, "-stream_loop"), "-1");
        let loop_at = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_at + 3], "/tmp/ambient.mp3");

        assert_eq!(
            value_after(args, "-filter_complex"),
            "[1:a]atrim=0:10,afade=t=in:st=0:d=2,afade=t=out:st=8:d=2,volume=0.3[aout]"
        );
        assert_eq!(value_after(args, "-c:v"), "copy");
        assert_eq!(value_after(args, "-c:a"), "aac");
        assert_eq!(value_after(args, "-b:a"), "192k");
        assert!(args.contains(&"-shortest".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_dash_leading_paths_stay_positional() {
        let (interactor, _) = interactor(vec![]);
        let plan = interactor.plan(&AudioOptions::new(4.0)).unwrap();
        let invocation = interactor.build_invocation(
            Path::new("-clip.mp4"),
            Path::new("-ambient.mp3"),
            Path::new("-out.mp4"),
            &plan,
        );
        let args = &invocation.args;
        assert_eq!(value_after(args, "-i"), "./-clip.mp4");
        let loop_at = args.iter().position(|a| a == "-stream_loop").unwrap();
        assert_eq!(args[loop_at + 3], "./-ambient.mp3");
        assert_eq!(args[args.len() - 2..], ["-y", "./-out.mp4"]);
    }

    #[tokio::test]
    async fn test_invalid_fade_runs_nothing() {
        let (interactor, process) = interactor(vec![ScriptedStep::writes_output()]);
        let err = interactor
            .mix(
                Path::new("clip.mp4"),
                Path::new("ambient.mp3"),
                Path::new("out.mp4"),
                &AudioOptions::new(2.0).with_fade(3.0),
                &CancelSignal::never(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AmbimuxError::InvalidOptions { .. }));
        assert!(process.calls().is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_mux_error() {
        let (interactor, _) = interactor(vec![ScriptedStep::fails(
            234,
            "Output file #0 does not contain any stream",
        )]);
        let err = interactor
            .mix(
                Path::new("clip.mp4"),
                Path::new("ambient.mp3"),
                Path::new("out.mp4"),
                &AudioOptions::new(5.0),
                &CancelSignal::never(),
            )
            .await
            .unwrap_err();
        match err {
            AmbimuxError::Mux {
                exit_code,
                diagnostics,
            } => {
                assert_eq!(exit_code, Some(234));
                assert!(diagnostics.contains("does not contain any stream"));
            }
            other => panic!("expected Mux, got {:?}", other),
        }
    }
}
