// Generate interactor - Synthesizes a standalone ambient audio track

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::model::*;
use crate::domain::rules::{format_seconds, materialize, validate_duration};
use crate::domain::scene::{SceneId, SceneProfile};
use crate::error::{AmbimuxError, AmbimuxResult};
use crate::ports::ProcessPort;

/// Interactor for ambient audio generation
pub struct GenerateInteractor {
    process_port: Arc<dyn ProcessPort>,
    ffmpeg_path: String,
    encoding: AudioEncoding,
}

impl GenerateInteractor {
    /// Create new generate interactor with injected process port
    pub fn new(
        process_port: Arc<dyn ProcessPort>,
        ffmpeg_path: impl Into<String>,
        encoding: AudioEncoding,
    ) -> Self {
        Self {
            process_port,
            ffmpeg_path: ffmpeg_path.into(),
            encoding,
        }
    }

    /// Generate `options.duration` seconds of the scene's ambience into `output_path`
    ///
    /// Overwrites any existing file. A partially written file is left in
    /// place on failure.
    pub async fn generate(
        &self,
        scene: &str,
        output_path: &Path,
        options: &AudioOptions,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<()> {
        let scene: SceneId = scene.parse()?;
        self.generate_scene(scene, output_path, options, cancel).await
    }

    /// Same as [`generate`](Self::generate) for an already parsed scene
    pub async fn generate_scene(
        &self,
        scene: SceneId,
        output_path: &Path,
        options: &AudioOptions,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<()> {
        validate_duration(options.duration)?;
        info!(
            %scene,
            duration = options.duration,
            output = %output_path.display(),
            "Generating ambient audio"
        );

        let invocation = self.build_invocation(scene.profile(), output_path, options.duration);
        let result = self.process_port.run(&invocation, cancel).await?;
        if !result.success() {
            warn!(%scene, exit_code = ?result.exit_code, "Ambient audio generation failed");
            return Err(AmbimuxError::AudioGeneration {
                exit_code: result.exit_code,
                diagnostics: result.stderr,
            });
        }
        Ok(())
    }

    /// Build the ffmpeg invocation rendering a lavfi graph to an encoded file
    pub fn build_invocation(
        &self,
        profile: &SceneProfile,
        output_path: &Path,
        duration: f64,
    ) -> ProcessInvocation {
        let graph = materialize(profile.filter_template, duration);
        ProcessInvocation::new(self.ffmpeg_path.as_str())
            .args(["-hide_banner", "-nostdin", "-loglevel", "error"])
            .args(["-f", "lavfi", "-i"])
            .arg(graph)
            .arg("-t")
            .arg(format_seconds(duration))
            .arg("-c:a")
            .arg(self.encoding.codec.as_str())
            .arg("-b:a")
            .arg(self.encoding.bitrate.as_str())
            .arg("-y")
            .path_arg(output_path)
    }
}
