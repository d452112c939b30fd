// Ambient interactor - Orchestrates probe, generation and mux for one video

mod artifact;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::app::generate_interactor::GenerateInteractor;
use crate::app::mux_interactor::MuxInteractor;
use crate::app::probe_interactor::ProbeInteractor;
use crate::domain::model::*;
use crate::domain::rules::validate_duration;
use crate::domain::scene::SceneId;
use crate::error::AmbimuxResult;

pub use artifact::{PartialOutput, TemporaryAudio, ARTIFACT_PREFIX, ARTIFACT_SUFFIX};

/// Interactor for the add-ambient-audio use case
pub struct AmbientInteractor {
    probe: ProbeInteractor,
    generator: GenerateInteractor,
    muxer: MuxInteractor,
    scratch_dir: PathBuf,
}

impl AmbientInteractor {
    /// Create new ambient interactor from its stage interactors
    pub fn new(
        probe: ProbeInteractor,
        generator: GenerateInteractor,
        muxer: MuxInteractor,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            probe,
            generator,
            muxer,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Add ambient audio to a video
    pub async fn execute(&self, request: &AmbientRequest) -> AmbimuxResult<AmbientReport> {
        self.execute_with_cancel(request, &CancelSignal::never()).await
    }

    /// Add ambient audio to a video, stopping early if `cancel` fires
    ///
    /// Exactly one temporary audio file is created per call and it is
    /// removed on every exit path, including cancellation and drop of the
    /// returned future. An output file this call created is removed on the
    /// same paths unless the run succeeds.
    pub async fn execute_with_cancel(
        &self,
        request: &AmbientRequest,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<AmbientReport> {
        let started = Instant::now();
        let scene: SceneId = request.scene.parse()?;

        let (duration, duration_probed) = match request.options.duration {
            Some(duration) => {
                validate_duration(duration)?;
                (duration, false)
            }
            None => (self.probe.probe(&request.video_path, cancel).await?, true),
        };
        let options = request.options.with_duration(duration);
        // Reject bad fade/volume before anything touches the filesystem.
        self.muxer.plan(&options)?;

        info!(
            %scene,
            video = %request.video_path.display(),
            output = %request.output_path.display(),
            duration,
            duration_probed,
            "Adding ambient audio"
        );

        let output = PartialOutput::guard(&request.output_path);
        let artifact = TemporaryAudio::create(&self.scratch_dir)?;
        let outcome = self.generate_and_mix(scene, &artifact, request, &options, cancel).await;
        artifact.release();
        outcome?;
        output.commit();

        let processing_time = started.elapsed();
        info!(
            output = %request.output_path.display(),
            elapsed_ms = processing_time.as_millis() as u64,
            "Ambient audio added"
        );
        Ok(AmbientReport {
            scene,
            output_path: request.output_path.clone(),
            duration,
            duration_probed,
            processing_time,
        })
    }

    async fn generate_and_mix(
        &self,
        scene: SceneId,
        artifact: &TemporaryAudio,
        request: &AmbientRequest,
        options: &AudioOptions,
        cancel: &CancelSignal,
    ) -> AmbimuxResult<()> {
        self.generator
            .generate_scene(scene, artifact.path(), options, cancel)
            .await?;
        self.muxer
            .mix(
                &request.video_path,
                artifact.path(),
                &request.output_path,
                options,
                cancel,
            )
            .await
    }
}
