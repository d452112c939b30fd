use std::sync::Arc;

use crate::adapters::{AmbimuxConfig, TokioProcessAdapter};
use crate::app::{AmbientInteractor, GenerateInteractor, MuxInteractor, ProbeInteractor};
use crate::domain::model::AudioEncoding;
use crate::error::AmbimuxResult;
use crate::ports::ProcessPort;

pub trait AppContainer: Send + Sync {
    fn ambient_interactor(&self) -> Arc<AmbientInteractor>;
    fn generate_interactor(&self) -> Arc<GenerateInteractor>;
    fn probe_interactor(&self) -> Arc<ProbeInteractor>;
}

pub struct DefaultAppContainer {
    ambient_interactor: Arc<AmbientInteractor>,
    generate_interactor: Arc<GenerateInteractor>,
    probe_interactor: Arc<ProbeInteractor>,
}

impl DefaultAppContainer {
    /// Wire interactors to the tokio process adapter
    pub fn new(config: &AmbimuxConfig) -> AmbimuxResult<Self> {
        config.validate()?;
        let process_port = Arc::new(
            TokioProcessAdapter::new()
                .with_timeout(config.timeout())
                .with_diagnostics_limit(config.diagnostics_limit_bytes),
        );
        Ok(Self::with_process_port(config, process_port))
    }

    /// Wire interactors to an arbitrary process port
    pub fn with_process_port(config: &AmbimuxConfig, process_port: Arc<dyn ProcessPort>) -> Self {
        let generation = AudioEncoding::new(
            config.generation_codec.as_str(),
            config.generation_bitrate.as_str(),
        );
        let mix = AudioEncoding::new(config.mix_codec.as_str(), config.mix_bitrate.as_str());

        let probe = || ProbeInteractor::new(Arc::clone(&process_port), config.ffprobe_path.as_str());
        let generator = || {
            GenerateInteractor::new(
                Arc::clone(&process_port),
                config.ffmpeg_path.as_str(),
                generation.clone(),
            )
        };
        let muxer = MuxInteractor::new(
            Arc::clone(&process_port),
            config.ffmpeg_path.as_str(),
            mix,
            config.audio_defaults(),
        );

        let ambient_interactor = Arc::new(AmbientInteractor::new(
            probe(),
            generator(),
            muxer,
            config.scratch_dir(),
        ));

        Self {
            ambient_interactor,
            generate_interactor: Arc::new(generator()),
            probe_interactor: Arc::new(probe()),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn ambient_interactor(&self) -> Arc<AmbientInteractor> {
        Arc::clone(&self.ambient_interactor)
    }

    fn generate_interactor(&self) -> Arc<GenerateInteractor> {
        Arc::clone(&self.generate_interactor)
    }

    fn probe_interactor(&self) -> Arc<ProbeInteractor> {
        Arc::clone(&self.probe_interactor)
    }
}
