//! Ambimux Library
//!
//! Synthesizes ambient background audio for a fixed menu of scenes with
//! ffmpeg's lavfi sources, then mixes it under an existing video stream
//! (stream-copied, never re-encoded).
//!
//! ```no_run
//! use ambimux::{add_ambient_audio, AmbientOptions, AmbimuxConfig};
//!
//! # async fn run() -> ambimux::AmbimuxResult<()> {
//! let options = AmbientOptions { duration: Some(10.0), ..Default::default() };
//! add_ambient_audio(&AmbimuxConfig::default(), "clip.mp4", "forest", "out.mp4", options).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

use std::path::Path;

use crate::app::container::{AppContainer, DefaultAppContainer};

// Re-export commonly used types
pub use adapters::AmbimuxConfig;
pub use domain::model::{
    cancel_pair, AmbientOptions, AmbientReport, AmbientRequest, AudioOptions, CancelHandle,
    CancelSignal,
};
pub use domain::scene::{lookup, SceneId, SceneProfile};
pub use error::{AmbimuxError, AmbimuxResult};

/// Add ambient audio for `scene` to `video_path`, writing `output_path`
///
/// The duration is probed from the video when `options.duration` is unset.
pub async fn add_ambient_audio(
    config: &AmbimuxConfig,
    video_path: impl AsRef<Path>,
    scene: &str,
    output_path: impl AsRef<Path>,
    options: AmbientOptions,
) -> AmbimuxResult<AmbientReport> {
    let container = DefaultAppContainer::new(config)?;
    let request = AmbientRequest::new(video_path.as_ref(), scene, output_path.as_ref())
        .with_options(options);
    container.ambient_interactor().execute(&request).await
}
