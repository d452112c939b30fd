// TOML config adapter - Configuration loading from TOML files and environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::adapters::exec_process::{DEFAULT_DIAGNOSTICS_LIMIT, DEFAULT_TIMEOUT};
use crate::domain::rules::AudioDefaults;
use crate::error::{AmbimuxError, AmbimuxResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "ambimux.toml";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbimuxConfig {
    /// Decode/filter/encode tool
    pub ffmpeg_path: String,
    /// Format-inspection tool
    pub ffprobe_path: String,
    /// Directory for temporary audio; the OS temp directory when unset
    pub scratch_dir: Option<PathBuf>,
    /// Per-invocation timeout in seconds, 0 disables it
    pub timeout_secs: u64,
    pub diagnostics_limit_bytes: usize,
    pub generation_codec: String,
    pub generation_bitrate: String,
    pub mix_codec: String,
    pub mix_bitrate: String,
    pub default_fade_secs: f64,
    pub default_volume: f64,
    pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ambimux: AmbimuxConfig,
}

impl Default for AmbimuxConfig {
    fn default() -> Self {
        let audio = AudioDefaults::default();
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            scratch_dir: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            diagnostics_limit_bytes: DEFAULT_DIAGNOSTICS_LIMIT,
            generation_codec: "libmp3lame".to_string(),
            generation_bitrate: "192k".to_string(),
            mix_codec: "aac".to_string(),
            mix_bitrate: "192k".to_string(),
            default_fade_secs: audio.fade_duration,
            default_volume: audio.volume,
            log_level: "info".to_string(),
        }
    }
}

impl AmbimuxConfig {
    /// Parse the `[ambimux]` table of a TOML document
    pub fn from_toml_str(content: &str) -> AmbimuxResult<Self> {
        let parsed: ConfigFile = toml::from_str(content).map_err(|e| AmbimuxError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(parsed.ambimux)
    }

    /// Load from an explicit path, or from `ambimux.toml` if present
    ///
    /// A missing explicit file is an error; a missing default file yields
    /// the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> AmbimuxResult<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AmbimuxError::Config {
                        message: format!("Config file does not exist: {}", path.display()),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        info!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(&path).map_err(|e| AmbimuxError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `AMBIMUX_*` environment overrides
    pub fn apply_env(&mut self) -> AmbimuxResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> AmbimuxResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("AMBIMUX_FFMPEG") {
            self.ffmpeg_path = value;
        }
        if let Some(value) = lookup("AMBIMUX_FFPROBE") {
            self.ffprobe_path = value;
        }
        if let Some(value) = lookup("AMBIMUX_SCRATCH_DIR") {
            self.scratch_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("AMBIMUX_TIMEOUT_SECS") {
            self.timeout_secs = parse_env("AMBIMUX_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("AMBIMUX_DEFAULT_FADE") {
            self.default_fade_secs = parse_env("AMBIMUX_DEFAULT_FADE", &value)?;
        }
        if let Some(value) = lookup("AMBIMUX_DEFAULT_VOLUME") {
            self.default_volume = parse_env("AMBIMUX_DEFAULT_VOLUME", &value)?;
        }
        if let Some(value) = lookup("AMBIMUX_LOG_LEVEL") {
            self.log_level = value;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> AmbimuxResult<()> {
        if self.ffmpeg_path.trim().is_empty() || self.ffprobe_path.trim().is_empty() {
            return Err(config_error("tool paths cannot be empty"));
        }
        for bitrate in [&self.generation_bitrate, &self.mix_bitrate] {
            if !is_valid_bitrate(bitrate) {
                return Err(config_error(format!("invalid bitrate: {}", bitrate)));
            }
        }
        if self.generation_codec.trim().is_empty() || self.mix_codec.trim().is_empty() {
            return Err(config_error("codecs cannot be empty"));
        }
        if self.diagnostics_limit_bytes == 0 {
            return Err(config_error("diagnostics_limit_bytes must be positive"));
        }
        if !self.default_fade_secs.is_finite() || self.default_fade_secs < 0.0 {
            return Err(config_error("default_fade_secs must be non-negative"));
        }
        if !self.default_volume.is_finite() || self.default_volume < 0.0 {
            return Err(config_error("default_volume must be non-negative"));
        }
        Ok(())
    }

    /// Scratch directory for temporary artifacts
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn audio_defaults(&self) -> AudioDefaults {
        AudioDefaults {
            fade_duration: self.default_fade_secs,
            volume: self.default_volume,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> AmbimuxResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| config_error(format!("invalid value for {}: {}", key, value)))
}

fn config_error(message: impl Into<String>) -> AmbimuxError {
    AmbimuxError::Config {
        message: message.into(),
    }
}

/// Bitrates are digits with an optional `k`, `K` or `M` suffix
fn is_valid_bitrate(bitrate: &str) -> bool {
    let digits = bitrate.trim_end_matches(['k', 'K', 'M']);
    !digits.is_empty()
        && digits.len() + 1 >= bitrate.len()
        && digits.chars().all(|c| c.is_ascii_digit())
}
