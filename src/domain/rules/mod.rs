// Domain rules - Filter-graph materialization and fade planning

use crate::domain::model::AudioOptions;
use crate::domain::scene::DURATION_PLACEHOLDER;
use crate::error::{AmbimuxError, AmbimuxResult};

/// Format seconds as a plain decimal number (`10`, `2.5`, `0.125`)
pub fn format_seconds(seconds: f64) -> String {
    format!("{}", seconds)
}

/// Substitute `duration` for every placeholder occurrence in `template`
///
/// The result is not syntax-checked; templates are authored in the scene
/// registry and are expected to be valid filter graphs.
pub fn materialize(template: &str, duration: f64) -> String {
    template.replace(DURATION_PLACEHOLDER, &format_seconds(duration))
}

/// Fallbacks applied when a request leaves fade or volume unset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioDefaults {
    pub fade_duration: f64,
    pub volume: f64,
}

impl Default for AudioDefaults {
    fn default() -> Self {
        Self {
            fade_duration: 2.0,
            volume: 0.3,
        }
    }
}

/// Validated trim/fade/volume parameters for the mux stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePlan {
    pub duration: f64,
    pub fade_duration: f64,
    pub fade_out_start: f64,
    pub volume: f64,
}

/// Reject a duration that cannot drive a generator
pub fn validate_duration(duration: f64) -> AmbimuxResult<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(AmbimuxError::InvalidOptions {
            message: format!("duration must be a positive number of seconds, got {}", duration),
        });
    }
    Ok(())
}

impl FadePlan {
    /// Resolve options against defaults and validate the caller constraints
    ///
    /// An explicit fade longer than the duration is rejected rather than
    /// clamped. The default fade is capped at half the duration so short
    /// clips still get a symmetric fade.
    pub fn resolve(options: &AudioOptions, defaults: &AudioDefaults) -> AmbimuxResult<Self> {
        validate_duration(options.duration)?;
        let duration = options.duration;

        let fade_duration = match options.fade_duration {
            Some(fade) => {
                if !fade.is_finite() || fade < 0.0 {
                    return Err(AmbimuxError::InvalidOptions {
                        message: format!("fade duration must be non-negative, got {}", fade),
                    });
                }
                if fade > duration {
                    return Err(AmbimuxError::InvalidOptions {
                        message: format!(
                            "fade duration {}s exceeds audio duration {}s",
                            format_seconds(fade),
                            format_seconds(duration)
                        ),
                    });
                }
                fade
            }
            None => defaults.fade_duration.min(duration / 2.0),
        };

        let volume = options.volume.unwrap_or(defaults.volume);
        if !volume.is_finite() || volume < 0.0 {
            return Err(AmbimuxError::InvalidOptions {
                message: format!("volume must be a non-negative multiplier, got {}", volume),
            });
        }

        Ok(Self {
            duration,
            fade_duration,
            fade_out_start: duration - fade_duration,
            volume,
        })
    }

    /// Audio filter chain: trim, fade in, fade out, then scale amplitude
    ///
    /// Fades are omitted entirely for a zero fade duration.
    pub fn audio_filter(&self) -> String {
        let mut chain = vec![format!("atrim=0:{}", format_seconds(self.duration))];
        if self.fade_duration > 0.0 {
            let fade = format_seconds(self.fade_duration);
            chain.push(format!("afade=t=in:st=0:d={}", fade));
            chain.push(format!(
                "afade=t=out:st={}:d={}",
                format_seconds(self.fade_out_start),
                fade
            ));
        }
        chain.push(format!("volume={}", format_seconds(self.volume)));
        chain.join(",")
    }
}

#[cfg(test)]
mod tests;
