// Tracing log adapter - Subscriber installation for structured logging

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{AmbimuxError, AmbimuxResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line text output
    #[default]
    Compact,
    /// JSON lines for log collectors
    Json,
}

impl FromStr for LogFormat {
    type Err = AmbimuxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(AmbimuxError::Config {
                message: format!(
                    "Invalid log format: {}. Valid formats: pretty, compact, json",
                    s
                ),
            }),
        }
    }
}

/// Validate a log level name
pub fn parse_level(level: &str) -> AmbimuxResult<tracing::Level> {
    tracing::Level::from_str(level).map_err(|_| AmbimuxError::Config {
        message: format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
            level
        ),
    })
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. Installing twice is a no-op.
pub fn init_logging(level: &str, format: LogFormat) -> AmbimuxResult<()> {
    let level = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(())
}
