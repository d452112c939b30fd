//! Error handling module for Ambimux

use std::time::Duration;

use thiserror::Error;

/// Main error type for Ambimux operations
#[derive(Error, Debug)]
pub enum AmbimuxError {
    /// Scene identifier outside the fixed scene set
    #[error("Unknown scene: {scene}. Valid scenes: {valid}")]
    UnknownScene { scene: String, valid: String },

    /// Caller-supplied options violate a constraint
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// External tool could not be located or started
    #[error("Failed to start {executable}: {source}")]
    ProcessSpawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// Duration probe failed or produced unparsable output
    #[error("Failed to probe duration ({}): {message}", exit_label(.exit_code))]
    Probe {
        message: String,
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// Ambient audio synthesis exited unsuccessfully
    #[error("Ambient audio generation failed ({})", exit_label(.exit_code))]
    AudioGeneration {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// Audio/video muxing exited unsuccessfully
    #[error("Audio/video mux failed ({})", exit_label(.exit_code))]
    Mux {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// External tool ran past the configured timeout and was killed
    #[error("{executable} timed out after {}s", .after.as_secs_f64())]
    Timeout { executable: String, after: Duration },

    /// External tool was terminated by a cancellation request
    #[error("{executable} was cancelled")]
    Cancelled { executable: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AmbimuxError {
    /// Name of the pipeline stage this error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            AmbimuxError::UnknownScene { .. } | AmbimuxError::InvalidOptions { .. } => "validate",
            AmbimuxError::Probe { .. } => "probe",
            AmbimuxError::AudioGeneration { .. } => "generate",
            AmbimuxError::Mux { .. } => "mux",
            AmbimuxError::ProcessSpawn { .. }
            | AmbimuxError::Timeout { .. }
            | AmbimuxError::Cancelled { .. } => "process",
            AmbimuxError::Config { .. } => "config",
            AmbimuxError::Io(_) => "io",
        }
    }

    /// Whether a retry might succeed without changing inputs or environment
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AmbimuxError::Probe { .. }
                | AmbimuxError::AudioGeneration { .. }
                | AmbimuxError::Mux { .. }
                | AmbimuxError::Timeout { .. }
        )
    }

    /// Diagnostics captured from the failing tool, if any
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            AmbimuxError::Probe { diagnostics, .. }
            | AmbimuxError::AudioGeneration { diagnostics, .. }
            | AmbimuxError::Mux { diagnostics, .. } => Some(diagnostics.as_str()),
            _ => None,
        }
    }
}

fn exit_label(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for Ambimux operations
pub type AmbimuxResult<T> = std::result::Result<T, AmbimuxError>;
