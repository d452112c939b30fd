//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the mix command
#[derive(Args, Debug)]
pub struct MixArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Scene identifier (see `ambimux scenes`)
    #[arg(short, long)]
    pub scene: String,

    /// Output video file path (overwritten if present)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Ambient duration in seconds (default: probed from the input)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Fade in/out length in seconds
    #[arg(long)]
    pub fade: Option<f64>,

    /// Ambient volume multiplier
    #[arg(long)]
    pub volume: Option<f64>,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Scene identifier (see `ambimux scenes`)
    #[arg(short, long)]
    pub scene: String,

    /// Output audio file path (overwritten if present)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Duration in seconds
    #[arg(short, long)]
    pub duration: f64,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Arguments for the scenes command
#[derive(Args, Debug)]
pub struct ScenesArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
