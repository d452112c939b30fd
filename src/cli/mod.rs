//! CLI module for Ambimux
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Ambimux - ambient audio for silent videos
///
/// Synthesizes scene-based ambient audio with ffmpeg and mixes it under an
/// existing video stream without re-encoding the video.
#[derive(Parser, Debug)]
#[command(name = "ambimux")]
#[command(about = "Ambimux - Add synthesized ambient audio to silent videos")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./ambimux.toml if present)
    #[arg(long, global = true, env = "AMBIMUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (overrides config; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: String,

    /// Per-tool timeout in seconds, 0 disables it
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add ambient audio to a video
    Mix(args::MixArgs),
    /// Generate a standalone ambient audio track
    Generate(args::GenerateArgs),
    /// Print a video's duration in seconds
    Probe(args::ProbeArgs),
    /// List available scenes
    Scenes(args::ScenesArgs),
}
