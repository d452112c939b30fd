//! Ambimux CLI
//!
//! Adds synthesized ambient audio to silent videos.
//!
//! # Usage
//!
//! ```bash
//! ambimux mix --input clip.mp4 --scene forest --output out.mp4
//! ambimux generate --scene vinyl --output vinyl.mp3 --duration 30
//! ambimux probe --input clip.mp4
//! ambimux scenes --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ambimux::adapters::{init_logging, LogFormat};
use ambimux::app::container::DefaultAppContainer;
use ambimux::cli::{commands, Cli, Commands};
use ambimux::config_initialization::initialize_configuration;
use ambimux::cancel_pair;

/// Main entry point for the Ambimux CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Listing scenes needs neither configuration nor external tools
    if let Commands::Scenes(args) = &cli.command {
        return commands::scenes(args);
    }

    let config = initialize_configuration(&cli)?;
    let format: LogFormat = cli.log_format.parse()?;
    init_logging(&config.log_level, format)?;

    info!("Starting Ambimux");
    let container = DefaultAppContainer::new(&config)?;

    let (handle, cancel) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            handle.cancel();
        }
    });

    match cli.command {
        Commands::Mix(args) => commands::mix(&container, args, &cancel).await?,
        Commands::Generate(args) => commands::generate(&container, args, &cancel).await?,
        Commands::Probe(args) => commands::probe(&container, args, &cancel).await?,
        Commands::Scenes(args) => commands::scenes(&args)?,
    }

    info!("Ambimux completed successfully");
    Ok(())
}
