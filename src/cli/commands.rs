//! Command implementations

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::container::AppContainer;
use crate::cli::args::{GenerateArgs, MixArgs, ProbeArgs, ScenesArgs};
use crate::domain::model::{AmbientOptions, AmbientRequest, AudioOptions, CancelSignal};
use crate::domain::scene::profiles;

/// Execute the mix command
pub async fn mix(container: &dyn AppContainer, args: MixArgs, cancel: &CancelSignal) -> Result<()> {
    let request = AmbientRequest::new(&args.input, &args.scene, &args.output).with_options(
        AmbientOptions {
            duration: args.duration,
            fade_duration: args.fade,
            volume: args.volume,
        },
    );

    let report = container
        .ambient_interactor()
        .execute_with_cancel(&request, cancel)
        .await
        .with_context(|| format!("Failed to add ambient audio to {}", args.input.display()))?;

    info!(
        scene = %report.scene,
        duration = report.duration,
        probed = report.duration_probed,
        "Mix complete"
    );
    println!("{}", report.output_path.display());
    Ok(())
}

/// Execute the generate command
pub async fn generate(
    container: &dyn AppContainer,
    args: GenerateArgs,
    cancel: &CancelSignal,
) -> Result<()> {
    container
        .generate_interactor()
        .generate(&args.scene, &args.output, &AudioOptions::new(args.duration), cancel)
        .await
        .with_context(|| format!("Failed to generate {}", args.output.display()))?;

    println!("{}", args.output.display());
    Ok(())
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs, cancel: &CancelSignal) -> Result<()> {
    let duration = container
        .probe_interactor()
        .probe(&args.input, cancel)
        .await
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;

    println!("{}", duration);
    Ok(())
}

#[derive(Serialize)]
struct SceneEntry {
    id: &'static str,
    description: &'static str,
}

/// Execute the scenes command
pub fn scenes(args: &ScenesArgs) -> Result<()> {
    let entries: Vec<SceneEntry> = profiles()
        .iter()
        .map(|profile| SceneEntry {
            id: profile.id.as_str(),
            description: profile.description,
        })
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &entries).context("Failed to serialize scenes")?;
        writeln!(out)?;
    } else {
        for entry in &entries {
            writeln!(out, "{:<8} {}", entry.id, entry.description)?;
        }
    }
    Ok(())
}
