//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::AmbimuxConfig;
use crate::cli::Cli;

/// Build the effective configuration: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<AmbimuxConfig> {
    let mut config =
        AmbimuxConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_env()
        .context("Failed to apply environment configuration")?;
    apply_cli_overrides(&mut config, cli);
    config.validate().context("Invalid configuration")?;

    debug!(?config, "Configuration initialized");
    Ok(config)
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut AmbimuxConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ambimux.toml");
        std::fs::write(&path, "[ambimux]\ntimeout_secs = 90\nlog_level = \"warn\"\n").unwrap();

        let cli = Cli::parse_from([
            "ambimux",
            "--config",
            path.to_str().unwrap(),
            "--timeout",
            "5",
            "scenes",
        ]);
        let config = initialize_configuration(&cli).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, "warn");
    }
}
