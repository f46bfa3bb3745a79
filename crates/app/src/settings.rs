//! Handles settings for the application.
//!
//! Values are layered: built-in defaults, then the optional TOML file
//! (`config/simplifinance.toml` unless `--config` is given), then
//! `SIMPLIFINANCE_*` environment variables, then command-line flags.
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/simplifinance.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file holding every entry.
    pub data_path: String,
    /// Log level for the `simplifinance` and `engine` targets.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: "data/finance_entries.json".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SIMPLIFINANCE"))
            .build()?
            .try_deserialize()?;

        if let Some(data) = &cli.data {
            settings.data_path = data.clone();
        }
        if let Some(level) = &cli.log_level {
            settings.level = level.clone();
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let cli = Cli::try_parse_from(["simplifinance", "--config", "missing/nowhere"]).unwrap();
        let settings = Settings::load(&cli).unwrap();

        assert_eq!(settings.data_path, "data/finance_entries.json");
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "simplifinance",
            "--config",
            "missing/nowhere",
            "--data",
            "/tmp/entries.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let settings = Settings::load(&cli).unwrap();

        assert_eq!(settings.data_path, "/tmp/entries.json");
        assert_eq!(settings.level, "debug");
    }
}
