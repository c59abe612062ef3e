//! Configuration loading
//!
//! Embedded defaults, then optional files, then environment.

use super::Settings;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load settings from files and environment
pub fn load_settings() -> Result<Settings> {
    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        // MAESTRO_ORCHESTRATOR__HISTORY_TURNS=5 -> orchestrator.history_turns
        .add_source(
            Environment::with_prefix("MAESTRO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_deserialize() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.orchestrator.planning_timeout_secs, 10);
        assert_eq!(settings.orchestrator.history_turns, 3);
        assert!(settings.orchestrator.validate().is_ok());
        assert!(!settings.logging.json);
    }

    #[test]
    fn test_file_override_merges_with_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(
                "[llm]\nprovider = \"mock\"\n[orchestrator]\nhistory_turns = 5\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.llm.provider, "mock");
        assert_eq!(settings.orchestrator.history_turns, 5);
        assert_eq!(settings.orchestrator.findings_summary_chars, 500);
    }
}
