//! Application settings
//!
//! Everything the binary reads from `config/*.toml` and `MAESTRO_*`.

mod loader;

pub use loader::load_settings;

use maestro_core::OrchestratorConfig;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Completion service selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// "openai" or "mock"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider default model override
    #[serde(default)]
    pub model: Option<String>,
    /// OpenAI-compatible endpoint override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout for content generation
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    60
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            base_url: None,
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// EnvFilter directives used when MAESTRO_LOG / RUST_LOG are unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "maestro=info,maestro_core=info,maestro_llm=info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}
