//! Orchestrator configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Timeout of the planning call, seconds
    #[serde(default = "default_planning_timeout_secs")]
    pub planning_timeout_secs: u64,
    /// Sampling temperature of the planning call
    #[serde(default = "default_planning_temperature")]
    pub planning_temperature: f32,
    /// Token cap of the planning call
    #[serde(default = "default_planning_max_tokens")]
    pub planning_max_tokens: u32,
    /// Conversation turns shown to the planner and agents
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
    /// Sampling temperature of agent content generation
    #[serde(default = "default_content_temperature")]
    pub agent_temperature: f32,
    /// Token cap of agent content generation
    #[serde(default = "default_content_max_tokens")]
    pub agent_max_tokens: u32,
    /// Sampling temperature of synthesis
    #[serde(default = "default_content_temperature")]
    pub synthesis_temperature: f32,
    /// Token cap of synthesis
    #[serde(default = "default_content_max_tokens")]
    pub synthesis_max_tokens: u32,
    /// Characters of step output carried forward in handoff findings
    #[serde(default = "default_findings_summary_chars")]
    pub findings_summary_chars: usize,
    /// Capacity of the event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Model override (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,
}

fn default_planning_timeout_secs() -> u64 {
    10
}

fn default_planning_temperature() -> f32 {
    0.3
}

fn default_planning_max_tokens() -> u32 {
    1000
}

fn default_history_turns() -> usize {
    3
}

fn default_content_temperature() -> f32 {
    0.7
}

fn default_content_max_tokens() -> u32 {
    2000
}

fn default_findings_summary_chars() -> usize {
    500
}

fn default_event_buffer() -> usize {
    64
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            planning_timeout_secs: default_planning_timeout_secs(),
            planning_temperature: default_planning_temperature(),
            planning_max_tokens: default_planning_max_tokens(),
            history_turns: default_history_turns(),
            agent_temperature: default_content_temperature(),
            agent_max_tokens: default_content_max_tokens(),
            synthesis_temperature: default_content_temperature(),
            synthesis_max_tokens: default_content_max_tokens(),
            findings_summary_chars: default_findings_summary_chars(),
            event_buffer: default_event_buffer(),
            model: None,
        }
    }
}

impl OrchestratorConfig {
    /// Planning timeout as a Duration
    pub fn planning_timeout(&self) -> Duration {
        Duration::from_secs(self.planning_timeout_secs)
    }

    /// Set the planning timeout
    #[must_use]
    pub fn with_planning_timeout(mut self, timeout: Duration) -> Self {
        self.planning_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the model override
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.planning_timeout_secs == 0 {
            return Err(Error::Configuration(
                "planning_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(Error::Configuration(
                "event_buffer must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("planning_temperature", self.planning_temperature),
            ("agent_temperature", self.agent_temperature),
            ("synthesis_temperature", self.synthesis_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(Error::Configuration(format!(
                    "{name} must be between 0.0 and 2.0, got {value}"
                )));
            }
        }
        if self.model.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Configuration("model must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.planning_timeout(), Duration::from_secs(10));
        assert!(config.planning_temperature < config.agent_temperature);
        assert_eq!(config.history_turns, 3);
        assert_eq!(config.findings_summary_chars, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: OrchestratorConfig =
            serde_json::from_str(r#"{"planning_timeout_secs": 5, "model": "gpt-4o"}"#).unwrap();
        assert_eq!(config.planning_timeout_secs, 5);
        assert_eq!(config.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.agent_max_tokens, 2000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = OrchestratorConfig {
            planning_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        let config = OrchestratorConfig {
            synthesis_temperature: 3.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("synthesis_temperature"));
    }
}
