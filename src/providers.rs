//! Completion provider selection

use crate::settings::LlmSettings;
use anyhow::{bail, Context, Result};
use maestro_llm::{LlmProvider, MockProvider, OpenAiConfig, OpenAiProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build the configured provider
pub fn build_provider(settings: &LlmSettings) -> Result<Arc<dyn LlmProvider>> {
    match settings.provider.to_ascii_lowercase().as_str() {
        "openai" => {
            let mut config = OpenAiConfig::from_env()
                .context("OpenAI provider selected but OPENAI_API_KEY is not set")?
                .with_timeout(Duration::from_secs(settings.timeout_secs));
            if let Some(url) = &settings.base_url {
                config = config.with_base_url(url.clone());
            }
            if let Some(model) = &settings.model {
                config = config.with_model(model.clone());
            }
            let provider = OpenAiProvider::new(config);
            info!(provider = provider.name(), model = provider.default_model(), "LLM provider ready");
            Ok(Arc::new(provider))
        }
        "mock" => {
            warn!("Using the mock LLM provider; answers are canned");
            Ok(Arc::new(MockProvider::new()))
        }
        other => bail!("Unknown LLM provider '{other}' (expected \"openai\" or \"mock\")"),
    }
}
