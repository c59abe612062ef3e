//! Support agent: a direct, non-specialized completion stream

use super::invocation::{Agent, AgentInput, AgentStream};
use super::types::{recent_turns, AgentType};
use crate::error::Result;
use crate::events::token_events;
use crate::orchestrator::OrchestratorConfig;
use async_trait::async_trait;
use maestro_llm::{CompletionRequest, LlmProvider, Message};
use std::sync::Arc;
use tracing::{debug, instrument};

const SUPPORT_SYSTEM_PROMPT: &str = "You are the support assistant of an AI creator platform \
where people share projects, learn about AI and build portfolios. Answer clearly and \
concisely. If the request belongs to a specialist area (search, learning, project import, \
images), still give the most helpful answer you can.";

/// Fallback agent that answers with a plain streamed completion
pub struct SupportAgent {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: f32,
    max_tokens: u32,
    history_turns: usize,
}

impl SupportAgent {
    /// Create a support agent using the content-generation settings of `config`
    pub fn new(provider: Arc<dyn LlmProvider>, config: &OrchestratorConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.agent_temperature,
            max_tokens: config.agent_max_tokens,
            history_turns: config.history_turns,
        }
    }

    fn build_request(&self, input: &AgentInput) -> CompletionRequest {
        let mut system = SUPPORT_SYSTEM_PROMPT.to_string();
        if let Some(name) = &input.user.username {
            system.push_str(&format!("\nYou are talking with {name}."));
        }
        if let Some(task) = &input.task {
            system.push_str(&format!("\nCurrent focus: {task}"));
        }

        let model = self
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());

        let history = recent_turns(&input.history, self.history_turns)
            .iter()
            .map(|turn| {
                if turn.is_user() {
                    Message::user(turn.content.clone())
                } else {
                    Message::assistant(turn.content.clone())
                }
            });

        let mut messages = vec![Message::system(system)];
        messages.extend(history);
        messages.push(Message::user(input.message.clone()));

        CompletionRequest::new(model)
            .with_messages(messages)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

#[async_trait]
impl Agent for SupportAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::Support
    }

    #[instrument(skip(self, input), fields(session_id = %input.user.session_id))]
    async fn invoke(&self, input: AgentInput) -> Result<AgentStream> {
        let request = self.build_request(&input);
        debug!(
            messages = request.messages.len(),
            prompt_chars = request.prompt_chars(),
            "Support agent streaming"
        );
        let chunks = self.provider.complete_stream(request).await?;
        Ok(token_events(chunks, input.user.session_id))
    }
}
