//! Orchestrator entry point

use super::config::OrchestratorConfig;
use super::executor::Executor;
use super::plan::OrchestrationPlan;
use super::supervisor::Supervisor;
use crate::agents::{
    recent_turns, Agent, AgentDirectory, ConversationMessage, SupportAgent, UserContext,
};
use crate::events::EventStream;
use maestro_llm::LlmProvider;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// One chat message to orchestrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationRequest {
    /// The user's message
    pub user_message: String,
    /// Platform user id
    pub user_id: Option<String>,
    /// Display name
    pub username: Option<String>,
    /// Chat session id (generated when not supplied)
    pub session_id: String,
    /// Prior turns, oldest first
    pub conversation_history: Vec<ConversationMessage>,
}

impl OrchestrationRequest {
    /// New request in a fresh session
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            user_id: None,
            username: None,
            session_id: Uuid::new_v4().to_string(),
            conversation_history: Vec::new(),
        }
    }

    /// Set the requesting user
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>, username: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.username = Some(username.into());
        self
    }

    /// Continue an existing session (blank ids are ignored)
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        if !session_id.trim().is_empty() {
            self.session_id = session_id;
        }
        self
    }

    /// Set the conversation history
    #[must_use]
    pub fn with_history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.conversation_history = history;
        self
    }

    /// Who is asking, as seen by agents
    pub fn user_context(&self) -> UserContext {
        UserContext {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            session_id: self.session_id.clone(),
        }
    }

    /// Last `turns` entries of the history
    pub fn recent_history(&self, turns: usize) -> Vec<ConversationMessage> {
        recent_turns(&self.conversation_history, turns).to_vec()
    }
}

/// Shared, immutable handle that starts orchestrations
#[derive(Clone)]
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    agents: Arc<AgentDirectory>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Orchestrator whose only concrete agent is [`SupportAgent`]
    pub fn new(provider: Arc<dyn LlmProvider>, config: OrchestratorConfig) -> Self {
        let support = Arc::new(SupportAgent::new(Arc::clone(&provider), &config));
        Self::with_agents(provider, AgentDirectory::new(support), config)
    }

    /// Orchestrator over an existing agent directory
    pub fn with_agents(
        provider: Arc<dyn LlmProvider>,
        agents: AgentDirectory,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            provider,
            agents: Arc::new(agents),
            config,
        }
    }

    /// Register a specialist agent
    #[must_use]
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        Arc::make_mut(&mut self.agents).register(agent);
        self
    }

    /// Settings in use
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Registered agents
    pub fn agents(&self) -> &AgentDirectory {
        &self.agents
    }

    /// Fresh supervisor for one request
    pub fn supervisor(&self) -> Supervisor {
        Supervisor::new(Arc::clone(&self.provider), self.config.clone())
    }

    /// Plan and run one message, streaming events as they happen.
    ///
    /// Must be called inside a tokio runtime. Dropping the stream stops
    /// the run.
    pub fn orchestrate(&self, request: OrchestrationRequest) -> EventStream {
        info!(
            session_id = %request.session_id,
            user_id = request.user_id.as_deref().unwrap_or("anonymous"),
            history = request.conversation_history.len(),
            "Starting orchestration"
        );
        Executor::new(self.supervisor(), Arc::clone(&self.agents), self.config.clone())
            .execute(request)
    }

    /// Plan a message without executing it
    pub async fn plan(
        &self,
        user_message: &str,
        history: &[ConversationMessage],
    ) -> OrchestrationPlan {
        self.supervisor().create_plan(user_message, history).await
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider.name())
            .field("agents", &self.agents)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_generates_session_id() {
        let a = OrchestrationRequest::new("hi");
        let b = OrchestrationRequest::new("hi");
        assert!(Uuid::parse_str(&a.session_id).is_ok());
        assert_ne!(a.session_id, b.session_id);

        let kept = OrchestrationRequest::new("hi").with_session("chat-42");
        assert_eq!(kept.session_id, "chat-42");
        let blank = OrchestrationRequest::new("hi").with_session("  ");
        assert!(Uuid::parse_str(&blank.session_id).is_ok());
    }

    #[test]
    fn test_recent_history() {
        let history: Vec<ConversationMessage> = (0..9)
            .map(|i| ConversationMessage::new("user", i.to_string()))
            .collect();
        let request = OrchestrationRequest::new("hi").with_history(history);
        let recent = request.recent_history(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "6");
        assert!(request.recent_history(10).len() == 9);
    }

    #[test]
    fn test_user_context() {
        let request = OrchestrationRequest::new("hi")
            .with_user("u1", "ada")
            .with_session("s1");
        let user = request.user_context();
        assert_eq!(user.user_id.as_deref(), Some("u1"));
        assert_eq!(user.username.as_deref(), Some("ada"));
        assert_eq!(user.session_id, "s1");
    }
}
