//! Agent invocation boundary
//!
//! Every specialist is consumed through [`Agent::invoke`]: an input message
//! (already folded with any handoff) in, a stream of events out.

use super::handoff::{enhance_message, HandoffContext};
use super::types::{AgentType, ConversationMessage};
use crate::error::Result;
use crate::events::OrchestrationEvent;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Events produced by one agent invocation.
///
/// An `Err` item means the agent raised; consumers stop reading there.
pub type AgentStream = BoxStream<'static, Result<OrchestrationEvent>>;

/// Who is asking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    /// Platform user id
    pub user_id: Option<String>,
    /// Display name
    pub username: Option<String>,
    /// Chat session id
    pub session_id: String,
}

/// Input handed to an agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInput {
    /// Message text, prefixed with the handoff block when one is attached
    pub message: String,
    /// Handoff from the previous step
    pub handoff: Option<HandoffContext>,
    /// Task assigned by the plan
    pub task: Option<String>,
    /// Recent conversation turns
    pub history: Vec<ConversationMessage>,
    /// Requesting user
    pub user: UserContext,
}

impl AgentInput {
    /// Create an input without handoff
    pub fn new(message: impl Into<String>, user: UserContext) -> Self {
        Self {
            message: message.into(),
            handoff: None,
            task: None,
            history: Vec::new(),
            user,
        }
    }

    /// Set the plan task (empty tasks are ignored)
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        let task = task.into();
        self.task = (!task.is_empty()).then_some(task);
        self
    }

    /// Attach conversation history
    #[must_use]
    pub fn with_history(mut self, history: Vec<ConversationMessage>) -> Self {
        self.history = history;
        self
    }

    /// Attach a handoff and fold it into the message
    #[must_use]
    pub fn with_handoff(mut self, handoff: HandoffContext) -> Self {
        self.message = enhance_message(&self.message, Some(&handoff));
        self.handoff = Some(handoff);
        self
    }
}

/// A specialist agent
#[async_trait]
pub trait Agent: Send + Sync {
    /// Capability this agent implements
    fn agent_type(&self) -> AgentType;

    /// Start handling `input`.
    ///
    /// Errors returned here, or yielded inside the stream, are treated as the
    /// agent raising.
    async fn invoke(&self, input: AgentInput) -> Result<AgentStream>;
}

/// Agent implementations by type, with a fallback for unregistered types
#[derive(Clone)]
pub struct AgentDirectory {
    agents: HashMap<AgentType, Arc<dyn Agent>>,
    fallback: Arc<dyn Agent>,
}

impl AgentDirectory {
    /// Create a directory that routes unregistered types to `fallback`
    pub fn new(fallback: Arc<dyn Agent>) -> Self {
        let mut agents: HashMap<AgentType, Arc<dyn Agent>> = HashMap::new();
        agents.insert(fallback.agent_type(), Arc::clone(&fallback));
        Self { agents, fallback }
    }

    /// Register (or replace) an agent
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        self.agents.insert(agent.agent_type(), agent);
    }

    /// Builder form of [`register`](Self::register)
    #[must_use]
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.register(agent);
        self
    }

    /// Registered agent for `agent_type`, or the fallback
    pub fn resolve(&self, agent_type: AgentType) -> Arc<dyn Agent> {
        match self.agents.get(&agent_type) {
            Some(agent) => Arc::clone(agent),
            None => {
                debug!(agent = %agent_type, fallback = %self.fallback.agent_type(), "No agent registered, using fallback");
                Arc::clone(&self.fallback)
            }
        }
    }

    /// Types with a registered implementation
    pub fn registered(&self) -> Vec<AgentType> {
        let mut types: Vec<AgentType> = self.agents.keys().copied().collect();
        types.sort_by_key(|t| AgentType::ALL.iter().position(|a| a == t));
        types
    }

    /// Invoke the agent for `agent_type`.
    ///
    /// `image_generation` never streams text here; it yields a routing signal
    /// for the image subsystem followed by `complete`.
    pub async fn invoke(&self, agent_type: AgentType, input: AgentInput) -> Result<AgentStream> {
        if agent_type == AgentType::ImageGeneration {
            return Ok(image_generation_signal(input));
        }
        self.resolve(agent_type).invoke(input).await
    }
}

impl std::fmt::Debug for AgentDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDirectory")
            .field("agents", &self.registered())
            .field("fallback", &self.fallback.agent_type())
            .finish()
    }
}

fn image_generation_signal(input: AgentInput) -> AgentStream {
    stream::iter([
        Ok(OrchestrationEvent::RouteToImageGeneration {
            message: input.message,
        }),
        Ok(OrchestrationEvent::complete(input.user.session_id)),
    ])
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ScriptedAgent;
    use serde_json::Map;

    fn user() -> UserContext {
        UserContext {
            session_id: "session-1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unregistered_type_uses_fallback() {
        let support = Arc::new(ScriptedAgent::new(AgentType::Support).with_tokens(["fallback"]));
        let directory = AgentDirectory::new(support.clone());

        let events: Vec<_> = directory
            .invoke(AgentType::Learning, AgentInput::new("hi", user()))
            .await
            .unwrap()
            .collect()
            .await;

        assert!(matches!(&events[0], Ok(OrchestrationEvent::Token { content }) if content == "fallback"));
        assert_eq!(support.invocations().len(), 1);
    }

    #[tokio::test]
    async fn test_image_generation_emits_route_signal() {
        let support = Arc::new(ScriptedAgent::new(AgentType::Support));
        let directory = AgentDirectory::new(support.clone());

        let events: Vec<_> = directory
            .invoke(AgentType::ImageGeneration, AgentInput::new("draw a fox", user()))
            .await
            .unwrap()
            .map(|e| e.unwrap())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![
                OrchestrationEvent::RouteToImageGeneration {
                    message: "draw a fox".to_string()
                },
                OrchestrationEvent::complete("session-1"),
            ]
        );
        assert!(support.invocations().is_empty());
    }

    #[test]
    fn test_registered_in_declaration_order() {
        let directory = AgentDirectory::new(Arc::new(ScriptedAgent::new(AgentType::Support)))
            .with_agent(Arc::new(ScriptedAgent::new(AgentType::Project)))
            .with_agent(Arc::new(ScriptedAgent::new(AgentType::Discovery)));
        assert_eq!(
            directory.registered(),
            vec![AgentType::Discovery, AgentType::Project, AgentType::Support]
        );
    }

    #[test]
    fn test_with_handoff_folds_message() {
        let handoff = HandoffContext::new(
            AgentType::Learning,
            AgentType::Discovery,
            "examples",
            Map::new(),
        );
        let input = AgentInput::new("show projects", user())
            .with_task("")
            .with_handoff(handoff.clone());

        assert!(input.task.is_none());
        assert!(input.message.starts_with("## Handoff from Learning Agent"));
        assert!(input.message.ends_with("show projects"));
        assert_eq!(input.handoff, Some(handoff));
    }
}
