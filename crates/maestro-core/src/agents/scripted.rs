//! Scripted agent for tests and demos
//!
//! Replays a fixed list of events and records every input it receives.

use super::invocation::{Agent, AgentInput, AgentStream};
use super::types::AgentType;
use crate::error::{Error, Result};
use crate::events::OrchestrationEvent;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Step {
    Emit(OrchestrationEvent),
    Raise(String),
}

/// An agent that plays back scripted events
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    agent_type: AgentType,
    script: Vec<Step>,
    fail_on_invoke: Option<String>,
    complete: bool,
    invocations: Arc<Mutex<Vec<AgentInput>>>,
}

impl ScriptedAgent {
    /// Agent with an empty script that just completes
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            script: Vec::new(),
            fail_on_invoke: None,
            complete: true,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append `token` events
    #[must_use]
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.extend(
            tokens
                .into_iter()
                .map(|t| Step::Emit(OrchestrationEvent::token(t))),
        );
        self
    }

    /// Append an arbitrary event
    #[must_use]
    pub fn with_event(mut self, event: OrchestrationEvent) -> Self {
        self.script.push(Step::Emit(event));
        self
    }

    /// Append a `tool_start`/`tool_end` pair
    #[must_use]
    pub fn with_tool(self, tool: &str) -> Self {
        self.with_event(OrchestrationEvent::ToolStart {
            tool: tool.to_string(),
        })
        .with_event(OrchestrationEvent::ToolEnd {
            tool: tool.to_string(),
        })
    }

    /// Raise mid-stream after the events scripted so far
    #[must_use]
    pub fn raising(mut self, message: impl Into<String>) -> Self {
        self.script.push(Step::Raise(message.into()));
        self.complete = false;
        self
    }

    /// Raise before producing a stream at all
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_on_invoke = Some(message.into());
        self
    }

    /// End the stream without a `complete` event
    #[must_use]
    pub fn without_complete(mut self) -> Self {
        self.complete = false;
        self
    }

    /// Inputs received so far
    pub fn invocations(&self) -> Vec<AgentInput> {
        self.invocations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn raise(&self, message: &str) -> Error {
        Error::AgentInvocation {
            agent: self.agent_type.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    async fn invoke(&self, input: AgentInput) -> Result<AgentStream> {
        let session_id = input.user.session_id.clone();
        self.invocations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(input);

        if let Some(message) = &self.fail_on_invoke {
            return Err(self.raise(message));
        }

        let mut items: Vec<Result<OrchestrationEvent>> = self
            .script
            .iter()
            .map(|step| match step {
                Step::Emit(event) => Ok(event.clone()),
                Step::Raise(message) => Err(self.raise(message)),
            })
            .collect();
        if self.complete {
            items.push(Ok(OrchestrationEvent::complete(session_id)));
        }

        Ok(stream::iter(items).boxed())
    }
}
