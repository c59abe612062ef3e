//! Handoff context passed between sequential steps

use super::registry::display_name;
use super::types::{AgentType, ConversationMessage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Reason used when the plan gives no `depends_on` note
pub const DEFAULT_HANDOFF_REASON: &str = "Continuing the multi-step plan";

/// What one step learned and what the next step should do with it.
///
/// Built once per transition and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffContext {
    /// Agent that produced the findings
    pub from_agent: AgentType,
    /// Agent receiving the handoff
    pub to_agent: AgentType,
    /// Why the transition happens
    pub reason: String,
    /// Findings of the previous step
    pub findings: Map<String, Value>,
    /// Task for the receiving agent
    pub instructions: String,
    /// The user's original message
    pub original_query: String,
    /// Recent conversation turns
    pub conversation_context: Vec<ConversationMessage>,
    /// Part of a multi-step plan
    pub is_multi_step: bool,
    /// 1-based step number of the receiving agent
    pub step_number: usize,
    /// Total steps in the plan
    pub total_steps: usize,
}

impl HandoffContext {
    /// Create a handoff between two agents
    pub fn new(
        from_agent: AgentType,
        to_agent: AgentType,
        reason: impl Into<String>,
        findings: Map<String, Value>,
    ) -> Self {
        Self {
            from_agent,
            to_agent,
            reason: reason.into(),
            findings,
            instructions: String::new(),
            original_query: String::new(),
            conversation_context: Vec::new(),
            is_multi_step: false,
            step_number: 0,
            total_steps: 0,
        }
    }

    /// Set the task for the receiving agent
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the user's original message
    #[must_use]
    pub fn with_original_query(mut self, query: impl Into<String>) -> Self {
        self.original_query = query.into();
        self
    }

    /// Attach recent conversation turns
    #[must_use]
    pub fn with_conversation(mut self, context: Vec<ConversationMessage>) -> Self {
        self.conversation_context = context;
        self
    }

    /// Mark as step `step_number` of `total_steps`
    #[must_use]
    pub fn with_step(mut self, step_number: usize, total_steps: usize) -> Self {
        self.is_multi_step = true;
        self.step_number = step_number;
        self.total_steps = total_steps;
        self
    }

    /// Plain map representation
    pub fn to_map(&self) -> Map<String, Value> {
        let conversation = self
            .conversation_context
            .iter()
            .map(|m| {
                let mut entry = Map::new();
                entry.insert("sender".to_string(), Value::String(m.sender.clone()));
                entry.insert("content".to_string(), Value::String(m.content.clone()));
                Value::Object(entry)
            })
            .collect();

        let mut map = Map::new();
        map.insert(
            "from_agent".to_string(),
            Value::String(self.from_agent.as_str().to_string()),
        );
        map.insert(
            "to_agent".to_string(),
            Value::String(self.to_agent.as_str().to_string()),
        );
        map.insert("reason".to_string(), Value::String(self.reason.clone()));
        map.insert("findings".to_string(), Value::Object(self.findings.clone()));
        map.insert(
            "instructions".to_string(),
            Value::String(self.instructions.clone()),
        );
        map.insert(
            "original_query".to_string(),
            Value::String(self.original_query.clone()),
        );
        map.insert("conversation_context".to_string(), Value::Array(conversation));
        map.insert("is_multi_step".to_string(), Value::Bool(self.is_multi_step));
        map.insert("step_number".to_string(), Value::from(self.step_number));
        map.insert("total_steps".to_string(), Value::from(self.total_steps));
        map
    }

    /// Rebuild from [`to_map`](Self::to_map) output
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Prompt prefix block for the receiving agent
    pub fn format_for_prompt(&self) -> String {
        let findings = serde_json::to_string_pretty(&self.findings)
            .unwrap_or_else(|_| "{}".to_string());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "## Handoff from {} ({})",
            display_name(self.from_agent),
            self.from_agent
        );
        if self.is_multi_step {
            let _ = writeln!(out, "Step {} of {}", self.step_number, self.total_steps);
        }
        let _ = writeln!(out, "Reason: {}", self.reason);
        let _ = writeln!(out, "\nFindings from the previous step:\n```json\n{findings}\n```");
        if !self.instructions.is_empty() {
            let _ = writeln!(out, "\nYour task: {}", self.instructions);
        }
        if !self.original_query.is_empty() {
            let _ = writeln!(out, "Original user request: {}", self.original_query);
        }
        out
    }
}

/// Prepend the handoff block (if any) to an agent's input message.
pub fn enhance_message(message: &str, handoff: Option<&HandoffContext>) -> String {
    match handoff {
        Some(handoff) => format!("{}\n---\n\n{}", handoff.format_for_prompt(), message),
        None => message.to_string(),
    }
}
