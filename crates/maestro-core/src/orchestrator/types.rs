//! Per-step accumulators

use crate::agents::AgentType;
use maestro_llm::util::truncate_safe;
use serde_json::{Map, Value};

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResult {
    /// Agent that ran
    pub agent: AgentType,
    /// Concatenated tokens, or an `[Error: ...]` marker when nothing was produced
    pub content: String,
    /// Task the agent was given
    pub task: String,
    /// Error reported or raised by the step
    pub error: Option<String>,
}

impl AgentResult {
    /// Successful step
    pub fn new(agent: AgentType, task: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            agent,
            content: content.into(),
            task: task.into(),
            error: None,
        }
    }

    /// Failed step with no output
    pub fn failed(agent: AgentType, task: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            agent,
            content: format!("[Error: {error}]"),
            task: task.into(),
            error: Some(error),
        }
    }

    /// Whether the step failed
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Findings handed to the next step
    pub fn findings(&self, summary_chars: usize) -> Map<String, Value> {
        let mut findings = Map::new();
        findings.insert(
            "agent".to_string(),
            Value::String(self.agent.as_str().to_string()),
        );
        match &self.error {
            Some(error) => {
                findings.insert("error".to_string(), Value::String(error.clone()));
                findings.insert(
                    "task_attempted".to_string(),
                    Value::String(self.task.clone()),
                );
            }
            None => {
                findings.insert(
                    "content_summary".to_string(),
                    Value::String(truncate_safe(&self.content, summary_chars).to_string()),
                );
                findings.insert(
                    "task_completed".to_string(),
                    Value::String(self.task.clone()),
                );
            }
        }
        findings
    }
}
