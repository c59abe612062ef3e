//! Orchestration plans and planner-output parsing
//!
//! The planner replies in free text that should contain one JSON object:
//!
//! ```json
//! {"analysis": "...", "plan_type": "single" | "sequential",
//!  "agents": [{"agent": "discovery", "task": "...", "depends_on": null}],
//!  "synthesis_needed": false, "synthesis_instructions": ""}
//! ```

use crate::agents::{parse_agent_type, AgentType};
use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::warn;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)```").expect("FENCED_JSON regex is valid")
});

static FENCED_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)```").expect("FENCED_ANY regex is valid")
});

/// One (agent, task) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Agent that runs the step
    pub agent: AgentType,
    /// What the agent should do
    pub task: String,
    /// Why this step follows the previous one
    pub depends_on: Option<String>,
}

impl PlanStep {
    /// Create a step
    pub fn new(agent: AgentType, task: impl Into<String>) -> Self {
        Self {
            agent,
            task: task.into(),
            depends_on: None,
        }
    }

    /// Set the dependency note
    #[must_use]
    pub fn depending_on(mut self, reason: impl Into<String>) -> Self {
        self.depends_on = Some(reason.into());
        self
    }
}

/// Shape of the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanKind {
    /// One agent answers directly
    Single(PlanStep),
    /// Two or more agents, run in order
    Sequential(Vec<PlanStep>),
}

/// The Supervisor's decision for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationPlan {
    /// Planner reasoning
    pub analysis: String,
    /// Steps to run
    pub kind: PlanKind,
    /// Merge step outputs with a synthesis pass
    pub synthesis_needed: bool,
    /// Guidance for the synthesis pass
    pub synthesis_instructions: String,
}

impl OrchestrationPlan {
    /// Single-agent plan
    pub fn single(step: PlanStep, analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            kind: PlanKind::Single(step),
            synthesis_needed: false,
            synthesis_instructions: String::new(),
        }
    }

    /// Plan from steps in order; one step collapses to `Single`.
    ///
    /// Returns `None` for an empty step list.
    pub fn from_steps(
        steps: Vec<PlanStep>,
        analysis: impl Into<String>,
        synthesis_needed: bool,
        synthesis_instructions: impl Into<String>,
    ) -> Option<Self> {
        let kind = match steps.len() {
            0 => return None,
            1 => PlanKind::Single(steps.into_iter().next()?),
            _ => PlanKind::Sequential(steps),
        };
        Some(Self {
            analysis: analysis.into(),
            kind,
            synthesis_needed,
            synthesis_instructions: synthesis_instructions.into(),
        })
    }

    /// Fallback plan: answer with the support agent
    pub fn default_support() -> Self {
        Self::single(
            PlanStep::new(AgentType::Support, "Help the user with their request"),
            "Defaulting to the support agent",
        )
    }

    /// Whether exactly one agent runs
    pub fn is_single_agent(&self) -> bool {
        matches!(self.kind, PlanKind::Single(_))
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[PlanStep] {
        match &self.kind {
            PlanKind::Single(step) => std::slice::from_ref(step),
            PlanKind::Sequential(steps) => steps,
        }
    }

    /// `"single"` or `"sequential"`
    pub fn plan_type(&self) -> &'static str {
        match self.kind {
            PlanKind::Single(_) => "single",
            PlanKind::Sequential(_) => "sequential",
        }
    }

    /// Plan in its JSON wire shape
    pub fn to_json(&self) -> Value {
        let agents: Vec<Value> = self
            .steps()
            .iter()
            .map(|step| {
                json!({
                    "agent": step.agent.as_str(),
                    "task": step.task,
                    "depends_on": step.depends_on,
                })
            })
            .collect();
        json!({
            "analysis": self.analysis,
            "plan_type": self.plan_type(),
            "agents": agents,
            "synthesis_needed": self.synthesis_needed,
            "synthesis_instructions": self.synthesis_instructions,
        })
    }

    /// Parse raw planner output.
    ///
    /// Unknown agent names are routed to `support`.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = extract_json(raw)
            .ok_or_else(|| Error::PlanParse("no JSON object found in planner output".to_string()))?;
        let wire: WirePlan =
            serde_json::from_value(value).map_err(|e| Error::PlanParse(e.to_string()))?;

        let plan_type = wire.plan_type.to_ascii_lowercase();
        if plan_type != "single" && plan_type != "sequential" {
            return Err(Error::PlanParse(format!(
                "unsupported plan_type '{}'",
                wire.plan_type
            )));
        }

        let mut steps: Vec<PlanStep> = wire.agents.into_iter().map(WireStep::into_step).collect();
        if plan_type == "single" {
            steps.truncate(1);
        }

        Self::from_steps(
            steps,
            wire.analysis,
            wire.synthesis_needed,
            wire.synthesis_instructions.unwrap_or_default(),
        )
        .ok_or_else(|| Error::PlanParse("plan has no agents".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct WirePlan {
    analysis: String,
    plan_type: String,
    agents: Vec<WireStep>,
    synthesis_needed: bool,
    #[serde(default)]
    synthesis_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStep {
    agent: String,
    #[serde(default)]
    task: Option<String>,
    #[serde(default)]
    depends_on: Option<String>,
}

impl WireStep {
    fn into_step(self) -> PlanStep {
        let agent = parse_agent_type(&self.agent).unwrap_or_else(|| {
            warn!(agent = %self.agent, "Planner chose an unknown agent, routing step to support");
            AgentType::Support
        });
        PlanStep {
            agent,
            task: self.task.unwrap_or_default(),
            depends_on: self.depends_on.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Find the first JSON object in free text.
///
/// Tries a ```json fence, then any ``` fence, then a brace-balanced scan
/// from the first `{`.
pub fn extract_json(text: &str) -> Option<Value> {
    let fenced_json = FENCED_JSON.captures(text).and_then(|c| c.get(1));
    let fenced_any = FENCED_ANY.captures(text).and_then(|c| c.get(1));

    fenced_json
        .map(|m| m.as_str())
        .into_iter()
        .chain(fenced_any.map(|m| m.as_str()))
        .chain(balanced_object(text))
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate.trim()) {
            Ok(value @ Value::Object(_)) => Some(value),
            _ => None,
        })
}

/// Slice from the first `{` to its matching `}`, skipping braces in strings.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
