//! Integration tests for Maestro
//!
//! These tests drive the public API across crates:
//! - maestro-llm: mock completion service
//! - maestro-core: supervisor planning, executor state machine, synthesis

use futures::StreamExt;
use maestro_core::{
    capabilities, AgentDirectory, AgentType, ConversationMessage, HandoffContext,
    OrchestrationEvent, OrchestrationRequest, Orchestrator, OrchestratorConfig, ScriptedAgent,
    Supervisor,
};
use maestro_llm::MockProvider;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn plan(plan_type: &str, agents: Value, synthesis_needed: bool) -> String {
    json!({
        "analysis": "integration plan",
        "plan_type": plan_type,
        "agents": agents,
        "synthesis_needed": synthesis_needed,
        "synthesis_instructions": "",
    })
    .to_string()
}

async fn collect(orchestrator: &Orchestrator, message: &str) -> Vec<OrchestrationEvent> {
    orchestrator
        .orchestrate(OrchestrationRequest::new(message).with_session("it-session"))
        .collect()
        .await
}

fn kinds(events: &[OrchestrationEvent]) -> Vec<&'static str> {
    events.iter().map(OrchestrationEvent::kind).collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_single_discovery_scenario() {
    let mock = MockProvider::new();
    mock.add_response(plan(
        "single",
        json!([{"agent": "discovery", "task": "search", "depends_on": null}]),
        false,
    ));
    let discovery = Arc::new(ScriptedAgent::new(AgentType::Discovery).with_tokens(["Agent projects: ", "A, B"]));
    let directory = AgentDirectory::new(Arc::new(ScriptedAgent::new(AgentType::Support)))
        .with_agent(discovery.clone());
    let orchestrator =
        Orchestrator::with_agents(Arc::new(mock.clone()), directory, OrchestratorConfig::default());

    let events = collect(&orchestrator, "Find me some AI agent projects").await;

    assert_eq!(kinds(&events), vec!["orchestration_start", "token", "token", "complete"]);
    assert!(!events.iter().any(|e| matches!(e.kind(), "agent_step" | "synthesis_start")));
    assert_eq!(events[3], OrchestrationEvent::complete("it-session"));
    assert!(discovery.invocations()[0].handoff.is_none());
}

#[tokio::test]
async fn test_failed_first_step_then_synthesis_scenario() {
    let mock = MockProvider::new();
    mock.add_response(plan(
        "sequential",
        json!([
            {"agent": "learning", "task": "explain AI agents", "depends_on": null},
            {"agent": "discovery", "task": "find agent projects", "depends_on": "uses the explanation"}
        ]),
        true,
    ));
    mock.add_stream(["Here is ", "a combined answer."]);

    let learning = Arc::new(ScriptedAgent::new(AgentType::Learning).failing("ConnectionError: timeout"));
    let discovery = Arc::new(
        ScriptedAgent::new(AgentType::Discovery)
            .with_tool("project_search")
            .with_tokens(["Project A"]),
    );
    let directory = AgentDirectory::new(Arc::new(ScriptedAgent::new(AgentType::Support)))
        .with_agent(learning)
        .with_agent(discovery.clone());
    let orchestrator =
        Orchestrator::with_agents(Arc::new(mock), directory, OrchestratorConfig::default());

    let events = collect(&orchestrator, "Teach me about AI agents and show me some").await;

    assert_eq!(
        kinds(&events),
        vec![
            "orchestration_start",
            "agent_step",
            "agent_error",
            "agent_step",
            "tool_start",
            "tool_end",
            "synthesis_start",
            "token",
            "token",
            "complete",
        ]
    );
    assert_eq!(
        events[1],
        OrchestrationEvent::AgentStep {
            step: 1,
            total: 2,
            agent: "learning".to_string(),
            task: "explain AI agents".to_string(),
        }
    );

    let handoff = discovery.invocations()[0].handoff.clone().unwrap();
    assert!(handoff.findings.contains_key("error"));
    assert_eq!(handoff.findings["task_attempted"], "explain AI agents");
}

#[tokio::test]
async fn test_three_step_plan_step_numbering() {
    let mock = MockProvider::new();
    mock.add_response(plan(
        "sequential",
        json!([
            {"agent": "learning", "task": "one"},
            {"agent": "project", "task": "two"},
            {"agent": "discovery", "task": "three"}
        ]),
        false,
    ));
    let directory = AgentDirectory::new(Arc::new(ScriptedAgent::new(AgentType::Support)))
        .with_agent(Arc::new(ScriptedAgent::new(AgentType::Learning).with_tokens(["1"])))
        .with_agent(Arc::new(ScriptedAgent::new(AgentType::Project).with_tokens(["2"])))
        .with_agent(Arc::new(ScriptedAgent::new(AgentType::Discovery).with_tokens(["3"])));
    let orchestrator =
        Orchestrator::with_agents(Arc::new(mock), directory, OrchestratorConfig::default());

    let events = collect(&orchestrator, "do three things").await;

    let steps: Vec<(usize, usize)> = events
        .iter()
        .filter_map(|e| match e {
            OrchestrationEvent::AgentStep { step, total, .. } => Some((*step, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![(1, 3), (2, 3), (3, 3)]);

    // each step's token follows its own agent_step
    assert_eq!(
        kinds(&events),
        vec![
            "orchestration_start",
            "agent_step",
            "token",
            "agent_step",
            "token",
            "agent_step",
            "token",
            "complete",
        ]
    );
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
}

#[tokio::test]
async fn test_support_agent_answers_when_plan_is_unparseable() {
    let mock = MockProvider::new();
    mock.add_response("not a plan");
    mock.add_stream(["Happy ", "to help!"]);
    let orchestrator = Orchestrator::new(Arc::new(mock.clone()), OrchestratorConfig::default());

    let events = collect(&orchestrator, "hello").await;

    assert_eq!(
        events,
        vec![
            OrchestrationEvent::OrchestrationStart {
                message: "Analyzing your request...".to_string()
            },
            OrchestrationEvent::token("Happy "),
            OrchestrationEvent::token("to help!"),
            OrchestrationEvent::complete("it-session"),
        ]
    );
    assert_eq!(mock.requests().len(), 2);
}

// ============================================================================
// Supervisor properties
// ============================================================================

#[tokio::test]
async fn test_create_plan_never_fails() {
    let outputs = [
        "",
        "{",
        "```json\n{\"analysis\": 1}\n```",
        r#"{"analysis": "a", "plan_type": "single", "agents": [], "synthesis_needed": false}"#,
        r#"{"analysis": "a", "plan_type": "loop", "agents": [{"agent": "support"}], "synthesis_needed": false}"#,
        "[1, 2, 3]",
    ];
    for output in outputs {
        let mock = MockProvider::new();
        mock.add_response(output);
        let supervisor = Supervisor::new(Arc::new(mock), OrchestratorConfig::default());
        let plan = supervisor.create_plan("anything", &[]).await;
        assert!(plan.is_single_agent(), "output {output:?}");
        assert_eq!(plan.steps()[0].agent, AgentType::Support, "output {output:?}");
    }
}

#[tokio::test]
async fn test_keyword_fallback_without_matches_uses_first_capability() {
    for message in ["zzz", "qqq rrr", "0000"] {
        let mock = MockProvider::new();
        mock.add_failure("planner down");
        let supervisor = Supervisor::new(Arc::new(mock), OrchestratorConfig::default());
        let plan = supervisor.create_plan(message, &[]).await;
        assert_eq!(plan.steps()[0].agent, capabilities()[0].agent_type);
    }
}

// ============================================================================
// Handoff context
// ============================================================================

#[test]
fn test_handoff_round_trip_via_map() {
    let mut findings = Map::new();
    findings.insert("agent".to_string(), json!("project"));
    findings.insert("items".to_string(), json!([1, 2, {"nested": true}]));

    let handoff = HandoffContext::new(AgentType::Project, AgentType::Learning, "explain the stack", findings)
        .with_instructions("teach the tech stack")
        .with_original_query("import my repo and explain it")
        .with_conversation(vec![ConversationMessage::new("user", "hey")])
        .with_step(2, 2);

    let restored = HandoffContext::from_map(handoff.to_map()).unwrap();
    assert_eq!(restored, handoff);
}
