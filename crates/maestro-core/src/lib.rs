//! Maestro Core - Multi-Agent Orchestration Engine
//!
//! This crate turns one user chat message into a streamed answer:
//! - Agents: capability registry, handoff context, agent invocation contract
//! - Events: the streamed event vocabulary and its bounded-channel sink
//! - Orchestrator: Supervisor (planning, fallback routing, synthesis) and
//!   Executor (single-agent relay, sequential state machine)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agents;
pub mod error;
pub mod events;
pub mod orchestrator;

pub use agents::{
    capabilities, capability, describe_capabilities, handoff_targets, parse_agent_type, Agent,
    AgentCapability, AgentDirectory, AgentInput, AgentStream, AgentType, ConversationMessage,
    HandoffContext, ScriptedAgent, SupportAgent, UserContext,
};
pub use error::{format_error_for_chat, Error, Result, UserFriendlyError};
pub use events::{EventSink, EventStream, OrchestrationEvent};
pub use orchestrator::{
    route_by_keywords, AgentResult, Executor, OrchestrationPlan, OrchestrationRequest,
    Orchestrator, OrchestratorConfig, PlanKind, PlanStep, Supervisor,
};
