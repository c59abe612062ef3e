//! Agents - capability registry, handoff protocol and invocation contract
//!
//! Concrete specialist agents live outside this crate. The orchestrator only
//! knows them through the [`Agent`] trait and the static capability table.

mod handoff;
mod invocation;
mod registry;
mod scripted;
mod support;
mod types;

pub use handoff::{enhance_message, HandoffContext, DEFAULT_HANDOFF_REASON};
pub use invocation::{Agent, AgentDirectory, AgentInput, AgentStream, UserContext};
pub use registry::{
    capabilities, capability, describe_capabilities, display_name, handoff_targets,
    AgentCapability,
};
pub use scripted::ScriptedAgent;
pub use support::SupportAgent;
pub use types::{parse_agent_type, recent_turns, AgentType, ConversationMessage};
