//! Orchestrator - plans a chat message and executes the plan
//!
//! Flow: [`Orchestrator::orchestrate`] spawns an [`Executor`] which asks the
//! [`Supervisor`] for a plan, runs one agent or a sequence with handoffs,
//! and finishes with synthesis when several agents contributed.

mod config;
mod core;
mod executor;
mod plan;
mod prompts;
mod supervisor;
mod types;

pub use self::core::{OrchestrationRequest, Orchestrator};
pub use config::OrchestratorConfig;
pub use executor::Executor;
pub use plan::{extract_json, OrchestrationPlan, PlanKind, PlanStep};
pub use supervisor::{route_by_keywords, Supervisor};
pub use types::AgentResult;
