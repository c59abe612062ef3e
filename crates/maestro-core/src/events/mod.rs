//! Orchestration events
//!
//! The streamed protocol between the orchestrator and its caller, plus the
//! channel plumbing that carries it.

mod sink;
mod tokens;
mod types;

pub use sink::{EventSink, EventStream};
pub use tokens::token_events;
pub use types::OrchestrationEvent;
