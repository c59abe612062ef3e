//! Error types for maestro-core
//!
//! Technical detail stays in `Display` (logged); `user_message` is what an
//! end user sees in an `error` event.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Completion service error
    #[error("llm error: {0}")]
    Llm(#[from] maestro_llm::Error),

    /// Planner output could not be turned into a plan
    #[error("plan parse error: {0}")]
    PlanParse(String),

    /// A concrete agent failed while handling a step
    #[error("agent '{agent}' failed: {message}")]
    AgentInvocation {
        /// Agent type value (e.g. "discovery")
        agent: String,
        /// Failure description
        message: String,
    },

    /// Merging agent outputs failed
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Agent name outside the capability registry
    #[error("unknown agent type: {0}")]
    UnknownAgent(String),

    /// (De)serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid settings
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The event consumer went away
    #[error("orchestration cancelled")]
    Cancelled,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable rendering of errors for chat surfaces
pub trait UserFriendlyError {
    /// Short, non-technical message
    fn user_message(&self) -> String;

    /// Optional hint on what to do next
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Llm(maestro_llm::Error::Timeout(_)) => {
                "The assistant took too long to respond.".to_string()
            }
            Error::Llm(maestro_llm::Error::RateLimit) => {
                "We're handling a lot of requests right now.".to_string()
            }
            Error::Llm(_) => "The AI service is temporarily unavailable.".to_string(),
            Error::PlanParse(_) => "I had trouble deciding how to handle that request.".to_string(),
            Error::AgentInvocation { .. } => {
                "Something went wrong while working on your request.".to_string()
            }
            Error::Synthesis(_) => {
                "I couldn't combine the results into a single answer.".to_string()
            }
            Error::UnknownAgent(_) => "That capability isn't available.".to_string(),
            Error::Serialization(_) => {
                "Something went wrong while preparing your request.".to_string()
            }
            Error::Configuration(_) => "The assistant is not configured correctly.".to_string(),
            Error::Cancelled => "The request was cancelled.".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Llm(maestro_llm::Error::RateLimit) => {
                Some("Please wait a moment before trying again.".to_string())
            }
            Error::Llm(_) | Error::AgentInvocation { .. } | Error::Synthesis(_) => {
                Some("Please try again.".to_string())
            }
            Error::PlanParse(_) => Some("Try rephrasing your request.".to_string()),
            Error::Configuration(_) => {
                Some("Check config/default.toml or MAESTRO_* environment variables.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in a chat message
pub fn format_error_for_chat(error: &Error) -> String {
    let mut output = error.user_message();

    if let Some(suggestion) = error.suggestion() {
        output.push(' ');
        output.push_str(&suggestion);
    }

    output
}
