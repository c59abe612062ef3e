//! Event vocabulary

use serde::{Deserialize, Serialize};

/// One unit of the streamed protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestrationEvent {
    /// Planning has begun
    OrchestrationStart {
        /// Status text
        message: String,
    },
    /// Sequential step `step` of `total` is beginning
    AgentStep {
        /// 1-based step number
        step: usize,
        /// Number of steps in the plan
        total: usize,
        /// Agent type value
        agent: String,
        /// Task given to the agent
        task: String,
    },
    /// A non-final step failed, execution continues
    AgentError {
        /// Agent type value
        agent: String,
        /// User-facing description
        error: String,
    },
    /// An agent started using a tool
    ToolStart {
        /// Tool name
        tool: String,
    },
    /// An agent finished using a tool
    ToolEnd {
        /// Tool name
        tool: String,
    },
    /// A chunk of generated text
    Token {
        /// Text chunk
        content: String,
    },
    /// Delegate to the image-generation subsystem
    RouteToImageGeneration {
        /// Message to hand over
        message: String,
    },
    /// Multi-agent merge is beginning
    SynthesisStart {
        /// Status text
        message: String,
    },
    /// Terminal success
    Complete {
        /// Session the run belongs to
        session_id: String,
    },
    /// Terminal failure
    Error {
        /// Short user-facing message
        message: String,
    },
}

impl OrchestrationEvent {
    /// Text chunk event
    pub fn token(content: impl Into<String>) -> Self {
        Self::Token {
            content: content.into(),
        }
    }

    /// Terminal failure event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Terminal success event
    pub fn complete(session_id: impl Into<String>) -> Self {
        Self::Complete {
            session_id: session_id.into(),
        }
    }

    /// `complete` or `error`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }

    /// Events relayed to the caller even while step output is suppressed
    pub fn is_always_forwarded(&self) -> bool {
        matches!(
            self,
            Self::ToolStart { .. } | Self::ToolEnd { .. } | Self::RouteToImageGeneration { .. }
        )
    }

    /// Wire value of the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrchestrationStart { .. } => "orchestration_start",
            Self::AgentStep { .. } => "agent_step",
            Self::AgentError { .. } => "agent_error",
            Self::ToolStart { .. } => "tool_start",
            Self::ToolEnd { .. } => "tool_end",
            Self::Token { .. } => "token",
            Self::RouteToImageGeneration { .. } => "route_to_image_generation",
            Self::SynthesisStart { .. } => "synthesis_start",
            Self::Complete { .. } => "complete",
            Self::Error { .. } => "error",
        }
    }
}
