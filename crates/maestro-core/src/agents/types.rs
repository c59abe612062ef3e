//! Agent identifiers and conversation messages

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of capability identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Search and recommendation of projects
    Discovery,
    /// Tutoring, explanations and learning paths
    Learning,
    /// Importing and managing the user's own projects
    Project,
    /// Images and infographics (executed by a separate subsystem)
    ImageGeneration,
    /// General help and the default fallback
    Support,
    /// Site navigation and guided actions
    Orchestration,
    /// Full-toolset generalist
    Unified,
}

impl AgentType {
    /// Every agent type, in declaration order
    pub const ALL: [AgentType; 7] = [
        AgentType::Discovery,
        AgentType::Learning,
        AgentType::Project,
        AgentType::ImageGeneration,
        AgentType::Support,
        AgentType::Orchestration,
        AgentType::Unified,
    ];

    /// Wire value used in plans, events and handoff maps
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Discovery => "discovery",
            AgentType::Learning => "learning",
            AgentType::Project => "project",
            AgentType::ImageGeneration => "image_generation",
            AgentType::Support => "support",
            AgentType::Orchestration => "orchestration",
            AgentType::Unified => "unified",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_agent_type(s).ok_or_else(|| Error::UnknownAgent(s.to_string()))
    }
}

/// Case-insensitive exact match against the wire values.
pub fn parse_agent_type(value: &str) -> Option<AgentType> {
    AgentType::ALL
        .into_iter()
        .find(|agent| agent.as_str().eq_ignore_ascii_case(value))
}

/// One prior chat turn as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// "user" or "assistant" (free-form; anything but "user" is treated as assistant)
    pub sender: String,
    /// Message text
    pub content: String,
}

impl ConversationMessage {
    /// Create a message
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Whether this turn came from the user
    pub fn is_user(&self) -> bool {
        self.sender.eq_ignore_ascii_case("user")
    }
}

/// The last `turns` entries of a history, oldest first. Each entry is one turn.
pub fn recent_turns(history: &[ConversationMessage], turns: usize) -> &[ConversationMessage] {
    &history[history.len().saturating_sub(turns)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_agent_type("Discovery"), Some(AgentType::Discovery));
        assert_eq!(
            parse_agent_type("IMAGE_GENERATION"),
            Some(AgentType::ImageGeneration)
        );
        assert_eq!(parse_agent_type("support"), Some(AgentType::Support));
    }

    #[test]
    fn test_parse_rejects_unknown_and_partial() {
        assert_eq!(parse_agent_type("search"), None);
        assert_eq!(parse_agent_type("disc"), None);
        assert_eq!(parse_agent_type(" discovery"), None);
        assert_eq!(parse_agent_type(""), None);
    }

    #[test]
    fn test_from_str_unknown_agent() {
        let err = "navigator".parse::<AgentType>().unwrap_err();
        assert!(matches!(err, Error::UnknownAgent(name) if name == "navigator"));
    }

    #[test]
    fn test_wire_value_matches_serde() {
        for agent in AgentType::ALL {
            let json = serde_json::to_value(agent).unwrap();
            assert_eq!(json, serde_json::Value::String(agent.as_str().to_string()));
        }
    }

    #[test]
    fn test_recent_turns_counts_entries() {
        let history: Vec<ConversationMessage> = (0..8)
            .map(|i| ConversationMessage::new("user", format!("turn-{i}")))
            .collect();
        let recent = recent_turns(&history, 3);
        let contents: Vec<_> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["turn-5", "turn-6", "turn-7"]);
        assert_eq!(recent_turns(&history, 20).len(), 8);
        assert!(recent_turns(&history, 0).is_empty());
        assert!(recent_turns(&[], 3).is_empty());
    }
}
