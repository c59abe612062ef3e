//! Capability registry
//!
//! A fixed, ordered table. Order matters: keyword fallback routing keeps the
//! first capability on ties, so `support` is declared first.

use super::types::AgentType;
use std::fmt::Write as _;

/// Declarative description of one agent type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentCapability {
    /// Agent this entry describes
    pub agent_type: AgentType,
    /// Human-readable name
    pub display_name: &'static str,
    /// What the agent is good at (shown to the planner)
    pub description: &'static str,
    /// Declared follow-up agents. Informational only, never enforced.
    pub can_handoff_to: &'static [AgentType],
    /// Lowercase routing keywords for the fallback router
    pub keywords: &'static [&'static str],
}

static CAPABILITIES: [AgentCapability; 7] = [
    AgentCapability {
        agent_type: AgentType::Support,
        display_name: "Support Agent",
        description: "General help, account questions, platform how-tos and anything \
                      no specialist covers",
        can_handoff_to: &[
            AgentType::Discovery,
            AgentType::Learning,
            AgentType::Project,
            AgentType::ImageGeneration,
        ],
        keywords: &[
            "help", "support", "account", "problem", "issue", "bug", "settings", "how do i",
        ],
    },
    AgentCapability {
        agent_type: AgentType::Discovery,
        display_name: "Discovery Agent",
        description: "Searches and recommends projects, creators and tools; finds trending \
                      and similar work",
        can_handoff_to: &[
            AgentType::Learning,
            AgentType::Project,
            AgentType::ImageGeneration,
        ],
        keywords: &[
            "find", "search", "discover", "explore", "recommend", "trending", "projects",
            "browse", "similar", "show me",
        ],
    },
    AgentCapability {
        agent_type: AgentType::Learning,
        display_name: "Learning Agent",
        description: "Explains concepts, tutors, builds learning paths and quizzes",
        can_handoff_to: &[
            AgentType::Discovery,
            AgentType::Project,
            AgentType::ImageGeneration,
        ],
        keywords: &[
            "learn", "teach", "explain", "understand", "tutorial", "course", "lesson", "quiz",
            "what is", "how does",
        ],
    },
    AgentCapability {
        agent_type: AgentType::Project,
        display_name: "Project Agent",
        description: "Imports repositories and creates or updates the user's own projects",
        can_handoff_to: &[AgentType::Discovery, AgentType::Learning],
        keywords: &[
            "import", "github", "repository", "repo", "upload", "portfolio", "my project",
            "create project",
        ],
    },
    AgentCapability {
        agent_type: AgentType::ImageGeneration,
        display_name: "Image Generation Agent",
        description: "Creates images, infographics, illustrations and logos",
        can_handoff_to: &[AgentType::Discovery, AgentType::Project],
        keywords: &[
            "image", "draw", "picture", "infographic", "illustration", "logo", "visual",
            "generate an image",
        ],
    },
    AgentCapability {
        agent_type: AgentType::Orchestration,
        display_name: "Navigation Agent",
        description: "Navigates the site and walks the user through multi-page actions",
        can_handoff_to: &[
            AgentType::Discovery,
            AgentType::Learning,
            AgentType::Project,
            AgentType::ImageGeneration,
            AgentType::Support,
        ],
        keywords: &["navigate", "go to", "take me", "where is", "open the", "page"],
    },
    AgentCapability {
        agent_type: AgentType::Unified,
        display_name: "Unified Agent",
        description: "Generalist with access to every tool; used for broad requests",
        can_handoff_to: &[],
        keywords: &[],
    },
];

/// The registry, in declaration order
pub fn capabilities() -> &'static [AgentCapability] {
    &CAPABILITIES
}

/// Registry entry for an agent type
pub fn capability(agent_type: AgentType) -> Option<&'static AgentCapability> {
    CAPABILITIES.iter().find(|c| c.agent_type == agent_type)
}

/// Human-readable name for an agent type
pub fn display_name(agent_type: AgentType) -> &'static str {
    capability(agent_type)
        .map(|c| c.display_name)
        .unwrap_or_else(|| agent_type.as_str())
}

/// Declared handoff targets (not enforced by the executor)
pub fn handoff_targets(agent_type: AgentType) -> &'static [AgentType] {
    capability(agent_type)
        .map(|c| c.can_handoff_to)
        .unwrap_or(&[])
}

/// Multi-line description of every capability, for the planning prompt
pub fn describe_capabilities() -> String {
    let mut out = String::new();
    for cap in capabilities() {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            cap.agent_type, cap.display_name, cap.description
        );
        if !cap.keywords.is_empty() {
            let _ = writeln!(out, "  Keywords: {}", cap.keywords.join(", "));
        }
        if !cap.can_handoff_to.is_empty() {
            let targets: Vec<&str> = cap.can_handoff_to.iter().map(|a| a.as_str()).collect();
            let _ = writeln!(out, "  Can hand off to: {}", targets.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_agent_type_has_one_entry() {
        let declared: HashSet<AgentType> = capabilities().iter().map(|c| c.agent_type).collect();
        assert_eq!(declared.len(), capabilities().len());
        for agent in AgentType::ALL {
            assert!(capability(agent).is_some(), "missing {agent}");
        }
    }

    #[test]
    fn test_support_is_declared_first() {
        assert_eq!(capabilities()[0].agent_type, AgentType::Support);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for cap in capabilities() {
            for keyword in cap.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_describe_capabilities_lists_all() {
        let text = describe_capabilities();
        for agent in AgentType::ALL {
            assert!(text.contains(&format!("- {agent} (")));
        }
        assert!(text.contains("Keywords: find, search"));
    }

    #[test]
    fn test_handoff_targets() {
        assert!(handoff_targets(AgentType::Discovery).contains(&AgentType::Learning));
        assert!(handoff_targets(AgentType::Unified).is_empty());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(AgentType::Learning), "Learning Agent");
        assert_eq!(display_name(AgentType::Orchestration), "Navigation Agent");
    }
}
