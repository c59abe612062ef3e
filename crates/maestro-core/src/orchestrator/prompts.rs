//! Prompt templates for planning and synthesis

use super::types::AgentResult;
use crate::agents::{describe_capabilities, display_name, recent_turns, ConversationMessage};
use std::fmt::Write as _;

pub(crate) const PLANNER_SYSTEM_PROMPT: &str = "You are the supervisor of a team of \
specialist AI agents. Decide which agent, or which short ordered sequence of agents, \
should handle the user's message. Reply with a single JSON object and nothing else.";

pub(crate) const SYNTHESIS_SYSTEM_PROMPT: &str = "You combine the work of several \
specialist agents into one clear, well-structured answer for the user. Do not mention \
the agents or the internal process. If a specialist reported an error, work around the \
missing part gracefully.";

/// Last `turns` entries, oldest first, one line per message
pub(crate) fn format_history(history: &[ConversationMessage], turns: usize) -> String {
    recent_turns(history, turns)
        .iter()
        .map(|m| {
            let who = if m.is_user() { "User" } else { "Assistant" };
            format!("{who}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn planning_prompt(user_message: &str, history: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Available agents:\n{}", describe_capabilities());
    if !history.is_empty() {
        let _ = writeln!(prompt, "Recent conversation:\n{history}\n");
    }
    let _ = writeln!(prompt, "User message: {user_message}\n");
    prompt.push_str(
        r#"Respond with JSON in exactly this shape:
{
  "analysis": "one or two sentences on what the user needs",
  "plan_type": "single" or "sequential",
  "agents": [
    {"agent": "<agent type>", "task": "what this agent should do", "depends_on": null or "why it needs the previous step"}
  ],
  "synthesis_needed": true or false,
  "synthesis_instructions": "how to merge the outputs, empty if not needed"
}

Rules:
- Prefer "single" with one agent whenever one agent can fully answer.
- Use "sequential" only when the request clearly has parts for different agents; at most 3 steps.
- Set synthesis_needed to true only when several agents each contribute part of the answer.
- Use "support" when nothing else fits."#,
    );
    prompt
}

pub(crate) fn synthesis_prompt(
    results: &[AgentResult],
    instructions: &str,
    original_query: &str,
) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "User request: {original_query}\n");
    let _ = writeln!(prompt, "Specialist outputs:\n");
    for result in results {
        let _ = writeln!(
            prompt,
            "### {}\n{}\n",
            display_name(result.agent),
            result.content
        );
    }
    if instructions.is_empty() {
        prompt.push_str("Combine these into a single coherent response to the user.");
    } else {
        let _ = write!(prompt, "Instructions: {instructions}");
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentType;

    #[test]
    fn test_format_history_keeps_last_turns() {
        let history: Vec<ConversationMessage> = (0..10)
            .map(|i| {
                let sender = if i % 2 == 0 { "user" } else { "assistant" };
                ConversationMessage::new(sender, format!("m{i}"))
            })
            .collect();
        let text = format_history(&history, 3);
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Assistant: m7"));
        assert!(text.ends_with("Assistant: m9"));
        assert!(format_history(&[], 3).is_empty());
    }

    #[test]
    fn test_planning_prompt_embeds_registry() {
        let prompt = planning_prompt("find projects", "User: hi");
        assert!(prompt.contains("- discovery (Discovery Agent)"));
        assert!(prompt.contains("Recent conversation:\nUser: hi"));
        assert!(prompt.contains("User message: find projects"));
        assert!(prompt.contains("\"plan_type\""));
    }

    #[test]
    fn test_synthesis_prompt_sections() {
        let results = vec![
            AgentResult::new(AgentType::Learning, "explain", "Agents act."),
            AgentResult::failed(AgentType::Discovery, "find", "timeout"),
        ];
        let prompt = synthesis_prompt(&results, "merge them", "teach and find");
        assert!(prompt.contains("### Learning Agent\nAgents act."));
        assert!(prompt.contains("### Discovery Agent\n[Error: timeout]"));
        assert!(prompt.ends_with("Instructions: merge them"));
    }
}
