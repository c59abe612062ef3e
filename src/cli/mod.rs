//! CLI module for Maestro
//!
//! Commands:
//! - `ask`: orchestrate one message and stream the answer
//! - `plan`: show the plan the supervisor would run
//! - `agents`: list the capability registry

use crate::providers::build_provider;
use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use maestro_core::{ConversationMessage, Orchestrator};
use std::path::{Path, PathBuf};

pub mod agents;
pub mod ask;
pub mod plan;

/// Maestro multi-agent orchestrator CLI
#[derive(Parser, Debug)]
#[command(name = "maestro")]
#[command(about = "Multi-agent chat orchestrator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Orchestrate a message and stream the answer
    Ask(ask::AskArgs),
    /// Show the plan for a message without running it
    Plan(plan::PlanArgs),
    /// List available agents
    Agents,
}

/// Conversation input shared by `ask` and `plan`
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// The user message
    pub message: String,
    /// JSON file with prior turns: [{"sender": "user", "content": "..."}]
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl MessageArgs {
    fn load_history(&self) -> Result<Vec<ConversationMessage>> {
        match &self.history {
            Some(path) => read_history(path),
            None => Ok(Vec::new()),
        }
    }
}

fn read_history(path: &Path) -> Result<Vec<ConversationMessage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("History file {} is not a JSON message list", path.display()))
}

fn build_orchestrator(settings: &Settings) -> Result<Orchestrator> {
    settings
        .orchestrator
        .validate()
        .context("Invalid [orchestrator] settings")?;
    let provider = build_provider(&settings.llm)?;
    Ok(Orchestrator::new(provider, settings.orchestrator.clone()))
}

/// Run the CLI command
pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Some(Commands::Ask(args)) => ask::run(args, &settings).await,
        Some(Commands::Plan(args)) => plan::run(args, &settings).await,
        Some(Commands::Agents) => agents::run(),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "maestro", "ask", "Find projects", "--session", "s1", "--json",
        ])
        .unwrap();
        let Some(Commands::Ask(args)) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.input.message, "Find projects");
        assert_eq!(args.session.as_deref(), Some("s1"));
        assert!(args.json);
    }

    #[test]
    fn test_parse_plan_with_history() {
        let cli = Cli::try_parse_from(["maestro", "plan", "hi", "--history", "h.json"]).unwrap();
        let Some(Commands::Plan(args)) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.input.history, Some(PathBuf::from("h.json")));
    }

    #[test]
    fn test_read_history() {
        let path = std::env::temp_dir().join(format!("maestro-history-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"sender": "user", "content": "hi"}, {"sender": "assistant", "content": "hello"}]"#,
        )
        .unwrap();
        let history = read_history(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].is_user());

        assert!(read_history(Path::new("/nonexistent/history.json")).is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let mut settings = Settings::default();
        settings.llm.provider = "carrier-pigeon".to_string();
        let err = build_orchestrator(&settings).unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
