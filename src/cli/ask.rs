//! `maestro ask`

use super::{build_orchestrator, MessageArgs};
use crate::settings::Settings;
use anyhow::{bail, Result};
use clap::Args;
use futures::StreamExt;
use maestro_core::{OrchestrationEvent, OrchestrationRequest};
use std::io::Write;

#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub input: MessageArgs,
    /// Continue an existing session
    #[arg(long)]
    pub session: Option<String>,
    /// Platform user id
    #[arg(long)]
    pub user_id: Option<String>,
    /// Display name
    #[arg(long)]
    pub username: Option<String>,
    /// Print raw events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AskArgs, settings: &Settings) -> Result<()> {
    let orchestrator = build_orchestrator(settings)?;
    let history = args.input.load_history()?;

    let mut request = OrchestrationRequest::new(args.input.message).with_history(history);
    if let Some(session) = args.session {
        request = request.with_session(session);
    }
    request.user_id = args.user_id;
    request.username = args.username;

    let mut events = orchestrator.orchestrate(request);
    let mut stdout = std::io::stdout();
    let mut failure = None;

    while let Some(event) = events.next().await {
        if args.json {
            writeln!(stdout, "{}", serde_json::to_string(&event)?)?;
            if let OrchestrationEvent::Error { message } = event {
                failure = Some(message);
            }
            continue;
        }

        match event {
            OrchestrationEvent::Token { content } => {
                write!(stdout, "{content}")?;
                stdout.flush()?;
            }
            OrchestrationEvent::OrchestrationStart { message }
            | OrchestrationEvent::SynthesisStart { message } => eprintln!("{message}"),
            OrchestrationEvent::AgentStep {
                step,
                total,
                agent,
                task,
            } => eprintln!("[{step}/{total}] {agent}: {task}"),
            OrchestrationEvent::AgentError { agent, error } => eprintln!("[{agent}] {error}"),
            OrchestrationEvent::ToolStart { tool } => eprintln!("  using {tool}..."),
            OrchestrationEvent::ToolEnd { tool } => eprintln!("  {tool} done"),
            OrchestrationEvent::RouteToImageGeneration { message } => {
                eprintln!("Image generation requested: {message}");
            }
            OrchestrationEvent::Complete { session_id } => {
                writeln!(stdout)?;
                eprintln!("session: {session_id}");
            }
            OrchestrationEvent::Error { message } => {
                writeln!(stdout)?;
                failure = Some(message);
            }
        }
    }

    match failure {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}
