//! `maestro plan`

use super::{build_orchestrator, MessageArgs};
use crate::settings::Settings;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: MessageArgs,
}

pub async fn run(args: PlanArgs, settings: &Settings) -> Result<()> {
    let orchestrator = build_orchestrator(settings)?;
    let history = args.input.load_history()?;

    let plan = orchestrator.plan(&args.input.message, &history).await;
    println!("{}", serde_json::to_string_pretty(&plan.to_json())?);
    Ok(())
}
