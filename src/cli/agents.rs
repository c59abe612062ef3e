//! `maestro agents`

use anyhow::Result;
use maestro_core::capabilities;

pub fn run() -> Result<()> {
    for cap in capabilities() {
        println!("{:<18} {}", cap.agent_type.as_str(), cap.display_name);
        println!("{:<18} {}", "", cap.description);
        if !cap.can_handoff_to.is_empty() {
            let targets: Vec<&str> = cap.can_handoff_to.iter().map(|a| a.as_str()).collect();
            println!("{:<18} hands off to: {}", "", targets.join(", "));
        }
        println!();
    }
    Ok(())
}
