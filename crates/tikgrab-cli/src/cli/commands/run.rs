//! `tikgrab run` – connectivity gate, then the interactive session.

use crate::cli::session::InteractiveSession;
use anyhow::Result;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::pipeline::Pipeline;

pub fn run_interactive(cfg: &TikgrabConfig) -> Result<()> {
    let pipeline = Pipeline::new(cfg)?;

    println!("Checking lookup service...");
    if !pipeline.check_connection() {
        anyhow::bail!("lookup service is unreachable; try again later");
    }
    println!("Lookup service reachable.");

    InteractiveSession::new(pipeline).run()
}
