//! `tikgrab get <url>` – download a single video and exit.

use anyhow::Result;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::pipeline::Pipeline;

pub fn run_get(cfg: &TikgrabConfig, url: &str) -> Result<()> {
    let pipeline = Pipeline::new(cfg)?;
    match pipeline.process(url) {
        Ok(outcome) => {
            println!("Saved {} ({} bytes)", outcome.path.display(), outcome.bytes);
            Ok(())
        }
        Err(failure) => anyhow::bail!("{failure}"),
    }
}
