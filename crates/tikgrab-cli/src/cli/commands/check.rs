//! `tikgrab check` – probe the lookup service endpoint.

use anyhow::Result;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::lookup::LookupClient;

pub fn run_check(cfg: &TikgrabConfig) -> Result<()> {
    if LookupClient::new(cfg).check_connection() {
        println!("Lookup service reachable.");
        Ok(())
    } else {
        anyhow::bail!("lookup service is unreachable")
    }
}
