//! CLI for the tikgrab video downloader.

mod commands;
mod session;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tikgrab_core::config::{self, TikgrabConfig};

use commands::{run_check, run_get, run_interactive};

/// Top-level CLI for the tikgrab video downloader.
#[derive(Debug, Parser)]
#[command(name = "tikgrab")]
#[command(about = "tikgrab: TikTok video downloader", long_about = None)]
pub struct Cli {
    /// With no subcommand, the interactive session starts.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start the interactive download session (the default).
    Run {
        /// Save downloads here instead of the configured directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Download a single video and exit.
    Get {
        /// TikTok page URL.
        url: String,

        /// Save the download here instead of the configured directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Check that the lookup service is reachable.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let command = cli
            .command
            .unwrap_or(CliCommand::Run { output_dir: None });

        match command {
            CliCommand::Run { output_dir } => run_interactive(&load_config(output_dir)?),
            CliCommand::Get { url, output_dir } => run_get(&load_config(output_dir)?, &url),
            CliCommand::Check => run_check(&load_config(None)?),
            CliCommand::Completions { shell } => {
                clap_complete::generate(shell, &mut Cli::command(), "tikgrab", &mut std::io::stdout());
                Ok(())
            }
        }
    }
}

fn load_config(output_dir: Option<PathBuf>) -> Result<TikgrabConfig> {
    let mut cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests;
