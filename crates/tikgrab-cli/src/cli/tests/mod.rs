//! Tests for CLI parsing and the interactive session.

mod session_io;

use clap::Parser;

use super::{Cli, CliCommand};

/// Parse helper: argv → optional subcommand (panics on parse error).
fn parse(args: &[&str]) -> Option<CliCommand> {
    Cli::try_parse_from(args).expect("args should parse").command
}
