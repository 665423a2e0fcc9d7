use tikgrab_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging if the state dir is usable, stderr otherwise.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("tikgrab error: {:#}", err);
        std::process::exit(1);
    }
}
