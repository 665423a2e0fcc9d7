//! Interactive download session: one operator command per iteration.
//!
//! States: prompt → (download | help | exit) → prompt. An interrupt prints
//! the running tally and leaves; an unexpected iteration fault asks the
//! operator whether to continue.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tikgrab_core::pipeline::Pipeline;

const PROMPT: &str = "\ntiktok url >>> ";

const USAGE: &str = "Commands:
  <tiktok-url>  resolve and download the video
  help          show this text
  exit          quit and print the tally";

/// What a line of operator input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Help,
    Empty,
    Download(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if trimmed.eq_ignore_ascii_case("exit") {
        return Command::Exit;
    }
    if trimmed.eq_ignore_ascii_case("help") {
        return Command::Help;
    }
    Command::Download(trimmed)
}

enum LoopControl {
    Continue,
    Stop,
}

/// Interactive loop around the resolution pipeline. Tracks a running count
/// of successful downloads for the final tally.
pub struct InteractiveSession {
    pipeline: Pipeline,
    downloads: Arc<AtomicU64>,
}

impl InteractiveSession {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            downloads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run against stdin/stdout until `exit`, end of input, or interrupt.
    pub fn run(&self) -> Result<()> {
        // Operator interrupt is a graceful shutdown, not a fault.
        let downloads = Arc::clone(&self.downloads);
        ctrlc::set_handler(move || {
            println!(
                "\n\nInterrupted. Total downloads: {}",
                downloads.load(Ordering::Relaxed)
            );
            std::process::exit(0);
        })?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with_io(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Loop body, generic over I/O so tests can drive it.
    pub fn run_with_io<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        writeln!(output, "tikgrab interactive session")?;
        writeln!(
            output,
            "Paste a TikTok video URL to download it, or type 'help'."
        )?;
        writeln!(output, "Saving to: {}", self.pipeline.output_dir().display())?;

        loop {
            match self.iteration(input, output) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Stop) => break,
                Err(err) => {
                    // The only operator-confirmed abort path: report the
                    // fault and ask whether to keep going.
                    writeln!(output, "Error: {err:#}")?;
                    write!(output, "Continue? (y/n) >>> ")?;
                    output.flush()?;
                    let mut answer = String::new();
                    if input.read_line(&mut answer)? == 0 {
                        break;
                    }
                    let answer = answer.trim().to_lowercase();
                    if answer != "y" && answer != "yes" {
                        break;
                    }
                }
            }
        }

        writeln!(
            output,
            "\nTotal downloads: {}",
            self.downloads.load(Ordering::Relaxed)
        )?;
        Ok(())
    }

    fn iteration<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<LoopControl> {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input is the same goodbye as `exit`.
            return Ok(LoopControl::Stop);
        }

        match parse_command(&line) {
            Command::Exit => Ok(LoopControl::Stop),
            Command::Help => {
                writeln!(output, "{USAGE}")?;
                Ok(LoopControl::Continue)
            }
            Command::Empty => {
                writeln!(output, "Enter a URL.")?;
                Ok(LoopControl::Continue)
            }
            Command::Download(url) => {
                match self.pipeline.process(url) {
                    Ok(outcome) => {
                        self.downloads.fetch_add(1, Ordering::Relaxed);
                        writeln!(
                            output,
                            "Saved {} ({:.2} MB)",
                            outcome.path.display(),
                            outcome.bytes as f64 / (1024.0 * 1024.0)
                        )?;
                    }
                    Err(failure) => {
                        writeln!(output, "Failed: {failure}")?;
                    }
                }
                Ok(LoopControl::Continue)
            }
        }
    }
}
