//! Interactive-session tests driven through the generic I/O loop.
//!
//! None of these inputs reach the network: they only exercise commands and
//! the validator-rejected download path.

use crate::cli::session::InteractiveSession;
use std::io::{self, BufRead, Read};
use std::path::Path;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::pipeline::Pipeline;

fn test_session(dir: &Path) -> InteractiveSession {
    let cfg = TikgrabConfig {
        output_dir: dir.to_path_buf(),
        ..TikgrabConfig::default()
    };
    InteractiveSession::new(Pipeline::new(&cfg).expect("pipeline"))
}

fn run_session(input: &str) -> String {
    let scratch = tempfile::tempdir().unwrap();
    let session = test_session(scratch.path());
    let mut output = Vec::new();
    session
        .run_with_io(&mut input.as_bytes(), &mut output)
        .expect("session run");
    String::from_utf8(output).expect("utf8 output")
}

#[test]
fn help_then_exit_prints_usage_once_and_zero_tally() {
    let output = run_session("help\nexit\n");
    assert_eq!(output.matches("Commands:").count(), 1);
    assert!(output.contains("Total downloads: 0"));
}

#[test]
fn empty_input_reprompts_without_counting() {
    let output = run_session("\n\nexit\n");
    assert_eq!(output.matches("Enter a URL.").count(), 2);
    assert!(output.contains("Total downloads: 0"));
}

#[test]
fn rejected_url_reports_failure_and_loop_continues() {
    let output = run_session("https://example.com/not-tiktok\nexit\n");
    assert!(output.contains("Failed: not a valid TikTok URL"));
    assert!(output.contains("Total downloads: 0"));
}

#[test]
fn end_of_input_prints_tally() {
    let output = run_session("help\n");
    assert!(output.contains("Total downloads: 0"));
}

/// Reader that fails once, then yields the remaining canned input.
struct FaultyReader {
    faulted: bool,
    rest: io::Cursor<Vec<u8>>,
}

impl FaultyReader {
    fn new(rest: &str) -> Self {
        Self {
            faulted: false,
            rest: io::Cursor::new(rest.as_bytes().to_vec()),
        }
    }
}

impl Read for FaultyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.faulted {
            self.faulted = true;
            return Err(io::Error::new(io::ErrorKind::Other, "input device fault"));
        }
        self.rest.read(buf)
    }
}

impl BufRead for FaultyReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !self.faulted {
            self.faulted = true;
            return Err(io::Error::new(io::ErrorKind::Other, "input device fault"));
        }
        self.rest.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.rest.consume(amt)
    }
}

#[test]
fn unexpected_fault_with_decline_exits_with_tally() {
    let scratch = tempfile::tempdir().unwrap();
    let session = test_session(scratch.path());
    let mut input = FaultyReader::new("n\n");
    let mut output = Vec::new();
    session.run_with_io(&mut input, &mut output).expect("run");

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Continue? (y/n)"));
    assert!(output.contains("Total downloads: 0"));
}

#[test]
fn unexpected_fault_with_confirm_keeps_running() {
    let scratch = tempfile::tempdir().unwrap();
    let session = test_session(scratch.path());
    let mut input = FaultyReader::new("yes\nhelp\nexit\n");
    let mut output = Vec::new();
    session.run_with_io(&mut input, &mut output).expect("run");

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Continue? (y/n)"));
    assert_eq!(output.matches("Commands:").count(), 1);
    assert!(output.contains("Total downloads: 0"));
}
