//! # dupfind CLI
//!
//! Command-line interface for building checksum indexes and finding
//! duplicates against them.
//!
//! ## Usage
//! ```bash
//! dupfind build ~/Archive archive.json
//! dupfind find ~/Downloads archive.json --short
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
