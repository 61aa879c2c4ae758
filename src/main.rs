//! # mergerfs-fsck CLI
//!
//! This is the binary entry point for the `mergerfs-fsck` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the audit with the parsed configuration.
//! - Mapping the outcome onto a process exit code: `0` on completion
//!   (including an interrupt or a closed stdout), `1` when the starting
//!   directory is not a mergerfs mount or another error occurred, `2` for
//!   invalid usage (reported by `clap`).
//!
//! The audit engine lives in the `mergerfs_fsck` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
