//! # Audit Command Implementation
//!
//! Walks a directory inside a mergerfs mount and reports every logical path
//! whose branch copies disagree on mode, owner or group.
//!
//! ## Functionality
//!
//! - **Report**: by default only the divergent logical paths are printed.
//!   `--verbose` adds the per-branch metadata.
//! - **Size filter**: `--size` limits the audit to paths whose branch copies
//!   all have the same size.
//! - **Fix**: `--fix manual|newest|nonroot` picks an authoritative branch
//!   and writes its metadata onto the others. Selecting a fix turns on
//!   verbose output.
//!
//! Ctrl-C stops the walk after the current path; a second Ctrl-C exits
//! immediately. Both count as a normal exit.

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info};
use signal_hook::consts::SIGINT;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use mergerfs_fsck::audit::{AuditConfig, Auditor};
use mergerfs_fsck::defaults::FIX_ENV;
use mergerfs_fsck::error::Error;
use mergerfs_fsck::filesystem::SystemWriter;
use mergerfs_fsck::fix::{FixPolicy, TerminalPrompter};
use mergerfs_fsck::output::OutputConfig;
use mergerfs_fsck::xattr::SystemAttributes;

/// Exit code when the starting directory is not a mergerfs mount.
const EXIT_NOT_MERGERFS: u8 = 1;

/// Audit a mergerfs mount for inconsistencies
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Starting directory inside the mergerfs mount
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Print details of differences
    #[arg(short, long)]
    pub verbose: bool,

    /// Only consider paths whose branch copies have the same size
    #[arg(short, long)]
    pub size: bool,

    /// Fix policy to apply to divergent paths
    #[arg(short, long, value_enum, value_name = "POLICY", env = FIX_ENV)]
    pub fix: Option<FixPolicy>,
}

impl AuditArgs {
    fn config(&self) -> AuditConfig {
        AuditConfig::new(self.verbose, self.size, self.fix.unwrap_or_default())
    }
}

/// Execute the audit.
pub fn execute(args: AuditArgs, output: OutputConfig) -> Result<ExitCode> {
    let root = std::fs::canonicalize(&args.dir)
        .with_context(|| format!("Failed to resolve {}", args.dir.display()))?;
    let config = args.config();
    debug!("Auditing {} with {:?}", root.display(), config);

    let interrupt = install_interrupt_handler().context("Failed to install SIGINT handler")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut writer = SystemWriter;
    let mut prompter = TerminalPrompter::new();

    let result = Auditor::new(config, SystemAttributes, &mut writer, &mut prompter, &mut out)
        .with_output(output)
        .with_interrupt(interrupt)
        .run(&root);

    match result {
        Ok(summary) => {
            info!(
                "Audited {} paths: {} divergent, {} errors{}",
                summary.visited,
                summary.divergent,
                summary.errors,
                if summary.interrupted { " (interrupted)" } else { "" }
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ Error::NotMergerfs { .. }) => {
            eprintln!("{}", e);
            Ok(ExitCode::from(EXIT_NOT_MERGERFS))
        }
        Err(e) if e.is_benign_termination() => {
            debug!("Audit ended early: {}", e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e.into()),
    }
}

/// The first SIGINT raises the returned flag; a second one exits with status 0.
fn install_interrupt_handler() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    // Registered first so it sees the flag as it was before this signal.
    signal_hook::flag::register_conditional_shutdown(SIGINT, 0, Arc::clone(&flag))?;
    signal_hook::flag::register(SIGINT, Arc::clone(&flag))?;
    Ok(flag)
}
