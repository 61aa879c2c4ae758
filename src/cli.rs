//! CLI argument parsing and logging setup

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use mergerfs_fsck::defaults::DEFAULT_LOG_LEVEL;
use mergerfs_fsck::output::{ColorChoice, OutputConfig};

use crate::commands;

/// mergerfs-fsck - Audit a mergerfs mount for inconsistencies between branches
#[derive(Parser, Debug)]
#[command(name = "mergerfs-fsck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    audit: commands::audit::AuditArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

impl Cli {
    /// Execute the audit
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);
        commands::audit::execute(self.audit, OutputConfig::new(self.color))
    }
}

/// Install the stderr logger. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
