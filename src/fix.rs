//! # Fix Policies
//!
//! A fix policy picks the branch whose `(mode, uid, gid)` is taken as
//! authoritative and writes it onto every branch path of the logical path.
//!
//! - **`NoOp`**: report only. Selected when `--fix` is not given.
//! - **`Manual`**: ask the operator for a branch index.
//! - **`Newest`**: the branch with the latest modification time.
//! - **`NonRoot`**: the first branch not owned by uid 0, falling back to
//!   `Newest` when every branch is owned by root.
//!
//! Branches are written one at a time. A failure on one branch is printed
//! and the remaining branches are still written; nothing is rolled back.

use crate::error::{Error, Result};
use crate::filesystem::BranchWriter;
use crate::metadata::MetadataRecord;
use crate::report;
use clap::ValueEnum;
use dialoguer::{theme::ColorfulTheme, Input};
use log::debug;
use std::io::{self, Write};
use std::num::IntErrorKind;
use std::path::PathBuf;

/// Conflict resolution strategy, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FixPolicy {
    #[default]
    #[value(skip)]
    NoOp,
    /// Ask which branch is correct
    Manual,
    /// Use the most recently modified branch
    Newest,
    /// Use the first branch not owned by root
    #[value(name = "nonroot")]
    NonRoot,
}

/// Source of operator answers for the manual policy.
pub trait Prompter {
    /// Show `message` and return the operator's answer.
    fn prompt(&mut self, message: &str) -> io::Result<String>;
}

/// Interactive prompt on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

/// Unwrap a dialoguer failure, keeping the `io::ErrorKind` that tells an
/// interrupted prompt apart.
fn prompt_error(err: dialoguer::Error) -> io::Error {
    match err {
        dialoguer::Error::IO(e) => e,
    }
}

/// Everything a policy may touch while applying a fix.
pub struct FixContext<'a> {
    pub writer: &'a mut dyn BranchWriter,
    pub prompter: &'a mut dyn Prompter,
    pub out: &'a mut dyn Write,
}

impl FixPolicy {
    pub fn is_noop(&self) -> bool {
        matches!(self, FixPolicy::NoOp)
    }

    /// Choose the authoritative record and apply it to every branch.
    ///
    /// Only output failures and operator interrupts are returned as errors.
    pub fn apply(
        &self,
        branches: &[PathBuf],
        records: &[MetadataRecord],
        ctx: &mut FixContext<'_>,
    ) -> Result<()> {
        let chosen = match self {
            FixPolicy::NoOp => None,
            FixPolicy::Manual => choose_manually(records.len(), ctx.prompter, ctx.out)?,
            FixPolicy::Newest => newest_index(records),
            FixPolicy::NonRoot => nonroot_index(records),
        };

        match chosen.and_then(|i| records.get(i)) {
            Some(record) => apply_record(record, branches, ctx.writer, ctx.out),
            None => Ok(()),
        }
    }
}

/// Index of the record with the latest mtime.
///
/// Ties go to the earliest record in branch order.
pub fn newest_index(records: &[MetadataRecord]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, record) in records.iter().enumerate() {
        match best {
            Some(b) if records[b].mtime >= record.mtime => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the first record not owned by root, else [`newest_index`].
pub fn nonroot_index(records: &[MetadataRecord]) -> Option<usize> {
    records
        .iter()
        .position(|r| r.uid != 0)
        .or_else(|| newest_index(records))
}

/// Ask the operator for a branch index in `0..count`.
///
/// Out-of-range answers are rejected and asked again. Anything that is not
/// an integer, or a prompt failure, gives up on this path. An interrupted
/// prompt ends the run.
pub fn choose_manually(
    count: usize,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<usize>> {
    if count == 0 {
        return Ok(None);
    }
    let last = count - 1;
    let message = format!("Which is correct?: [0-{}]", last);

    loop {
        let answer = match prompter.prompt(&message) {
            Ok(answer) => answer,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Err(Error::Interrupted),
            Err(e) => {
                debug!("Abandoning manual fix, prompt failed: {}", e);
                return Ok(None);
            }
        };

        let in_range = match answer.trim().parse::<i64>() {
            Ok(value) => usize::try_from(value).ok().filter(|v| *v < count),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                None
            }
            Err(e) => {
                debug!("Abandoning manual fix, invalid answer {:?}: {}", answer, e);
                return Ok(None);
            }
        };

        match in_range {
            Some(index) => return Ok(Some(index)),
            None => writeln!(out, "Input error: enter a value [0-{}]", last).map_err(Error::Output)?,
        }
    }
}

/// Write `record`'s mode, then owner, onto each branch path.
///
/// A symlink record has no permission bits of its own, so only its owner is
/// written.
pub fn apply_record(
    record: &MetadataRecord,
    branches: &[PathBuf],
    writer: &mut dyn BranchWriter,
    out: &mut dyn Write,
) -> Result<()> {
    for path in branches {
        let mode = if record.is_symlink() {
            Ok(())
        } else {
            writer.set_mode(path, record.mode)
        };
        let result = mode.and_then(|()| writer.set_owner(path, record.uid, record.gid));

        let written = match result {
            Ok(()) => report::write_applied(out, path, record),
            Err(e) => report::write_apply_failure(out, path, &e),
        };
        written.map_err(Error::Output)?;
    }
    Ok(())
}
