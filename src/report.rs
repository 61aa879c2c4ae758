//! Human-readable audit output.
//!
//! Every line goes through a caller-supplied writer so a closed stdout
//! surfaces as an `io::Error` instead of a panic.

use crate::metadata::MetadataRecord;
use crate::output::OutputConfig;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const SIZE_UNITS: [&str; 8] = ["B", "K", "M", "G", "T", "P", "E", "Z"];

/// Format a byte count with a binary unit suffix, e.g. `1.5K`.
pub fn human_size(bytes: u64) -> String {
    let mut num = bytes as f64;
    for unit in SIZE_UNITS {
        if num < 1024.0 {
            return format!("{:3.1}{}", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1}Y", num)
}

/// The per-branch metadata line shown in verbose output.
pub fn format_record(record: &MetadataRecord) -> String {
    format!(
        "   - uid: {:5}; gid: {:5}; mode: {:6o}; size: {}; mtime: {}",
        record.uid,
        record.gid,
        record.mode,
        human_size(record.size),
        record.mtime
    )
}

/// Print the numbered branch list with metadata.
pub fn write_branches<W: Write + ?Sized>(
    out: &mut W,
    branches: &[PathBuf],
    records: &[MetadataRecord],
) -> io::Result<()> {
    for (i, (path, record)) in branches.iter().zip(records).enumerate() {
        writeln!(out, "  {}: {}", i, path.display())?;
        writeln!(out, "{}", format_record(record))?;
    }
    Ok(())
}

/// Print a divergent logical path, with branch details when `verbose`.
pub fn write_divergence<W: Write + ?Sized>(
    out: &mut W,
    output: &OutputConfig,
    logical: &Path,
    branches: &[PathBuf],
    records: &[MetadataRecord],
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "{}", output.heading(&logical.display().to_string()))?;
    if verbose {
        write_branches(out, branches, records)?;
    }
    Ok(())
}

/// Report that `record`'s ownership and mode were applied to `path`.
pub fn write_applied<W: Write + ?Sized>(
    out: &mut W,
    path: &Path,
    record: &MetadataRecord,
) -> io::Result<()> {
    writeln!(
        out,
        "setting {} > uid: {}; gid: {}; mode: {:o}",
        path.display(),
        record.uid,
        record.gid,
        record.mode
    )
}

/// Report a failed fix on a single branch path.
pub fn write_apply_failure<W: Write + ?Sized>(
    out: &mut W,
    path: &Path,
    err: &io::Error,
) -> io::Result<()> {
    writeln!(out, "failed to set {}: {}", path.display(), err)
}
