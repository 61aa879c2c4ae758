//! # Error Handling
//!
//! This module defines the centralized error type for `mergerfs-fsck`. It
//! uses the `thiserror` library to describe every failure the audit engine
//! can surface, with enough context (the offending path, the attribute name)
//! to print a useful message.
//!
//! ## Propagation
//!
//! Errors fall into two groups:
//!
//! - **Per-path errors** (`Attribute`, `Metadata`, `Walk`): the audit of one
//!   logical path failed. The [`Auditor`](crate::audit::Auditor) logs them and
//!   moves on to the next path.
//! - **Run-ending errors** (`Output`, `Interrupted`): stdout went away or the
//!   operator interrupted the run. These stop the walk and are mapped to a
//!   clean exit by the binary.
//!
//! Failures to *apply* a fix never show up here. They are printed next to the
//! branch they concern and the fix moves on to the next branch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mergerfs-fsck operations
#[derive(Error, Debug)]
pub enum Error {
    /// Reading an extended attribute failed for a reason other than the
    /// attribute being absent.
    #[error("Failed to read attribute {name} on {}: {source}", path.display())]
    Attribute {
        path: PathBuf,
        name: String,
        #[source]
        source: io::Error,
    },

    /// `lstat` on a branch path failed.
    #[error("Failed to stat branch path {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory walk could not read an entry.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Writing the report failed, usually because stdout was closed.
    #[error("Output error: {0}")]
    Output(#[source] io::Error),

    /// The operator interrupted the run.
    #[error("Interrupted")]
    Interrupted,

    /// The starting directory is not inside a mergerfs mount.
    #[error("{} is not a mergerfs mount", path.display())]
    NotMergerfs { path: PathBuf },
}

impl Error {
    /// Whether this error only concerns the logical path being audited.
    ///
    /// The walk continues after these; anything else ends the run.
    pub fn is_per_path(&self) -> bool {
        matches!(
            self,
            Error::Attribute { .. } | Error::Metadata { .. } | Error::Walk(_)
        )
    }

    /// Whether this error is an orderly end of the run rather than a failure.
    ///
    /// Covers operator interrupts and a closed stdout (`EPIPE`).
    pub fn is_benign_termination(&self) -> bool {
        match self {
            Error::Interrupted => true,
            Error::Output(e) => e.kind() == io::ErrorKind::BrokenPipe,
            _ => false,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
