//! Per-branch metadata collection.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// File type bits of `st_mode`.
const FILE_TYPE_MASK: u32 = 0o170000;
const SYMLINK_TYPE: u32 = 0o120000;

/// Modification time as reported by `lstat`, ordered by seconds then
/// nanoseconds.
///
/// This is the raw `(st_mtime, st_mtime_nsec)` pair: `nanos` is always in
/// `0..1_000_000_000` and counts forward from `secs`, so -0.5s is stored and
/// displayed as `-1.500000000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mtime {
    pub secs: i64,
    pub nanos: i64,
}

impl Mtime {
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }
}

impl fmt::Display for Mtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// The metadata audited for one branch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRecord {
    pub uid: u32,
    pub gid: u32,
    /// Full `st_mode`, file type bits included.
    pub mode: u32,
    pub size: u64,
    pub mtime: Mtime,
}

impl MetadataRecord {
    /// The fields that decide whether branches diverge.
    pub fn ownership(&self) -> (u32, u32, u32) {
        (self.mode, self.uid, self.gid)
    }

    /// Whether the branch path is itself a symlink.
    pub fn is_symlink(&self) -> bool {
        self.mode & FILE_TYPE_MASK == SYMLINK_TYPE
    }
}

impl From<&fs::Metadata> for MetadataRecord {
    fn from(meta: &fs::Metadata) -> Self {
        Self {
            uid: meta.uid(),
            gid: meta.gid(),
            mode: meta.mode(),
            size: meta.size(),
            mtime: Mtime::new(meta.mtime(), meta.mtime_nsec()),
        }
    }
}

/// `lstat` a single branch path.
pub fn stat_branch(path: &Path) -> Result<MetadataRecord> {
    fs::symlink_metadata(path)
        .map(|meta| MetadataRecord::from(&meta))
        .map_err(|source| Error::Metadata {
            path: path.to_path_buf(),
            source,
        })
}

/// Collect one record per branch path, in the same order.
///
/// The first branch that cannot be stat'ed aborts the collection.
pub fn collect(branches: &[PathBuf]) -> Result<Vec<MetadataRecord>> {
    branches.iter().map(|path| stat_branch(path)).collect()
}
