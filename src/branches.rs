//! Branch resolution.
//!
//! Maps a logical path inside the mount to the real paths that back it on
//! each branch, using the `user.mergerfs.allpaths` attribute.

use crate::defaults::{ALLPATHS_XATTR, FULLPATH_XATTR};
use crate::error::{Error, Result};
use crate::xattr::AttributeChannel;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Resolves logical paths to branch paths through an attribute channel.
#[derive(Debug, Clone)]
pub struct BranchResolver<A> {
    attributes: A,
}

impl<A: AttributeChannel> BranchResolver<A> {
    pub fn new(attributes: A) -> Self {
        Self { attributes }
    }

    /// Return the branch paths backing `logical`, in branch priority order.
    ///
    /// An absent attribute yields an empty list. Any other read failure is an
    /// [`Error::Attribute`].
    pub fn resolve(&self, logical: &Path) -> Result<Vec<PathBuf>> {
        match self.attributes.read(logical, ALLPATHS_XATTR) {
            Ok(Some(raw)) => Ok(split_branch_list(&raw)),
            Ok(None) => Ok(Vec::new()),
            Err(source) => Err(Error::Attribute {
                path: logical.to_path_buf(),
                name: ALLPATHS_XATTR.to_string(),
                source,
            }),
        }
    }

    /// Whether `path` lives inside a mergerfs mount.
    pub fn is_mergerfs(&self, path: &Path) -> bool {
        self.attributes.has(path, FULLPATH_XATTR)
    }
}

/// Split a NUL-separated branch list into paths.
///
/// Path bytes are kept exactly as returned, including non-UTF-8 sequences.
/// Empty segments (a trailing NUL, for instance) are dropped.
pub fn split_branch_list(raw: &[u8]) -> Vec<PathBuf> {
    raw.split(|b| *b == 0)
        .filter(|segment| !segment.is_empty())
        .map(|segment| PathBuf::from(OsStr::from_bytes(segment)))
        .collect()
}
