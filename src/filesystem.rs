//! Branch metadata mutation.
//!
//! Fix policies never touch the filesystem directly; they go through
//! [`BranchWriter`], so the policies can be exercised without root.

use crate::defaults::PERMISSION_BITS;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Writes ownership and permission metadata onto a branch path.
pub trait BranchWriter {
    /// Set the permission bits of `path`. File type bits in `mode` are ignored.
    ///
    /// Symlinks are not followed; a symlink at `path` is an error.
    fn set_mode(&mut self, path: &Path, mode: u32) -> io::Result<()>;

    /// Set the owner and group of `path` without following symlinks.
    fn set_owner(&mut self, path: &Path, uid: u32, gid: u32) -> io::Result<()>;
}

/// Applies changes to the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWriter;

impl BranchWriter for SystemWriter {
    fn set_mode(&mut self, path: &Path, mode: u32) -> io::Result<()> {
        // chmod(2) always resolves the link, and Linux has no mode on the link itself.
        if fs::symlink_metadata(path)?.file_type().is_symlink() {
            return Err(io::Error::from_raw_os_error(libc::EOPNOTSUPP));
        }
        fs::set_permissions(path, fs::Permissions::from_mode(mode & PERMISSION_BITS))
    }

    fn set_owner(&mut self, path: &Path, uid: u32, gid: u32) -> io::Result<()> {
        std::os::unix::fs::lchown(path, Some(uid), Some(gid))
    }
}
