//! # Extended Attribute Channel
//!
//! mergerfs exposes its internal view of a file through a handful of
//! `user.mergerfs.*` extended attributes. This module hides the platform
//! mechanism behind the narrow [`AttributeChannel`] trait so the audit logic
//! can run against a real mount or against [`MemoryAttributes`] in tests.
//!
//! ## Design
//!
//! - **`SystemAttributes`**: reads attributes through the `xattr` crate
//!   (`lgetxattr(2)` on Linux). Symlinks are not followed, matching the
//!   `lstat` used for branch metadata.
//! - **`MemoryAttributes`**: a map of `(path, name) -> value`, with optional
//!   injected failures for exercising error paths.
//!
//! An absent attribute (`ENODATA`) is reported as `Ok(None)`, never as an
//! error. Every other errno is surfaced to the caller unchanged.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Read access to extended attributes.
pub trait AttributeChannel {
    /// Read the attribute `name` on `path` without following symlinks.
    ///
    /// Returns `Ok(None)` when the attribute does not exist.
    fn read(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Whether `name` can be read on `path`.
    ///
    /// The value is ignored, and so is the reason a read failed: anything but
    /// a successful read counts as "not present".
    fn has(&self, path: &Path, name: &str) -> bool {
        matches!(self.read(path, name), Ok(Some(_)))
    }
}

impl<T: AttributeChannel + ?Sized> AttributeChannel for &T {
    fn read(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).read(path, name)
    }

    fn has(&self, path: &Path, name: &str) -> bool {
        (**self).has(path, name)
    }
}

/// The host's extended attribute implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAttributes;

impl AttributeChannel for SystemAttributes {
    fn read(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        // `xattr::get` is the non-following variant; `ENODATA` comes back as `None`.
        ::xattr::get(path, name)
    }
}

/// In-memory attribute store.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttributes {
    values: HashMap<(PathBuf, String), Vec<u8>>,
    failures: HashMap<PathBuf, i32>,
}

impl MemoryAttributes {
    /// Create an empty store in which every attribute is absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw value of `name` on `path`.
    pub fn set<P: AsRef<Path>>(&mut self, path: P, name: &str, value: impl Into<Vec<u8>>) {
        self.values
            .insert((path.as_ref().to_path_buf(), name.to_string()), value.into());
    }

    /// Make every read on `path` fail with `errno`.
    pub fn fail<P: AsRef<Path>>(&mut self, path: P, errno: i32) {
        self.failures.insert(path.as_ref().to_path_buf(), errno);
    }
}

impl AttributeChannel for MemoryAttributes {
    fn read(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        if let Some(errno) = self.failures.get(path) {
            return Err(io::Error::from_raw_os_error(*errno));
        }
        Ok(self
            .values
            .get(&(path.to_path_buf(), name.to_string()))
            .cloned())
    }
}
