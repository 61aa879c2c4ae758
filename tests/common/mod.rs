//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fake mergerfs pool: a temporary directory with a
//! `pool/` directory standing in for the mount and one `diskN/` directory per
//! branch, plus a [`MemoryAttributes`] store that answers the mergerfs
//! attribute queries for the pool.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let pool = PoolFixture::new(2).with_file("a.txt", &[0o644, 0o600]);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use mergerfs_fsck::defaults::{ALLPATHS_XATTR, FULLPATH_XATTR};
use mergerfs_fsck::xattr::MemoryAttributes;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{mode_of, PoolFixture};
}

/// A fake mergerfs pool with a configurable number of branches.
pub struct PoolFixture {
    temp_dir: assert_fs::TempDir,
    branches: usize,
    attrs: MemoryAttributes,
}

#[allow(dead_code)]
impl PoolFixture {
    /// Create a pool whose mount directory answers the mount-type check.
    pub fn new(branches: usize) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("pool")
            .create_dir_all()
            .expect("Failed to create mount directory");
        for i in 1..=branches {
            temp_dir
                .child(format!("disk{}", i))
                .create_dir_all()
                .expect("Failed to create branch directory");
        }

        let mut attrs = MemoryAttributes::new();
        attrs.set(
            temp_dir.path().join("pool"),
            FULLPATH_XATTR,
            temp_dir.path().join("disk1").as_os_str().as_bytes().to_vec(),
        );

        Self {
            temp_dir,
            branches,
            attrs,
        }
    }

    /// Create `name` in the mount and on every branch, with one mode per
    /// branch, and register its branch list.
    pub fn with_file(self, name: &str, modes: &[u32]) -> Self {
        let contents = vec!["data"; modes.len()];
        self.with_sized_file(name, modes, &contents)
    }

    /// Like [`with_file`](Self::with_file) but with per-branch contents.
    pub fn with_sized_file(mut self, name: &str, modes: &[u32], contents: &[&str]) -> Self {
        assert_eq!(modes.len(), self.branches, "one mode per branch");
        assert_eq!(contents.len(), self.branches, "one content per branch");

        self.temp_dir
            .child("pool")
            .child(name)
            .write_str(contents[0])
            .expect("Failed to write logical file");

        let mut branch_paths = Vec::new();
        for (i, (mode, content)) in modes.iter().zip(contents).enumerate() {
            let path = self.branch_path(i, name);
            fs::write(&path, content).expect("Failed to write branch file");
            fs::set_permissions(&path, fs::Permissions::from_mode(*mode))
                .expect("Failed to set branch mode");
            branch_paths.push(path);
        }
        self.set_branches(name, &branch_paths);
        self
    }

    /// Register an arbitrary branch list for `name`.
    pub fn set_branches(&mut self, name: &str, branch_paths: &[PathBuf]) {
        let raw: Vec<&[u8]> = branch_paths
            .iter()
            .map(|p| p.as_os_str().as_bytes())
            .collect();
        let logical = self.logical(name);
        self.attrs.set(logical, ALLPATHS_XATTR, raw.join(&0u8));
    }

    /// Make attribute reads on `name` fail with `errno`.
    pub fn with_failing_attribute(mut self, name: &str, errno: i32) -> Self {
        let logical = self.logical(name);
        self.attrs.fail(logical, errno);
        self
    }

    /// The fake mount directory.
    pub fn mount(&self) -> PathBuf {
        self.temp_dir.path().join("pool")
    }

    /// The logical path of `name` inside the mount.
    pub fn logical(&self, name: &str) -> PathBuf {
        self.mount().join(name)
    }

    /// The real path of `name` on branch `index` (0-based).
    pub fn branch_path(&self, index: usize, name: &str) -> PathBuf {
        self.temp_dir
            .path()
            .join(format!("disk{}", index + 1))
            .join(name)
    }

    /// The attribute store answering for this pool.
    pub fn attrs(&self) -> &MemoryAttributes {
        &self.attrs
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Permission bits of `path`.
#[allow(dead_code)]
pub fn mode_of(path: &Path) -> u32 {
    fs::metadata(path)
        .expect("Failed to stat path")
        .permissions()
        .mode()
        & 0o7777
}
