//! # mergerfs-fsck Library
//!
//! This library audits a mergerfs mount for metadata inconsistencies between
//! the branch copies of the same logical path, and optionally repairs them.
//! It backs the `mergerfs-fsck` command-line tool but can be embedded in
//! other tools as well.
//!
//! ## Quick Example
//!
//! ```
//! use mergerfs_fsck::evaluate::{evaluate, Verdict};
//! use mergerfs_fsck::fix::nonroot_index;
//! use mergerfs_fsck::metadata::{MetadataRecord, Mtime};
//!
//! let user = MetadataRecord { uid: 1000, gid: 1000, mode: 0o100644, size: 10, mtime: Mtime::new(1, 0) };
//! let root = MetadataRecord { uid: 0, gid: 0, mode: 0o100600, size: 10, mtime: Mtime::new(2, 0) };
//!
//! assert_eq!(evaluate(&[user, root], false), Verdict::Divergent);
//! assert_eq!(nonroot_index(&[root, user]), Some(1));
//! ```
//!
//! ## Core Concepts
//!
//! - **Attribute channel (`xattr`)**: reads the `user.mergerfs.*` extended
//!   attributes mergerfs exposes, behind a trait so tests can fake it.
//! - **Branch resolution (`branches`)**: turns a logical path into the list
//!   of real branch paths backing it.
//! - **Metadata (`metadata`)**: one `lstat` record per branch path.
//! - **Evaluation (`evaluate`)**: decides whether branches diverge on mode,
//!   owner or group.
//! - **Fix policies (`fix`)**: pick the authoritative branch and write its
//!   metadata onto all branches through a `filesystem::BranchWriter`.
//! - **Reporting (`report`)**: the line-oriented stdout format.
//! - **Orchestration (`audit`)**: runs the pipeline over a directory tree.
//!
//! ## Execution Flow
//!
//! For every logical path visited by the walk:
//!
//! 1.  **Resolve** branches; fewer than two means nothing to audit.
//! 2.  **Collect** metadata for each branch.
//! 3.  **Evaluate**; consistent paths are skipped.
//! 4.  **Report** the divergent path.
//! 5.  **Fix** it with the configured policy.
//!
//! Nothing is carried over from one path to the next.

pub mod audit;
pub mod branches;
pub mod defaults;
pub mod error;
pub mod evaluate;
pub mod filesystem;
pub mod fix;
pub mod metadata;
pub mod output;
pub mod report;
pub mod xattr;

#[cfg(test)]
mod audit_proptest;
