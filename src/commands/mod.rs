//! # CLI Command Implementations
//!
//! `mergerfs-fsck` has a single command, the audit itself. It keeps the
//! same shape as a subcommand would: an `Args` struct derived with `clap`
//! and an `execute` function that calls into the `mergerfs_fsck` library.

pub mod audit;
