//! # Consistency Evaluation
//!
//! Decides whether the branch copies of a logical path disagree on
//! ownership or permissions.
//!
//! The checks run in a fixed order:
//!
//! 1. Fewer than two records: nothing to compare.
//! 2. With the size filter on, any size differing from the first record's
//!    skips the path. The filter narrows the audit to copies that look like
//!    the same content; it is not a size check of its own.
//! 3. The `(mode, uid, gid)` triple of every record is compared against the
//!    first record's.
//!
//! Record 0 is only the baseline. It is not assumed to be correct.

use crate::metadata::MetadataRecord;

/// Why a path was not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Zero or one branch backs the path.
    SingleBranch,
    /// The size filter is on and the branch sizes differ.
    SizeMismatch,
    /// Every branch agrees on mode, uid and gid.
    Consistent,
}

/// Outcome of evaluating one record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Skip(SkipReason),
    Divergent,
}

impl Verdict {
    pub fn is_divergent(&self) -> bool {
        matches!(self, Verdict::Divergent)
    }
}

/// Evaluate a record set, one record per branch in branch order.
pub fn evaluate(records: &[MetadataRecord], size_filter: bool) -> Verdict {
    let Some((first, rest)) = records.split_first() else {
        return Verdict::Skip(SkipReason::SingleBranch);
    };
    if rest.is_empty() {
        return Verdict::Skip(SkipReason::SingleBranch);
    }

    if size_filter && rest.iter().any(|r| r.size != first.size) {
        return Verdict::Skip(SkipReason::SizeMismatch);
    }

    let baseline = first.ownership();
    if rest.iter().all(|r| r.ownership() == baseline) {
        Verdict::Skip(SkipReason::Consistent)
    } else {
        Verdict::Divergent
    }
}
