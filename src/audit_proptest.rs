//! Property-based tests for branch resolution, evaluation and fix selection.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::branches::split_branch_list;
    use crate::evaluate::{evaluate, SkipReason, Verdict};
    use crate::fix::{newest_index, nonroot_index};
    use crate::metadata::{MetadataRecord, Mtime};
    use proptest::prelude::*;
    use std::os::unix::ffi::OsStrExt;

    fn arb_record() -> impl Strategy<Value = MetadataRecord> {
        (
            prop_oneof![Just(0u32), Just(1000u32), any::<u32>()],
            prop_oneof![Just(0u32), Just(1000u32)],
            prop_oneof![Just(0o100644u32), Just(0o100600u32), Just(0o040755u32)],
            0u64..4,
            0i64..5,
        )
            .prop_map(|(uid, gid, mode, size, secs)| MetadataRecord {
                uid,
                gid,
                mode,
                size,
                mtime: Mtime::new(secs, 0),
            })
    }

    // ============================================================================
    // split_branch_list property tests
    // ============================================================================

    proptest! {
        /// Property: joining non-empty NUL-free byte paths with NUL and
        /// splitting again yields the same paths, byte for byte, in order
        #[test]
        fn split_recovers_joined_paths(
            paths in prop::collection::vec(
                prop::collection::vec(1u8..=255, 1..32),
                0..6,
            )
        ) {
            let raw = paths.join(&0u8);
            let split = split_branch_list(&raw);
            let bytes: Vec<Vec<u8>> = split
                .iter()
                .map(|p| p.as_os_str().as_bytes().to_vec())
                .collect();
            prop_assert_eq!(bytes, paths);
        }
    }

    // ============================================================================
    // evaluate property tests
    // ============================================================================

    proptest! {
        /// Property: fewer than two records are never compared
        #[test]
        fn fewer_than_two_records_skip(
            records in prop::collection::vec(arb_record(), 0..2),
            size_filter in any::<bool>(),
        ) {
            prop_assert_eq!(
                evaluate(&records, size_filter),
                Verdict::Skip(SkipReason::SingleBranch)
            );
        }

        /// Property: identical (mode, uid, gid) triples never diverge
        #[test]
        fn identical_triples_skip(
            base in arb_record(),
            sizes in prop::collection::vec(0u64..4, 2..6),
            size_filter in any::<bool>(),
        ) {
            let records: Vec<MetadataRecord> = sizes
                .into_iter()
                .map(|size| MetadataRecord { size, ..base })
                .collect();
            prop_assert!(!evaluate(&records, size_filter).is_divergent());
        }

        /// Property: with the size filter on, unequal sizes always skip
        #[test]
        fn size_filter_skips_unequal_sizes(
            mut records in prop::collection::vec(arb_record(), 2..6),
        ) {
            let first_size = records[0].size;
            records[1].size = first_size + 1;
            prop_assert_eq!(
                evaluate(&records, true),
                Verdict::Skip(SkipReason::SizeMismatch)
            );
        }

        /// Property: the verdict does not depend on which record is first
        #[test]
        fn divergence_is_symmetric(records in prop::collection::vec(arb_record(), 2..6)) {
            let mut reversed = records.clone();
            reversed.reverse();
            prop_assert_eq!(
                evaluate(&records, false).is_divergent(),
                evaluate(&reversed, false).is_divergent()
            );
        }

        /// Property: applying the newest record to every branch leaves a
        /// consistent record set behind
        #[test]
        fn newest_fix_is_idempotent(records in prop::collection::vec(arb_record(), 2..6)) {
            let chosen = records[newest_index(&records).unwrap()];
            let fixed: Vec<MetadataRecord> = records
                .iter()
                .map(|r| MetadataRecord {
                    mode: chosen.mode,
                    uid: chosen.uid,
                    gid: chosen.gid,
                    ..*r
                })
                .collect();
            prop_assert!(!evaluate(&fixed, false).is_divergent());
            prop_assert!(!evaluate(&fixed, true).is_divergent());
        }

        /// Property: newest selects a maximal mtime, the earliest on ties
        #[test]
        fn newest_selects_first_maximum(records in prop::collection::vec(arb_record(), 1..8)) {
            let index = newest_index(&records).unwrap();
            let max = records.iter().map(|r| r.mtime).max().unwrap();
            prop_assert_eq!(records[index].mtime, max);
            prop_assert!(records[..index].iter().all(|r| r.mtime < max));
        }

        /// Property: nonroot selects a non-root owner whenever one exists
        #[test]
        fn nonroot_prefers_non_root(records in prop::collection::vec(arb_record(), 1..8)) {
            let index = nonroot_index(&records).unwrap();
            if records.iter().any(|r| r.uid != 0) {
                prop_assert!(records[index].uid != 0);
                prop_assert!(records[..index].iter().all(|r| r.uid == 0));
            } else {
                prop_assert_eq!(Some(index), newest_index(&records));
            }
        }
    }
}
