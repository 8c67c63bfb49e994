//! Property tests for the list patch engine.
//!
//! Small value domains force duplicate-heavy snapshots, the regime where
//! count-based matching earns its keep.

use proptest::prelude::*;

use viewflow::patch::{Patch, apply, diff};

fn snapshot() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 0..12)
}

proptest! {
    #[test]
    fn prop_applying_the_diff_reproduces_the_target(prev in snapshot(), next in snapshot()) {
        let patches = diff(&prev, &next);
        let mut list = prev.clone();
        apply(&mut list, &patches, &next);
        prop_assert_eq!(list, next);
    }

    #[test]
    fn prop_identical_snapshots_patch_nothing(items in snapshot()) {
        prop_assert!(diff(&items, &items).is_empty());
    }

    #[test]
    fn prop_moves_always_pull_forward(prev in snapshot(), next in snapshot()) {
        for patch in diff(&prev, &next) {
            if let Patch::Move { from, to } = patch {
                prop_assert!(from > to, "move {}->{} must pull forward", from, to);
            }
        }
    }

    #[test]
    fn prop_every_index_is_valid_at_apply_time(prev in snapshot(), next in snapshot()) {
        let patches = diff(&prev, &next);
        let mut len = prev.len();
        for patch in patches {
            match patch {
                Patch::Destroy { at } => {
                    prop_assert!(at < len);
                    len -= 1;
                }
                Patch::Move { from, to } => {
                    prop_assert!(from < len);
                    prop_assert!(to < len);
                }
                Patch::Add { at } => {
                    prop_assert!(at <= len);
                    len += 1;
                }
            }
        }
        prop_assert_eq!(len, next.len());
    }
}
