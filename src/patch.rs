//! List patch engine - granular list reconciliation.
//!
//! Given two snapshots of an ordered sequence, [`diff`] produces the patch
//! batch that transforms a live list modeling the first snapshot into one
//! modeling the second, without tearing the whole region down. Instances
//! that survive are moved, not re-rendered.
//!
//! # Apply-order contract
//!
//! Patches apply in emitted order, and every index is valid *at the time the
//! patch is applied* - indices account for the cumulative effect of earlier
//! patches in the batch:
//!
//! 1. All destroys come first, left to right, with already-applied removals
//!    folded into each index.
//! 2. A single left-to-right pass then finalizes each position of the new
//!    snapshot: either the surviving instance is already there, or an
//!    existing instance is moved up ([`Patch::Move`], `from > to` always),
//!    or a new instance is added.
//!
//! Because positions `0..at` are final when an `Add { at }` is applied, the
//! value to instantiate is exactly `next[at]`.
//!
//! Identity is value equality (`PartialEq`) - the default rule when no
//! stable key exists. Duplicates are matched by count, so a snapshot with
//! repeated values diffs correctly.

/// One patch operation against a live list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    /// Insert a newly rendered instance at this position. The value is the
    /// new snapshot's element at the same position.
    Add {
        /// Apply-time insertion index; equal to the index in the new snapshot.
        at: usize,
    },
    /// Relocate an existing instance without re-rendering it.
    Move {
        /// Apply-time index of the instance to relocate.
        from: usize,
        /// Target index; equal to the index in the new snapshot.
        to: usize,
    },
    /// Remove and tear down the instance at this position.
    Destroy {
        /// Apply-time index of the instance to destroy.
        at: usize,
    },
}

/// Compute the patch batch transforming `prev` into `next`.
pub fn diff<T: PartialEq>(prev: &[T], next: &[T]) -> Vec<Patch> {
    let mut patches = Vec::new();

    // Match surviving instances by count: each prev element claims one
    // unclaimed equal element of next, in order. Unclaimed prev elements
    // are destroyed.
    let mut claimed = vec![false; next.len()];
    let mut keep = vec![false; prev.len()];
    for (k, item) in prev.iter().enumerate() {
        for (j, candidate) in next.iter().enumerate() {
            if !claimed[j] && candidate == item {
                claimed[j] = true;
                keep[k] = true;
                break;
            }
        }
    }

    // Destroy pass. `removed` folds earlier destroys into each index.
    let mut scratch: Vec<&T> = Vec::with_capacity(prev.len());
    let mut removed = 0;
    for (k, item) in prev.iter().enumerate() {
        if keep[k] {
            scratch.push(item);
        } else {
            patches.push(Patch::Destroy { at: k - removed });
            removed += 1;
        }
    }

    // Add/move pass: finalize each target position left to right.
    for (i, target) in next.iter().enumerate() {
        if i < scratch.len() && scratch[i] == target {
            continue;
        }
        let found = scratch
            .iter()
            .enumerate()
            .skip(i)
            .find(|(_, existing)| **existing == target)
            .map(|(j, _)| j);
        match found {
            Some(j) => {
                patches.push(Patch::Move { from: j, to: i });
                let moved = scratch.remove(j);
                scratch.insert(i, moved);
            }
            None => {
                patches.push(Patch::Add { at: i });
                scratch.insert(i, target);
            }
        }
    }

    patches
}

/// Apply a patch batch to a list modeling the previous snapshot.
///
/// `next` supplies the values for `Add` patches (an `Add { at }` inserts
/// `next[at]`). This is the reference application the renderer's instance
/// bookkeeping follows; tests use it for the round-trip property.
pub fn apply<T: Clone>(list: &mut Vec<T>, patches: &[Patch], next: &[T]) {
    for patch in patches {
        match *patch {
            Patch::Destroy { at } => {
                list.remove(at);
            }
            Patch::Move { from, to } => {
                let item = list.remove(from);
                list.insert(to, item);
            }
            Patch::Add { at } => {
                list.insert(at, next[at].clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(prev: &[i32], next: &[i32]) -> Vec<i32> {
        let patches = diff(prev, next);
        let mut list = prev.to_vec();
        apply(&mut list, &patches, next);
        list
    }

    #[test]
    fn test_identical_snapshots_emit_no_patches() {
        assert!(diff(&[1, 2, 3], &[1, 2, 3]).is_empty());
        assert!(diff::<i32>(&[], &[]).is_empty());
    }

    #[test]
    fn test_pure_appends() {
        let patches = diff(&[1, 2], &[1, 2, 3, 4]);
        assert_eq!(patches, vec![Patch::Add { at: 2 }, Patch::Add { at: 3 }]);
        assert_eq!(round_trip(&[1, 2], &[1, 2, 3, 4]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_destroy_indices_are_apply_time() {
        // Removing 2 and 3 from [1,2,3]: after 2 goes at index 1, 3 sits at
        // index 1 as well.
        let patches = diff(&[1, 2, 3], &[1]);
        assert_eq!(
            patches,
            vec![Patch::Destroy { at: 1 }, Patch::Destroy { at: 1 }]
        );
    }

    #[test]
    fn test_move_without_rerender() {
        let patches = diff(&[1, 2, 3], &[3, 1, 2]);
        assert_eq!(patches, vec![Patch::Move { from: 2, to: 0 }]);
        assert_eq!(round_trip(&[1, 2, 3], &[3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn test_mixed_batch() {
        assert_eq!(round_trip(&[1, 2, 3, 4], &[4, 2, 5]), vec![4, 2, 5]);
        assert_eq!(round_trip(&[], &[1, 2]), vec![1, 2]);
        assert_eq!(round_trip(&[1, 2], &[]), Vec::<i32>::new());
    }

    #[test]
    fn test_duplicates_match_by_count() {
        assert_eq!(round_trip(&[1, 1, 2], &[2, 1]), vec![2, 1]);
        assert_eq!(round_trip(&[1], &[1, 1, 1]), vec![1, 1, 1]);
    }

    #[test]
    fn test_moves_always_pull_forward() {
        // `from > to` for every move: later positions are never disturbed
        // before their turn.
        for (prev, next) in [
            (vec![1, 2, 3, 4], vec![4, 3, 2, 1]),
            (vec![1, 2, 3], vec![2, 3, 1]),
        ] {
            for patch in diff(&prev, &next) {
                if let Patch::Move { from, to } = patch {
                    assert!(from > to, "move {from}->{to} must pull forward");
                }
            }
            assert_eq!(round_trip(&prev, &next), next);
        }
    }
}
