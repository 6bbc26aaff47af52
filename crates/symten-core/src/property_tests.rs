//! Property-based tests for index algebra and sizing
//!
//! Checks the combinatorial identities the sparse tensors rely on against
//! brute-force enumeration of index spaces.

#[cfg(test)]
mod tests {
    use crate::{fold_capacity, fold_offset, unfold_capacity, IndexIter, MultiIndex, Symmetry};
    use proptest::prelude::*;

    fn key_strategy(max_len: usize, max_coord: usize) -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(0..max_coord, 0..=max_len)
    }

    proptest! {
        #[test]
        fn prop_folded_iter_matches_capacity(nv in 1usize..6, d in 0usize..5) {
            prop_assert_eq!(IndexIter::folded(nv, d).count(), fold_capacity(nv, d));
            prop_assert_eq!(IndexIter::unfolded(nv, d).count(), unfold_capacity(nv, d));
        }

        #[test]
        fn prop_fold_offset_is_row(nv in 1usize..6, d in 0usize..5) {
            for (key, row) in IndexIter::folded(nv, d) {
                prop_assert_eq!(fold_offset(&key, nv), row);
            }
        }

        /// Every unfolded index lands in exactly one folded class
        #[test]
        fn prop_permutation_counts_cover_unfolded(nv in 1usize..5, d in 1usize..5) {
            let total: usize = IndexIter::folded(nv, d)
                .map(|(key, _)| Symmetry::from_key(&key).permutation_count())
                .sum();
            prop_assert_eq!(total, unfold_capacity(nv, d));
        }

        #[test]
        fn prop_sorted_is_sorted_permutation(coords in key_strategy(8, 10)) {
            let key = MultiIndex::new(&coords);
            let sorted = key.sorted();
            prop_assert!(sorted.is_sorted());
            prop_assert_eq!(sorted.len(), key.len());

            let mut expected = coords.clone();
            expected.sort_unstable();
            prop_assert_eq!(sorted.as_slice(), expected.as_slice());
        }

        /// Rebasing a key inside a box keeps it below the box extents
        #[test]
        fn prop_checked_sub_within_bounds(
            coords in prop::collection::vec(0usize..20, 1..=6),
            shift in 0usize..5,
        ) {
            let key = MultiIndex::new(&coords);
            let lb: MultiIndex = coords.iter().map(|&c| c.saturating_sub(shift)).collect();
            let ub: MultiIndex = coords.iter().map(|&c| c + shift).collect();
            prop_assert!(lb.less_eq(&key) && key.less_eq(&ub));

            let local = key.checked_sub(&lb).unwrap();
            prop_assert!(local.iter().all(|&c| c <= shift));
            prop_assert_eq!(key.checked_sub(&ub).is_some(), shift == 0);
        }
    }
}
