//! Symmetry descriptors and combinatorial sizing
//!
//! A derivative tensor of order `d` over `nv` variables has `nv^d` dense
//! entries but only `C(nv+d-1, d)` symmetry-distinct ones. The functions
//! here size folded and unfolded index spaces; [`Symmetry`] and
//! [`TensorDimens`] describe tensors that are symmetric only within groups
//! of coordinates.
//!
//! # Examples
//!
//! ```
//! use symten_core::{fold_capacity, MultiIndex, Symmetry, TensorDimens};
//!
//! assert_eq!(fold_capacity(3, 2), 6);
//!
//! // [0, 1] has two distinct orderings
//! let sym = Symmetry::from_key(&MultiIndex::from([0, 1]));
//! assert_eq!(sym.permutation_count(), 2);
//!
//! // two coordinates over a group of 2 variables, one over a group of 3
//! let td = TensorDimens::new(Symmetry::new(&[2, 1]), &[2, 3]).unwrap();
//! assert_eq!(td.nvx().as_slice(), &[2, 2, 3]);
//! assert_eq!(td.fold_capacity(), 3 * 3);
//! ```

use crate::index::MultiIndex;
use anyhow::{bail, Result};
use smallvec::SmallVec;
use std::fmt;

/// Binomial coefficient `C(n, k)`, zero when `k > n`
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // exact at every step: acc * (n - i) is divisible by (i + 1)
        acc = acc * (n - i) as u128 / (i + 1) as u128;
    }
    acc as usize
}

/// Number of ascending (folded) keys of length `d` over `nv` symbols
///
/// This is the column capacity of a fully symmetric folded tensor.
pub fn fold_capacity(nv: usize, d: usize) -> usize {
    if d == 0 {
        return 1;
    }
    if nv == 0 {
        return 0;
    }
    binomial(nv + d - 1, d)
}

/// Number of unfolded keys of length `d` over `nv` symbols, `nv^d`
pub fn unfold_capacity(nv: usize, d: usize) -> usize {
    (0..d).fold(1usize, |acc, _| acc * nv)
}

/// Position of a sorted key among all sorted keys of the same length
///
/// Keys are ordered lexicographically. The caller guarantees `key` is
/// sorted with every coordinate below `nv`.
pub fn fold_offset(key: &MultiIndex, nv: usize) -> usize {
    let d = key.len();
    let mut offset = 0;
    let mut prev = 0;
    for (i, &c) in key.iter().enumerate() {
        let rest = d - i - 1;
        for v in prev..c {
            offset += fold_capacity(nv - v, rest);
        }
        prev = c;
    }
    offset
}

/// Sizes of consecutive coordinate groups that are symmetric among
/// themselves
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Symmetry(SmallVec<[usize; 4]>);

impl Symmetry {
    pub fn new(groups: &[usize]) -> Self {
        Self(SmallVec::from_slice(groups))
    }

    /// Fully symmetric in all `d` coordinates
    pub fn full(d: usize) -> Self {
        Self::new(&[d])
    }

    /// Symmetry induced by runs of equal consecutive coordinates
    ///
    /// `[0, 0, 2, 5, 5]` yields groups `[2, 1, 2]`. For a sorted key the
    /// runs are exactly its distinct values.
    pub fn from_key(key: &MultiIndex) -> Self {
        let mut groups = SmallVec::new();
        let mut iter = key.iter().peekable();
        while let Some(&c) = iter.next() {
            let mut run = 1;
            while iter.peek() == Some(&&c) {
                iter.next();
                run += 1;
            }
            groups.push(run);
        }
        Self(groups)
    }

    /// Total number of coordinates
    pub fn dimen(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn num_groups(&self) -> usize {
        self.0.len()
    }

    pub fn groups(&self) -> &[usize] {
        &self.0
    }

    /// Number of distinct orderings of a key with this run structure
    ///
    /// Multinomial `d! / (s_0! s_1! ...)`, built as the product
    /// `C(d, s_0) C(d - s_0, s_1) ...` and saturating at `usize::MAX`.
    pub fn permutation_count(&self) -> usize {
        let mut rest = self.dimen();
        let mut count = 1usize;
        for &s in &self.0 {
            count = count.saturating_mul(binomial(rest, s));
            rest -= s;
        }
        count
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MultiIndex::new(&self.0))
    }
}

/// Dimensions of a tensor symmetric within groups of coordinates
///
/// `sym[g]` coordinates range over `nvs[g]` variables each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TensorDimens {
    sym: Symmetry,
    nvs: SmallVec<[usize; 4]>,
}

impl TensorDimens {
    /// Create dimensions from a symmetry and per-group variable counts
    ///
    /// # Errors
    ///
    /// Fails if the number of groups differs from `nvs.len()`.
    pub fn new(sym: Symmetry, nvs: &[usize]) -> Result<Self> {
        if sym.num_groups() != nvs.len() {
            bail!(
                "Symmetry has {} groups but {} variable counts were given",
                sym.num_groups(),
                nvs.len()
            );
        }
        Ok(Self {
            sym,
            nvs: SmallVec::from_slice(nvs),
        })
    }

    /// Fully symmetric dimensions of order `d` over `nv` variables
    pub fn full(d: usize, nv: usize) -> Self {
        Self {
            sym: Symmetry::full(d),
            nvs: SmallVec::from_slice(&[nv]),
        }
    }

    pub fn dimen(&self) -> usize {
        self.sym.dimen()
    }

    pub fn sym(&self) -> &Symmetry {
        &self.sym
    }

    pub fn nvs(&self) -> &[usize] {
        &self.nvs
    }

    /// Allowed extent of every coordinate
    pub fn nvx(&self) -> MultiIndex {
        self.sym
            .groups()
            .iter()
            .zip(self.nvs.iter())
            .flat_map(|(&s, &nv)| std::iter::repeat(nv).take(s))
            .collect()
    }

    /// Number of folded columns: product of per-group fold capacities
    pub fn fold_capacity(&self) -> usize {
        self.sym
            .groups()
            .iter()
            .zip(self.nvs.iter())
            .map(|(&s, &nv)| fold_capacity(nv, s))
            .product()
    }

    /// Number of unfolded columns: product of `nv^s` over groups
    pub fn unfold_capacity(&self) -> usize {
        self.sym
            .groups()
            .iter()
            .zip(self.nvs.iter())
            .map(|(&s, &nv)| unfold_capacity(nv, s))
            .product()
    }
}

impl fmt::Display for TensorDimens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Symmetry: {} NVS: {}",
            self.sym,
            MultiIndex::new(&self.nvs)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(10, 10), 1);
        assert_eq!(binomial(2, 3), 0);
        assert_eq!(binomial(30, 15), 155_117_520);
    }

    #[test]
    fn test_capacities() {
        assert_eq!(fold_capacity(3, 2), 6);
        assert_eq!(fold_capacity(5, 3), 35);
        assert_eq!(fold_capacity(4, 0), 1);
        assert_eq!(fold_capacity(0, 2), 0);
        assert_eq!(unfold_capacity(3, 2), 9);
        assert_eq!(unfold_capacity(3, 0), 1);
    }

    #[test]
    fn test_fold_offset_enumerates_sorted_keys() {
        let keys = [[0, 0], [0, 1], [0, 2], [1, 1], [1, 2], [2, 2]];
        for (pos, k) in keys.iter().enumerate() {
            assert_eq!(fold_offset(&MultiIndex::from(*k), 3), pos);
        }
        assert_eq!(fold_offset(&MultiIndex::new(&[]), 3), 0);
    }

    #[test]
    fn test_symmetry_from_key() {
        let sym = Symmetry::from_key(&MultiIndex::from([0, 0, 2, 5, 5]));
        assert_eq!(sym.groups(), &[2, 1, 2]);
        assert_eq!(sym.dimen(), 5);
        // 5! / (2! 1! 2!)
        assert_eq!(sym.permutation_count(), 30);
    }

    #[test]
    fn test_permutation_count_edge_cases() {
        assert_eq!(Symmetry::from_key(&MultiIndex::from([1, 1, 1])).permutation_count(), 1);
        assert_eq!(Symmetry::from_key(&MultiIndex::from([0, 1, 2])).permutation_count(), 6);
        assert_eq!(Symmetry::from_key(&MultiIndex::new(&[])).permutation_count(), 1);
    }

    #[test]
    fn test_permutation_count_high_order() {
        assert_eq!(Symmetry::from_key(&MultiIndex::new(&[0; 40])).permutation_count(), 1);

        let mut coords = vec![0; 20];
        coords.extend([1; 20]);
        let sym = Symmetry::from_key(&MultiIndex::new(&coords));
        assert_eq!(sym.permutation_count(), binomial(40, 20));
        assert_eq!(sym.permutation_count(), 137_846_528_820);
    }

    #[test]
    fn test_tensor_dimens() {
        let td = TensorDimens::new(Symmetry::new(&[2, 1]), &[2, 3]).unwrap();
        assert_eq!(td.dimen(), 3);
        assert_eq!(td.nvx().as_slice(), &[2, 2, 3]);
        assert_eq!(td.fold_capacity(), 3 * 3);
        assert_eq!(td.unfold_capacity(), 4 * 3);
        assert_eq!(td.to_string(), "Symmetry: [2 1] NVS: [2 3]");

        assert!(TensorDimens::new(Symmetry::new(&[2, 1]), &[2]).is_err());
    }

    #[test]
    fn test_full_dimens_match_fold_capacity() {
        let td = TensorDimens::full(3, 4);
        assert_eq!(td.fold_capacity(), fold_capacity(4, 3));
        assert_eq!(td.nvx().as_slice(), &[4, 4, 4]);
    }
}
