//! Multi-index keys
//!
//! A [`MultiIndex`] is an ordered sequence of variable coordinates that
//! addresses one partial-derivative direction. Keys compare
//! lexicographically, so an ordered map keyed by them keeps every entry of
//! one column contiguous.
//!
//! # Examples
//!
//! ```
//! use symten_core::MultiIndex;
//!
//! let key = MultiIndex::from(vec![2, 0, 1]);
//! assert!(!key.is_sorted());
//!
//! let folded = key.sorted();
//! assert_eq!(folded.as_slice(), &[0, 1, 2]);
//! assert!(MultiIndex::from(vec![0, 0, 0]).less_eq(&folded));
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

/// Inline capacity covers derivative orders seen in practice.
type Coords = SmallVec<[usize; 8]>;

/// Ordered coordinate sequence used as a tensor key
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MultiIndex(Coords);

impl MultiIndex {
    /// Create a key from its coordinates
    pub fn new(coords: &[usize]) -> Self {
        Self(SmallVec::from_slice(coords))
    }

    /// Key of the given length with every coordinate zero
    pub fn zeros(len: usize) -> Self {
        Self(SmallVec::from_elem(0, len))
    }

    /// Number of coordinates (the tensor dimension it addresses)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Largest coordinate, `None` for the empty key
    pub fn max_coord(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }

    /// True if coordinates are non-decreasing
    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    /// Sort coordinates ascending in place
    pub fn sort(&mut self) {
        self.0.sort_unstable();
    }

    /// Canonical (folded) representative of this key's permutation class
    pub fn sorted(&self) -> Self {
        let mut key = self.clone();
        key.sort();
        key
    }

    /// Componentwise `self[i] <= other[i]`
    ///
    /// Keys of different lengths are never comparable and yield `false`.
    pub fn less_eq(&self, other: &MultiIndex) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a <= b)
    }

    /// Componentwise `self[i] < other[i]`
    pub fn less(&self, other: &MultiIndex) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a < b)
    }

    /// Componentwise difference `self - other`
    ///
    /// Returns `None` on a length mismatch or if any coordinate would go
    /// negative.
    pub fn checked_sub(&self, other: &MultiIndex) -> Option<MultiIndex> {
        if self.len() != other.len() {
            return None;
        }
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<Coords>>()
            .map(MultiIndex)
    }

    pub(crate) fn coords_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

impl Index<usize> for MultiIndex {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

impl From<Vec<usize>> for MultiIndex {
    fn from(coords: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(coords))
    }
}

impl From<&[usize]> for MultiIndex {
    fn from(coords: &[usize]) -> Self {
        Self::new(coords)
    }
}

impl<const N: usize> From<[usize; N]> for MultiIndex {
    fn from(coords: [usize; N]) -> Self {
        Self::new(&coords)
    }
}

impl FromIterator<usize> for MultiIndex {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MultiIndex {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        let a = MultiIndex::from([0, 2]);
        let b = MultiIndex::from([1, 0]);
        let c = MultiIndex::from([1, 1]);
        assert!(a < b);
        assert!(b < c);

        let mut keys = vec![c.clone(), a.clone(), b.clone()];
        keys.sort();
        assert_eq!(keys, vec![a, b, c]);
    }

    #[test]
    fn test_sortedness() {
        assert!(MultiIndex::from([0, 0, 3]).is_sorted());
        assert!(!MultiIndex::from([2, 1]).is_sorted());
        assert!(MultiIndex::new(&[]).is_sorted());
        assert_eq!(MultiIndex::from([3, 1, 2]).sorted().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_componentwise_comparisons() {
        let lb = MultiIndex::from([1, 1]);
        let ub = MultiIndex::from([2, 3]);
        assert!(lb.less_eq(&ub));
        assert!(lb.less(&ub));
        assert!(MultiIndex::from([2, 1]).less_eq(&ub));
        assert!(!MultiIndex::from([2, 1]).less(&ub));
        assert!(!MultiIndex::from([0, 4]).less_eq(&ub));
        assert!(!MultiIndex::from([1]).less_eq(&ub));
    }

    #[test]
    fn test_checked_sub() {
        let key = MultiIndex::from([3, 4]);
        let off = MultiIndex::from([2, 2]);
        assert_eq!(key.checked_sub(&off), Some(MultiIndex::from([1, 2])));
        assert_eq!(off.checked_sub(&key), None);
        assert_eq!(key.checked_sub(&MultiIndex::from([1])), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MultiIndex::from([0, 1, 5]).to_string(), "[0 1 5]");
        assert_eq!(MultiIndex::new(&[]).to_string(), "[]");
    }
}
