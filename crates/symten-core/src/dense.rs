//! Dense operands addressed by multi-indices
//!
//! Rows of a dense operand are addressed by multi-indices over `nv`
//! variables; columns are independent vectors in that index space. The
//! contraction kernel of the folded sparse tensor walks every row of a
//! single-column operand through [`DenseOperand::indices`].
//!
//! Two layouts are provided:
//!
//! - [`UnfoldedDense`]: every one of the `nv^d` multi-indices, row-major
//! - [`FoldedDense`]: only ascending multi-indices, `C(nv+d-1, d)` rows
//!
//! # Examples
//!
//! ```
//! use symten_core::{DenseOperand, FoldedDense, MultiIndex, UnfoldedDense};
//!
//! let mut u = UnfoldedDense::<f64>::zeros(3, 2, 1);
//! assert_eq!(u.nrows(), 9);
//! u.set(&MultiIndex::from([2, 0]), 0, 1.5).unwrap();
//! assert_eq!(u.get(6, 0), 1.5);
//!
//! let f = FoldedDense::<f64>::zeros(3, 2, 1);
//! assert_eq!(f.nrows(), 6);
//! let rows: Vec<_> = f.indices().map(|(_, row)| row).collect();
//! assert_eq!(rows, vec![0, 1, 2, 3, 4, 5]);
//! ```

use crate::index::MultiIndex;
use crate::symmetry::{fold_capacity, fold_offset, unfold_capacity};
use anyhow::{anyhow, bail, Result};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;

/// A dense tensor whose rows are addressed by multi-indices
pub trait DenseOperand<T> {
    /// Length of every row multi-index
    fn dimen(&self) -> usize;

    /// Number of underlying variables each coordinate ranges over
    fn nvar(&self) -> usize;

    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Every addressable multi-index with its row, in canonical dense order
    fn indices(&self) -> impl Iterator<Item = (MultiIndex, usize)> + '_;

    fn get(&self, row: usize, col: usize) -> T;
}

/// Odometer over multi-indices of fixed length
///
/// With `sorted` set, only non-decreasing keys are produced. Either way
/// the order is lexicographic.
#[derive(Debug, Clone)]
pub struct IndexIter {
    nv: usize,
    sorted: bool,
    current: Option<MultiIndex>,
    row: usize,
}

impl IndexIter {
    pub fn unfolded(nv: usize, dimen: usize) -> Self {
        Self::start(nv, dimen, false)
    }

    pub fn folded(nv: usize, dimen: usize) -> Self {
        Self::start(nv, dimen, true)
    }

    fn start(nv: usize, dimen: usize, sorted: bool) -> Self {
        let current = if nv == 0 && dimen > 0 {
            None
        } else {
            Some(MultiIndex::zeros(dimen))
        };
        Self {
            nv,
            sorted,
            current,
            row: 0,
        }
    }

    fn advance(&self, key: &MultiIndex) -> Option<MultiIndex> {
        let mut next = key.clone();
        let coords = next.coords_mut();
        let pos = coords.iter().rposition(|&c| c + 1 < self.nv)?;
        coords[pos] += 1;
        let fill = if self.sorted { coords[pos] } else { 0 };
        for c in coords[pos + 1..].iter_mut() {
            *c = fill;
        }
        Some(next)
    }
}

impl Iterator for IndexIter {
    type Item = (MultiIndex, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current.take()?;
        self.current = self.advance(&key);
        let row = self.row;
        self.row += 1;
        Some((key, row))
    }
}

fn check_key(key: &MultiIndex, dimen: usize, nv: usize) -> Result<()> {
    if key.len() != dimen {
        bail!("Key {} has length {}, expected {}", key, key.len(), dimen);
    }
    if key.iter().any(|&c| c >= nv) {
        bail!("Key {} has a coordinate outside [0, {})", key, nv);
    }
    Ok(())
}

fn check_shape<T>(data: &Array2<T>, nrows: usize) -> Result<()> {
    if data.nrows() != nrows {
        bail!(
            "Dense operand needs {} rows, array has {}",
            nrows,
            data.nrows()
        );
    }
    if data.ncols() == 0 {
        bail!("Dense operand must have at least one column");
    }
    Ok(())
}

/// Dense tensor over all `nv^d` multi-indices
#[derive(Debug, Clone)]
pub struct UnfoldedDense<T> {
    nv: usize,
    dimen: usize,
    data: Array2<T>,
}

impl<T: Float> UnfoldedDense<T> {
    pub fn zeros(nv: usize, dimen: usize, ncols: usize) -> Self {
        Self {
            nv,
            dimen,
            data: Array2::zeros((unfold_capacity(nv, dimen), ncols)),
        }
    }

    /// Wrap existing data; rows must follow row-major multi-index order
    pub fn from_array(nv: usize, dimen: usize, data: Array2<T>) -> Result<Self> {
        check_shape(&data, unfold_capacity(nv, dimen))?;
        Ok(Self { nv, dimen, data })
    }

    /// Row holding the given multi-index
    pub fn row_of(&self, key: &MultiIndex) -> Result<usize> {
        check_key(key, self.dimen, self.nv)?;
        Ok(key.iter().fold(0, |acc, &c| acc * self.nv + c))
    }

    pub fn set(&mut self, key: &MultiIndex, col: usize, value: T) -> Result<()> {
        let row = self.row_of(key)?;
        let cell = self
            .data
            .get_mut((row, col))
            .ok_or_else(|| anyhow!("Column {} out of range", col))?;
        *cell = value;
        Ok(())
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }
}

impl<T: Float> DenseOperand<T> for UnfoldedDense<T> {
    fn dimen(&self) -> usize {
        self.dimen
    }

    fn nvar(&self) -> usize {
        self.nv
    }

    fn nrows(&self) -> usize {
        self.data.nrows()
    }

    fn ncols(&self) -> usize {
        self.data.ncols()
    }

    fn indices(&self) -> impl Iterator<Item = (MultiIndex, usize)> + '_ {
        IndexIter::unfolded(self.nv, self.dimen)
    }

    fn get(&self, row: usize, col: usize) -> T {
        self.data[[row, col]]
    }
}

/// Dense tensor over ascending multi-indices only
#[derive(Debug, Clone)]
pub struct FoldedDense<T> {
    nv: usize,
    dimen: usize,
    data: Array2<T>,
}

impl<T: Float> FoldedDense<T> {
    pub fn zeros(nv: usize, dimen: usize, ncols: usize) -> Self {
        Self {
            nv,
            dimen,
            data: Array2::zeros((fold_capacity(nv, dimen), ncols)),
        }
    }

    /// Wrap existing data; rows must follow lexicographic sorted-key order
    pub fn from_array(nv: usize, dimen: usize, data: Array2<T>) -> Result<Self> {
        check_shape(&data, fold_capacity(nv, dimen))?;
        Ok(Self { nv, dimen, data })
    }

    /// Row holding the folded representative of `key`
    pub fn row_of(&self, key: &MultiIndex) -> Result<usize> {
        check_key(key, self.dimen, self.nv)?;
        Ok(fold_offset(&key.sorted(), self.nv))
    }

    pub fn set(&mut self, key: &MultiIndex, col: usize, value: T) -> Result<()> {
        let row = self.row_of(key)?;
        let cell = self
            .data
            .get_mut((row, col))
            .ok_or_else(|| anyhow!("Column {} out of range", col))?;
        *cell = value;
        Ok(())
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }
}

impl<T: Float> DenseOperand<T> for FoldedDense<T> {
    fn dimen(&self) -> usize {
        self.dimen
    }

    fn nvar(&self) -> usize {
        self.nv
    }

    fn nrows(&self) -> usize {
        self.data.nrows()
    }

    fn ncols(&self) -> usize {
        self.data.ncols()
    }

    fn indices(&self) -> impl Iterator<Item = (MultiIndex, usize)> + '_ {
        IndexIter::folded(self.nv, self.dimen)
    }

    fn get(&self, row: usize, col: usize) -> T {
        self.data[[row, col]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(iter: IndexIter) -> Vec<Vec<usize>> {
        iter.map(|(k, _)| k.as_slice().to_vec()).collect()
    }

    #[test]
    fn test_unfolded_iteration_order() {
        let all = keys(IndexIter::unfolded(2, 2));
        assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_folded_iteration_order() {
        let all = keys(IndexIter::folded(3, 2));
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2]
            ]
        );
        assert_eq!(IndexIter::folded(4, 3).count(), fold_capacity(4, 3));
    }

    #[test]
    fn test_degenerate_iteration() {
        assert_eq!(keys(IndexIter::unfolded(3, 0)), vec![Vec::<usize>::new()]);
        assert_eq!(IndexIter::folded(0, 2).count(), 0);
    }

    #[test]
    fn test_rows_match_iteration() {
        let u = UnfoldedDense::<f64>::zeros(3, 3, 1);
        for (key, row) in u.indices() {
            assert_eq!(u.row_of(&key).unwrap(), row);
        }
        let f = FoldedDense::<f64>::zeros(3, 3, 1);
        for (key, row) in f.indices() {
            assert_eq!(f.row_of(&key).unwrap(), row);
        }
    }

    #[test]
    fn test_folded_set_uses_sorted_representative() {
        let mut f = FoldedDense::<f64>::zeros(3, 2, 1);
        f.set(&MultiIndex::from([2, 1]), 0, 4.0).unwrap();
        assert_eq!(f.get(4, 0), 4.0);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let mut u = UnfoldedDense::<f64>::zeros(2, 2, 1);
        assert!(u.set(&MultiIndex::from([0, 2]), 0, 1.0).is_err());
        assert!(u.set(&MultiIndex::from([0]), 0, 1.0).is_err());
        assert!(u.set(&MultiIndex::from([0, 1]), 1, 1.0).is_err());
    }

    #[test]
    fn test_from_array_checks_rows() {
        assert!(UnfoldedDense::from_array(2, 2, Array2::<f64>::zeros((4, 1))).is_ok());
        assert!(UnfoldedDense::from_array(2, 2, Array2::<f64>::zeros((3, 1))).is_err());
        assert!(FoldedDense::from_array(2, 2, Array2::<f64>::zeros((3, 2))).is_ok());
        assert!(FoldedDense::from_array(2, 2, Array2::<f64>::zeros((3, 0))).is_err());
    }
}
