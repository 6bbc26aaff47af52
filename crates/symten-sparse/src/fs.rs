//! Fully symmetric folded sparse tensor
//!
//! An [`FSSparseTensor`] holds derivatives of order `d` with respect to
//! `nv` variables. Only the ascending representative of each permutation
//! class is stored, so the column capacity is `C(nv+d-1, d)` instead of
//! `nv^d`.
//!
//! The contraction kernel [`FSSparseTensor::mult_column_and_add`] adds the
//! product of this tensor with a dense single-column operand into a row
//! accumulator without ever materializing the dense symmetric tensor. This
//! is how higher-order derivative contributions are propagated through a
//! composition of functions.
//!
//! # Examples
//!
//! ```
//! use scirs2_core::ndarray_ext::Array1;
//! use symten_core::{MultiIndex, UnfoldedDense};
//! use symten_sparse::FSSparseTensor;
//!
//! // d=2, nv=2, one row: f = 3*x0*x1
//! let mut ft = FSSparseTensor::<f64>::new(2, 2, 1);
//! ft.insert(&MultiIndex::from([0, 1]), 0, 3.0).unwrap();
//!
//! // operand holds x0*x1 products for x = (2, 5)
//! let mut t = UnfoldedDense::<f64>::zeros(2, 2, 1);
//! for (i, j, v) in [(0, 0, 4.0), (0, 1, 10.0), (1, 0, 10.0), (1, 1, 25.0)] {
//!     t.set(&MultiIndex::from([i, j]), 0, v).unwrap();
//! }
//!
//! let mut v = Array1::<f64>::zeros(1);
//! ft.mult_column_and_add(&t, v.view_mut()).unwrap();
//! // both orderings [0 1] and [1 0] hit the folded key
//! assert_eq!(v[0], 60.0);
//! ```

use crate::error::{RangeError, ShapeError, SparseError, SparseResult};
use crate::sparse::SparseTensor;
use scirs2_core::ndarray_ext::ArrayViewMut1;
use scirs2_core::numeric::Float;
use std::fmt;
use std::ops::Deref;
use symten_core::{fold_capacity, DenseOperand, MultiIndex, Symmetry};

/// Folded sparse tensor, fully symmetric in all coordinates
#[derive(Debug, Clone)]
pub struct FSSparseTensor<T> {
    base: SparseTensor<T>,
    nv: usize,
    sym: Symmetry,
}

impl<T: Float> FSSparseTensor<T> {
    /// Create an empty tensor of order `d` over `nvar` variables with `nrows`
    /// rows
    pub fn new(d: usize, nvar: usize, nrows: usize) -> Self {
        Self {
            base: SparseTensor::new(d, nrows, fold_capacity(nvar, d)),
            nv: nvar,
            sym: Symmetry::full(d),
        }
    }

    /// Insert `value` at `(key, row)`
    ///
    /// # Errors
    ///
    /// On top of the checks of [`SparseTensor::insert`]:
    /// - [`SparseError::Ordering`] if `key` is not ascending
    /// - [`RangeError::Coordinate`] if a coordinate is `>= nvar`
    pub fn insert(&mut self, key: &MultiIndex, row: usize, value: T) -> SparseResult<()> {
        if !key.is_sorted() {
            return Err(SparseError::Ordering { key: key.clone() });
        }
        if key.last().is_some_and(|c| c >= self.nv) {
            return Err(RangeError::Coordinate {
                key: key.clone(),
                nvar: self.nv,
            }
            .into());
        }
        self.base.insert(key, row, value)
    }

    /// Add the contraction of this tensor with a dense column into `v`
    ///
    /// For every row multi-index `ind` of `t` with a nonzero coefficient
    /// `a`, the folded key `sort(ind)` is looked up and every stored
    /// `(r, c)` under it contributes `v[r] += c * a`. Existing contents of
    /// `v` are kept.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::OutputLength`] if `v.len() != nrows`
    /// - [`ShapeError::OperandDimension`] if `t.dimen() != dimen`
    /// - [`ShapeError::OperandColumns`] if `t` is not single-column
    /// - [`RangeError::Coordinate`] if a nonzero coefficient of `t` sits at
    ///   a coordinate `>= nvar`; zero coefficients are skipped wherever they
    ///   are
    ///
    /// All checks run before `v` is touched.
    pub fn mult_column_and_add<D>(&self, t: &D, mut v: ArrayViewMut1<'_, T>) -> SparseResult<()>
    where
        D: DenseOperand<T>,
    {
        if v.len() != self.nrows() {
            return Err(ShapeError::OutputLength {
                expected: self.nrows(),
                got: v.len(),
            }
            .into());
        }
        if t.dimen() != self.dimen() {
            return Err(ShapeError::OperandDimension {
                expected: self.dimen(),
                got: t.dimen(),
            }
            .into());
        }
        if t.ncols() != 1 {
            return Err(ShapeError::OperandColumns { got: t.ncols() }.into());
        }
        if t.nvar() > self.nv {
            let outside = t.indices().find(|(ind, pos)| {
                t.get(*pos, 0) != T::zero() && ind.max_coord().is_some_and(|c| c >= self.nv)
            });
            if let Some((ind, _)) = outside {
                return Err(RangeError::Coordinate {
                    key: ind.sorted(),
                    nvar: self.nv,
                }
                .into());
            }
        }

        for (ind, pos) in t.indices() {
            let a = t.get(pos, 0);
            if a == T::zero() {
                continue;
            }
            let key = ind.sorted();
            debug_assert!(key.last().map_or(true, |c| c < self.nv));
            for item in self.column(&key) {
                v[item.row] = v[item.row] + item.value * a;
            }
        }
        Ok(())
    }

    /// Number of underlying variables
    pub fn nvar(&self) -> usize {
        self.nv
    }

    pub fn sym(&self) -> &Symmetry {
        &self.sym
    }

    /// The underlying base tensor
    pub fn base(&self) -> &SparseTensor<T> {
        &self.base
    }

    /// Write the diagnostic dump to stdout
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        println!("{}", self);
    }
}

impl<T> Deref for FSSparseTensor<T> {
    type Target = SparseTensor<T>;

    fn deref(&self) -> &SparseTensor<T> {
        &self.base
    }
}

impl<T: Float + fmt::Display> fmt::Display for FSSparseTensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "FS Sparse tensor: dim={}, nv={}, ({}x{})",
            self.dimen(),
            self.nv,
            self.nrows(),
            self.ncols()
        )?;
        write!(f, "{}", self.base)
    }
}
