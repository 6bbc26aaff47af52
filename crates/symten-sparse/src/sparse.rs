//! Base sparse tensor: an ordered, multi-valued map from key to rows
//!
//! A [`SparseTensor`] stores `(row, value)` items under multi-index keys.
//! Items sharing a key form one *column* and are stored contiguously, so
//! both exact-key duplicate detection and whole-column retrieval are a
//! single ordered-map lookup, and walking distinct keys never touches
//! individual items.
//!
//! # Invariants
//!
//! - every stored row lies in `[0, nrows)`
//! - every key has length `dimen`
//! - no two items under one key share a row
//! - every stored value is finite
//!
//! # Examples
//!
//! ```
//! use symten_core::MultiIndex;
//! use symten_sparse::SparseTensor;
//!
//! let mut t = SparseTensor::<f64>::new(2, 3, 6);
//! t.insert(&MultiIndex::from([0, 1]), 2, 1.5).unwrap();
//! t.insert(&MultiIndex::from([0, 1]), 0, -1.0).unwrap();
//!
//! assert_eq!(t.nnz(), 2);
//! assert_eq!(t.column(&MultiIndex::from([0, 1])).len(), 2);
//! assert_eq!(t.first_nz_row(), Some(0));
//! assert!(t.insert(&MultiIndex::from([0, 1]), 2, 9.0).is_err());
//! ```

use crate::error::{RangeError, ShapeError, SparseError, SparseResult};
use scirs2_core::numeric::Float;
use std::collections::BTreeMap;
use std::fmt;
use symten_core::{MultiIndex, Symmetry};

/// One stored entry of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item<T> {
    pub row: usize,
    pub value: T,
}

/// Ordered multi-valued map from multi-index to `(row, value)` items
#[derive(Debug, Clone)]
pub struct SparseTensor<T> {
    map: BTreeMap<MultiIndex, Vec<Item<T>>>,
    dimen: usize,
    nrows: usize,
    ncols: usize,
    nnz: usize,
    /// (first, last) nonzero row, widened monotonically on insert
    nz_rows: Option<(usize, usize)>,
}

impl<T: Float> SparseTensor<T> {
    /// Create an empty tensor
    ///
    /// # Arguments
    ///
    /// * `dimen` - Length of every key
    /// * `nrows` - Row count
    /// * `ncols` - Number of addressable distinct keys
    pub fn new(dimen: usize, nrows: usize, ncols: usize) -> Self {
        Self {
            map: BTreeMap::new(),
            dimen,
            nrows,
            ncols,
            nnz: 0,
            nz_rows: None,
        }
    }

    /// Insert `value` at `(key, row)`
    ///
    /// # Errors
    ///
    /// - [`RangeError::Row`] if `row >= nrows`
    /// - [`ShapeError::KeyLength`] if the key length differs from `dimen`
    /// - [`SparseError::NonFiniteValue`] for NaN or infinite values
    /// - [`SparseError::DuplicateEntry`] if `(key, row)` is already stored
    ///
    /// On error the tensor is unchanged.
    pub fn insert(&mut self, key: &MultiIndex, row: usize, value: T) -> SparseResult<()> {
        if row >= self.nrows {
            return Err(RangeError::Row {
                row,
                nrows: self.nrows,
            }
            .into());
        }
        if key.len() != self.dimen {
            return Err(ShapeError::KeyLength {
                key: key.clone(),
                expected: self.dimen,
                got: key.len(),
            }
            .into());
        }
        if !value.is_finite() {
            return Err(SparseError::NonFiniteValue {
                key: key.clone(),
                row,
            });
        }
        if self.column(key).iter().any(|item| item.row == row) {
            return Err(SparseError::DuplicateEntry {
                key: key.clone(),
                row,
            });
        }

        self.map
            .entry(key.clone())
            .or_default()
            .push(Item { row, value });
        self.nnz += 1;
        self.nz_rows = Some(match self.nz_rows {
            Some((first, last)) => (first.min(row), last.max(row)),
            None => (row, row),
        });
        Ok(())
    }

    /// True if every stored value is finite
    pub fn is_finite(&self) -> bool {
        self.items().all(|(_, item)| item.value.is_finite())
    }

    /// Fraction of addressable columns holding at least one item
    pub fn fold_fill_factor(&self) -> f64 {
        self.per_column_ratio(|_| 1)
    }

    /// Permutation-weighted fill factor
    ///
    /// Every stored key counts once per distinct ordering of its
    /// coordinates, so this is never below [`Self::fold_fill_factor`] for a
    /// non-empty tensor.
    pub fn unfold_fill_factor(&self) -> f64 {
        self.per_column_ratio(|key| Symmetry::from_key(key).permutation_count())
    }

    /// Same as [`Self::fold_fill_factor`]
    pub fn fill_factor(&self) -> f64 {
        self.fold_fill_factor()
    }

    fn per_column_ratio(&self, weight: impl Fn(&MultiIndex) -> usize) -> f64 {
        if self.ncols == 0 {
            return 0.0;
        }
        let cnt: usize = self.map.keys().map(weight).sum();
        cnt as f64 / self.ncols as f64
    }

    /// All items stored under `key`, empty if none
    pub fn column(&self, key: &MultiIndex) -> &[Item<T>] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Value stored at `(key, row)`
    pub fn get(&self, key: &MultiIndex, row: usize) -> Option<T> {
        self.column(key)
            .iter()
            .find(|item| item.row == row)
            .map(|item| item.value)
    }

    /// Non-empty columns in key order
    pub fn columns(&self) -> impl Iterator<Item = (&MultiIndex, &[Item<T>])> + '_ {
        self.map.iter().map(|(k, items)| (k, items.as_slice()))
    }

    /// Non-empty columns whose key lies in `[lb, ub]` lexicographically
    ///
    /// This window is only a coarse superset of the componentwise box
    /// `lb <= key <= ub`; callers filter exactly.
    pub fn columns_between<'a>(
        &'a self,
        lb: &MultiIndex,
        ub: &MultiIndex,
    ) -> Box<dyn Iterator<Item = (&'a MultiIndex, &'a [Item<T>])> + 'a> {
        if lb > ub {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.map
                .range(lb.clone()..=ub.clone())
                .map(|(k, items)| (k, items.as_slice())),
        )
    }

    /// Every stored item with its key, in key order
    pub fn items(&self) -> impl Iterator<Item = (&MultiIndex, &Item<T>)> + '_ {
        self.map
            .iter()
            .flat_map(|(k, items)| items.iter().map(move |item| (k, item)))
    }

    pub fn dimen(&self) -> usize {
        self.dimen
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Column capacity: number of addressable distinct keys
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored items
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Number of distinct keys holding at least one item
    pub fn num_columns(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Smallest row index of any stored item
    pub fn first_nz_row(&self) -> Option<usize> {
        self.nz_rows.map(|(first, _)| first)
    }

    /// Largest row index of any stored item
    pub fn last_nz_row(&self) -> Option<usize> {
        self.nz_rows.map(|(_, last)| last)
    }

    /// Write the diagnostic dump to stdout
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        println!("{}", self);
    }
}

impl<T: Float + fmt::Display> fmt::Display for SparseTensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fill: {:3.2} %", 100.0 * self.fill_factor())?;
        for (key, items) in self.columns() {
            write!(f, "Column: {}", key)?;
            for (i, item) in items.iter().enumerate() {
                if i % 7 == 0 {
                    writeln!(f)?;
                }
                write!(f, "{}({:8.4})  ", item.row, item.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
