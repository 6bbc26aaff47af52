//! Fill statistics for sparse tensors
//!
//! # Examples
//!
//! ```
//! use symten_core::MultiIndex;
//! use symten_sparse::{FSSparseTensor, FillStats};
//!
//! let mut ft = FSSparseTensor::<f64>::new(2, 3, 2);
//! ft.insert(&MultiIndex::from([0, 1]), 1, 2.0).unwrap();
//!
//! let stats = FillStats::from_tensor(ft.base());
//! assert_eq!(stats.columns, 1);
//! assert_eq!(stats.ncols, 6);
//! assert!(stats.unfold_fill >= stats.fold_fill);
//! assert!(!stats.is_very_sparse());
//! ```

use crate::sparse::SparseTensor;
use scirs2_core::numeric::Float;
use std::fmt;

/// Snapshot of how densely a tensor's columns and rows are populated
#[derive(Debug, Clone, PartialEq)]
pub struct FillStats {
    /// Number of stored items
    pub nnz: usize,
    /// Number of non-empty columns
    pub columns: usize,
    /// Column capacity
    pub ncols: usize,
    pub fold_fill: f64,
    pub unfold_fill: f64,
    pub first_nz_row: Option<usize>,
    pub last_nz_row: Option<usize>,
}

impl FillStats {
    pub fn from_tensor<T: Float>(t: &SparseTensor<T>) -> Self {
        Self {
            nnz: t.nnz(),
            columns: t.num_columns(),
            ncols: t.ncols(),
            fold_fill: t.fold_fill_factor(),
            unfold_fill: t.unfold_fill_factor(),
            first_nz_row: t.first_nz_row(),
            last_nz_row: t.last_nz_row(),
        }
    }

    /// Fewer than 1% of the columns are populated
    pub fn is_very_sparse(&self) -> bool {
        self.fold_fill < 0.01
    }

    /// Average number of items per non-empty column
    pub fn mean_column_len(&self) -> f64 {
        if self.columns == 0 {
            0.0
        } else {
            self.nnz as f64 / self.columns as f64
        }
    }

    /// Number of rows between the first and last nonzero row, inclusive
    pub fn row_span(&self) -> usize {
        match (self.first_nz_row, self.last_nz_row) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }
}

impl fmt::Display for FillStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nnz={} columns={}/{} fold={:.2}% unfold={:.2}% rows={}",
            self.nnz,
            self.columns,
            self.ncols,
            100.0 * self.fold_fill,
            100.0 * self.unfold_fill,
            self.row_span()
        )
    }
}
