//! # symten - Symmetric Sparse Derivative Tensors
//!
//! Storage and algebra for the high-order derivatives that arise when
//! differentiating a composition of multivariate functions: folded storage
//! of fully symmetric tensors, extraction of general-symmetry sub-blocks
//! and the contraction kernel used to propagate derivatives through the
//! chain rule.
//!
//! This is the **meta crate** that re-exports all symten components.
//!
//! ## Quick Start
//!
//! ```
//! use symten::prelude::*;
//!
//! // second derivatives of 3 variables, one output row
//! let mut ft = FSSparseTensor::<f64>::new(2, 3, 1);
//! ft.insert(&MultiIndex::from([0, 1]), 0, 2.0)?;
//!
//! assert_eq!(ft.ncols(), 6);
//! assert!((ft.fold_fill_factor() - 1.0 / 6.0).abs() < 1e-12);
//! assert!((ft.unfold_fill_factor() - 1.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Index Algebra ([`core`])
//!
//! Multi-indices, symmetries, capacities and dense operands.
//!
//! ```
//! use symten::core::{fold_capacity, unfold_capacity, Symmetry, MultiIndex};
//!
//! assert_eq!(fold_capacity(3, 2), 6);
//! assert_eq!(unfold_capacity(3, 2), 9);
//! let sym = Symmetry::from_key(&MultiIndex::from([0, 0, 2]));
//! assert_eq!(sym.permutation_count(), 3);
//! ```
//!
//! ### Sparse Tensors ([`sparse`])
//!
//! Folded (FS) and general-symmetry (GS) sparse tensors, fill statistics
//! and the contraction kernel.
//!
//! ```
//! use symten::core::{MultiIndex, TensorDimens};
//! use symten::sparse::{FSSparseTensor, GSSparseTensor};
//!
//! let mut ft = FSSparseTensor::<f64>::new(2, 4, 1);
//! ft.insert(&MultiIndex::from([2, 3]), 0, 7.0).unwrap();
//!
//! // second group of two variables, both coordinates in it
//! let block = GSSparseTensor::extract(&ft, &[2, 2], &[1, 1], TensorDimens::full(2, 2)).unwrap();
//! assert_eq!(block.get(&MultiIndex::from([0, 1]), 0), Some(7.0));
//! ```
//!
//! ### Bounded Parallelism ([`exec`])
//!
//! Thread groups that run many independent fills with at most
//! `max_parallel_threads` active at a time. Available when the `parallel`
//! feature is enabled (default).

#![deny(warnings)]

pub use symten_core as core;
#[cfg(feature = "parallel")]
pub use symten_exec as exec;
pub use symten_sparse as sparse;

/// Commonly used types and functions
pub mod prelude {
    pub use crate::core::{
        fold_capacity, unfold_capacity, DenseOperand, FoldedDense, MultiIndex, Symmetry,
        TensorDimens, UnfoldedDense,
    };
    pub use crate::sparse::{
        FSSparseTensor, FillStats, GSSparseTensor, SparseError, SparseResult, SparseTensor,
    };

    #[cfg(feature = "parallel")]
    pub use crate::exec::{ThreadGroupConfig, WorkGroup};
    #[cfg(feature = "parallel")]
    pub use crate::sparse::parallel::{par_extract_blocks, BlockRequest};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_covers_a_chain_rule_step() {
        let mut ft = FSSparseTensor::<f64>::new(2, 2, 2);
        ft.insert(&MultiIndex::from([0, 0]), 0, 1.0).unwrap();
        ft.insert(&MultiIndex::from([1, 1]), 1, 1.0).unwrap();

        let mut t = FoldedDense::<f64>::zeros(2, 2, 1);
        t.set(&MultiIndex::from([0, 0]), 0, 3.0).unwrap();
        t.set(&MultiIndex::from([1, 1]), 0, 4.0).unwrap();

        let mut v = scirs2_core::ndarray_ext::Array1::<f64>::zeros(2);
        ft.mult_column_and_add(&t, v.view_mut()).unwrap();
        assert_eq!(v.to_vec(), vec![3.0, 4.0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_prelude_parallel_blocks() {
        let mut ft = FSSparseTensor::<f64>::new(1, 4, 1);
        for i in 0..4 {
            ft.insert(&MultiIndex::from([i]), 0, (i + 1) as f64).unwrap();
        }
        let requests = vec![
            BlockRequest::new(vec![1, 3], vec![0], TensorDimens::full(1, 1)),
            BlockRequest::new(vec![1, 3], vec![1], TensorDimens::full(1, 3)),
        ];
        let blocks = par_extract_blocks(&ft, &requests, &ThreadGroupConfig::default()).unwrap();
        assert_eq!(blocks[0].nnz(), 1);
        assert_eq!(blocks[1].nnz(), 3);
        assert_eq!(blocks[1].get(&MultiIndex::from([2]), 0), Some(4.0));
    }
}
