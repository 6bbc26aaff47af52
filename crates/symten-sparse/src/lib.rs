//! # symten-sparse
//!
//! Sparse storage for symmetric high-order derivative tensors.
//!
//! A derivative tensor of order `d` over `n` variables has `n^d` dense
//! entries but only `C(n+d-1, d)` distinct ones. This crate stores exactly
//! the distinct ones and provides the operations needed to combine them:
//!
//! - [`SparseTensor`]: ordered multi-valued map from multi-index to
//!   `(row, value)` items, with fill-factor statistics
//! - [`FSSparseTensor`]: fully symmetric folded tensor with the dense
//!   contraction kernel used in chain-rule propagation
//! - [`GSSparseTensor`]: sub-block restricted to chosen variable groups,
//!   re-based to local coordinates
//! - [`FillStats`]: fill summary of any of the above
//! - `parallel` (feature-gated): concurrent extraction of many blocks
//!
//! Tensors are filled through `insert` and read-only afterwards. Every
//! fallible call returns [`SparseResult`]; a rejected call leaves the
//! tensor unchanged.
//!
//! ## Quick Start
//!
//! ```
//! use symten_core::MultiIndex;
//! use symten_sparse::{FSSparseTensor, SparseError};
//!
//! let mut ft = FSSparseTensor::<f64>::new(2, 3, 1);
//! ft.insert(&MultiIndex::from([0, 1]), 0, 2.0).unwrap();
//! assert_eq!(ft.ncols(), 6);
//! assert!((ft.fold_fill_factor() - 1.0 / 6.0).abs() < 1e-12);
//!
//! let err = ft.insert(&MultiIndex::from([0, 1]), 0, 3.0).unwrap_err();
//! assert!(matches!(err, SparseError::DuplicateEntry { .. }));
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): block extraction on a bounded thread group

#![deny(warnings)]

pub mod error;
pub mod fs;
pub mod gs;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sparse;
pub mod stats;

pub use error::*;
pub use fs::FSSparseTensor;
pub use gs::{block_bounds, GSSparseTensor};
pub use sparse::{Item, SparseTensor};
pub use stats::FillStats;
