//! # symten-core
//!
//! Core index and shape types for symmetric derivative tensors.
//!
//! This crate provides the building blocks shared by the sparse storage in
//! `symten-sparse`:
//!
//! - **Multi-index keys** ([`MultiIndex`]) with lexicographic ordering and
//!   componentwise range tests
//! - **Symmetry descriptors** ([`Symmetry`], [`TensorDimens`]) for fully and
//!   group-wise symmetric tensors
//! - **Combinatorial sizing** ([`fold_capacity`], [`unfold_capacity`],
//!   [`fold_offset`])
//! - **Dense operands** ([`DenseOperand`], [`UnfoldedDense`],
//!   [`FoldedDense`]) consumed by contraction kernels
//!
//! ## Quick Start
//!
//! ```
//! use symten_core::{fold_capacity, MultiIndex, Symmetry};
//!
//! // second derivatives of a function of three variables
//! assert_eq!(fold_capacity(3, 2), 6);
//!
//! let key = MultiIndex::from([1, 0]).sorted();
//! assert_eq!(key.as_slice(), &[0, 1]);
//! assert_eq!(Symmetry::from_key(&key).permutation_count(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Constructors return `Result<T, anyhow::Error>`.

#![deny(warnings)]

pub mod dense;
pub mod index;
pub mod symmetry;

mod property_tests;

pub use dense::{DenseOperand, FoldedDense, IndexIter, UnfoldedDense};
pub use index::MultiIndex;
pub use symmetry::{
    binomial, fold_capacity, fold_offset, unfold_capacity, Symmetry, TensorDimens,
};
