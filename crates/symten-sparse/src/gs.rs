//! Generalized-symmetry sub-block sparse tensor
//!
//! When the variables of a folded tensor are partitioned into contiguous
//! groups (for example states, shocks and parameters), a chain-rule step
//! often needs only the derivatives taken with respect to one ordered
//! combination of groups. A [`GSSparseTensor`] is that restriction: the
//! hyper-rectangle of keys whose `i`-th coordinate lies in group `coor[i]`,
//! re-based so every coordinate starts at zero within its group.
//!
//! The block owns a private copy of the extracted entries and never
//! aliases its source.
//!
//! # Examples
//!
//! ```
//! use symten_core::{MultiIndex, Symmetry, TensorDimens};
//! use symten_sparse::{FSSparseTensor, GSSparseTensor};
//!
//! // 5 variables split into groups of 2 and 3
//! let mut ft = FSSparseTensor::<f64>::new(2, 5, 1);
//! ft.insert(&MultiIndex::from([0, 1]), 0, 1.0).unwrap();
//! ft.insert(&MultiIndex::from([1, 3]), 0, 2.0).unwrap();
//! ft.insert(&MultiIndex::from([3, 4]), 0, 3.0).unwrap();
//!
//! // block: first coordinate in group 0, second in group 1
//! let td = TensorDimens::new(Symmetry::new(&[1, 1]), &[2, 3]).unwrap();
//! let gt = GSSparseTensor::extract(&ft, &[2, 3], &[0, 1], td).unwrap();
//!
//! assert_eq!(gt.nnz(), 1);
//! assert_eq!(gt.get(&MultiIndex::from([1, 1]), 0), Some(2.0));
//! ```

use crate::error::{RangeError, ShapeError, SparseResult};
use crate::fs::FSSparseTensor;
use crate::sparse::SparseTensor;
use scirs2_core::numeric::Float;
use std::fmt;
use std::ops::Deref;
use symten_core::{MultiIndex, TensorDimens};

/// Sub-block of a folded tensor restricted to chosen variable groups
#[derive(Debug, Clone)]
pub struct GSSparseTensor<T> {
    base: SparseTensor<T>,
    tdims: TensorDimens,
}

/// Inclusive per-coordinate bounds of the block selected by `coor`
///
/// Group `g` covers variables `[off[g], off[g] + ss[g] - 1]`, where `off`
/// are the cumulative sizes of the groups before it. Bounds of an empty
/// group are meaningless; callers check for those first.
pub fn block_bounds(ss: &[usize], coor: &[usize]) -> SparseResult<(MultiIndex, MultiIndex)> {
    let offsets: Vec<usize> = ss
        .iter()
        .scan(0, |acc, &s| {
            let off = *acc;
            *acc += s;
            Some(off)
        })
        .collect();

    let mut lb = Vec::with_capacity(coor.len());
    let mut ub = Vec::with_capacity(coor.len());
    for &g in coor {
        if g >= ss.len() {
            return Err(RangeError::Group {
                group: g,
                ngroups: ss.len(),
            }
            .into());
        }
        lb.push(offsets[g]);
        ub.push(offsets[g] + ss[g].saturating_sub(1));
    }
    Ok((MultiIndex::from(lb), MultiIndex::from(ub)))
}

impl<T: Float> GSSparseTensor<T> {
    /// Create an empty block with the given dimensions
    ///
    /// `nrows` matches the row count of the tensor it will be filled from.
    pub fn new(tdims: TensorDimens, nrows: usize) -> Self {
        Self {
            base: SparseTensor::new(tdims.dimen(), nrows, tdims.fold_capacity()),
            tdims,
        }
    }

    /// Extract the block of `t` selected by `coor`
    ///
    /// # Arguments
    ///
    /// * `t` - Source folded tensor
    /// * `ss` - Sizes of the contiguous variable groups, summing to `t.nvar()`
    /// * `coor` - Group of each coordinate of the block, non-decreasing
    /// * `td` - Dimensions of the block
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Descriptor`] if `coor` or `td` disagree with the
    ///   dimension of `t`, or the group sizes do not cover `t.nvar()`
    /// - [`RangeError::Group`] if `coor` names a group outside `ss`
    /// - any error of [`GSSparseTensor::insert`], which cannot occur when
    ///   `td.nvs()` matches the selected group sizes
    pub fn extract(
        t: &FSSparseTensor<T>,
        ss: &[usize],
        coor: &[usize],
        td: TensorDimens,
    ) -> SparseResult<Self> {
        if coor.len() != t.dimen() {
            return Err(ShapeError::Descriptor {
                what: "group selection",
                expected: t.dimen(),
                got: coor.len(),
            }
            .into());
        }
        if td.dimen() != t.dimen() {
            return Err(ShapeError::Descriptor {
                what: "target dimensions",
                expected: t.dimen(),
                got: td.dimen(),
            }
            .into());
        }
        let total: usize = ss.iter().sum();
        if total != t.nvar() {
            return Err(ShapeError::Descriptor {
                what: "group sizes total",
                expected: t.nvar(),
                got: total,
            }
            .into());
        }

        let (lb, ub) = block_bounds(ss, coor)?;
        let mut block = Self::new(td, t.nrows());
        if let Some(&g) = coor.iter().find(|&&g| ss[g] == 0) {
            log::warn!("block selects empty variable group {}", g);
            return Ok(block);
        }

        let mut window = 0usize;
        for (key, items) in t.columns_between(&lb, &ub) {
            window += 1;
            if !(lb.less_eq(key) && key.less_eq(&ub)) {
                continue;
            }
            let Some(local) = key.checked_sub(&lb) else {
                continue;
            };
            for item in items {
                block.insert(&local, item.row, item.value)?;
            }
        }

        log::debug!(
            "extracted block {} from {} window columns: {} columns, {} entries",
            block.tdims,
            window,
            block.num_columns(),
            block.nnz()
        );
        Ok(block)
    }

    /// Insert `value` at `(key, row)`
    ///
    /// # Errors
    ///
    /// On top of the checks of [`SparseTensor::insert`],
    /// [`RangeError::Extent`] if some coordinate is not strictly below the
    /// extent of its group. A key of the wrong length fails with
    /// [`ShapeError::KeyLength`].
    pub fn insert(&mut self, key: &MultiIndex, row: usize, value: T) -> SparseResult<()> {
        let extents = self.tdims.nvx();
        if key.len() == extents.len() && !key.less(&extents) {
            return Err(RangeError::Extent {
                key: key.clone(),
                extents,
            }
            .into());
        }
        self.base.insert(key, row, value)
    }

    /// Dimensions descriptor of this block
    pub fn tdims(&self) -> &TensorDimens {
        &self.tdims
    }

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

impl<T> Deref for GSSparseTensor<T> {
    type Target = SparseTensor<T>;

    fn deref(&self) -> &SparseTensor<T> {
        &self.base
    }
}

impl<T: Float + fmt::Display> fmt::Display for GSSparseTensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GS Sparse tensor: ({}x{})", self.nrows(), self.ncols())?;
        writeln!(f, "Symmetry: {}", self.tdims.sym())?;
        writeln!(f, "NVS: {}", MultiIndex::new(self.tdims.nvs()))?;
        write!(f, "{}", self.base)
    }
}
