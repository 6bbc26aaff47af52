//! Parallel extraction of sub-block tensors
//!
//! Chain-rule steps typically need many [`GSSparseTensor`] blocks cut from
//! one folded tensor. The source is only read, so blocks can be extracted
//! concurrently as long as each worker owns the block it fills.
//!
//! # Examples
//!
//! ```rust
//! use symten_core::{MultiIndex, Symmetry, TensorDimens};
//! use symten_exec::ThreadGroupConfig;
//! use symten_sparse::FSSparseTensor;
//! use symten_sparse::parallel::{par_extract_blocks, BlockRequest};
//!
//! let mut ft = FSSparseTensor::<f64>::new(2, 4, 1);
//! ft.insert(&MultiIndex::from([0, 3]), 0, 1.0).unwrap();
//! ft.insert(&MultiIndex::from([2, 3]), 0, 2.0).unwrap();
//!
//! let mixed = TensorDimens::new(Symmetry::new(&[1, 1]), &[2, 2]).unwrap();
//! let requests = vec![
//!     BlockRequest::new(vec![2, 2], vec![0, 1], mixed),
//!     BlockRequest::new(vec![2, 2], vec![1, 1], TensorDimens::full(2, 2)),
//! ];
//! let blocks = par_extract_blocks(&ft, &requests, &ThreadGroupConfig::default()).unwrap();
//! assert_eq!(blocks[0].get(&MultiIndex::from([0, 1]), 0), Some(1.0));
//! assert_eq!(blocks[1].get(&MultiIndex::from([0, 1]), 0), Some(2.0));
//! ```

use crate::error::{SparseError, SparseResult};
use crate::fs::FSSparseTensor;
use crate::gs::GSSparseTensor;
use scirs2_core::numeric::Float;
use symten_core::TensorDimens;
use symten_exec::{ThreadGroup, ThreadGroupConfig, WorkGroup};

/// One block to cut from a folded tensor, see [`GSSparseTensor::extract`]
#[derive(Debug, Clone)]
pub struct BlockRequest {
    pub group_sizes: Vec<usize>,
    pub coor: Vec<usize>,
    pub dims: TensorDimens,
}

impl BlockRequest {
    pub fn new(group_sizes: Vec<usize>, coor: Vec<usize>, dims: TensorDimens) -> Self {
        Self {
            group_sizes,
            coor,
            dims,
        }
    }

    /// Extract this block sequentially
    pub fn extract<T: Float>(&self, source: &FSSparseTensor<T>) -> SparseResult<GSSparseTensor<T>> {
        GSSparseTensor::extract(source, &self.group_sizes, &self.coor, self.dims.clone())
    }
}

/// Extract one block per request, at most `config.max_parallel_threads` at
/// a time
///
/// Blocks are returned in request order. If any extraction fails, the
/// error of the first failing request is returned.
pub fn par_extract_blocks<T>(
    source: &FSSparseTensor<T>,
    requests: &[BlockRequest],
    config: &ThreadGroupConfig,
) -> SparseResult<Vec<GSSparseTensor<T>>>
where
    T: Float + Send + Sync,
{
    let mut slots: Vec<Option<SparseResult<GSSparseTensor<T>>>> =
        (0..requests.len()).map(|_| None).collect();

    let mut group = ThreadGroup::new(config.clone());
    for (request, slot) in requests.iter().zip(slots.iter_mut()) {
        group.add_job(Box::new(move || {
            *slot = Some(request.extract(source));
        }));
    }
    group
        .run()
        .map_err(|e| SparseError::Execution(e.to_string()))?;

    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(SparseError::Execution("block job did not run".into())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;
    use symten_core::{MultiIndex, Symmetry};

    fn source() -> FSSparseTensor<f64> {
        let mut ft = FSSparseTensor::new(3, 5, 2);
        for i in 0..5 {
            for j in i..5 {
                for k in j..5 {
                    let v = (100 * i + 10 * j + k) as f64;
                    ft.insert(&MultiIndex::from([i, j, k]), (i + j + k) % 2, v)
                        .unwrap();
                }
            }
        }
        ft
    }

    fn requests() -> Vec<BlockRequest> {
        let ss = vec![2, 3];
        let mut out = Vec::new();
        for coor in [[0, 0, 0], [0, 0, 1], [0, 1, 1], [1, 1, 1]] {
            let zeros = coor.iter().filter(|&&g| g == 0).count();
            let (sym, nvs): (Vec<usize>, Vec<usize>) = match zeros {
                3 => (vec![3], vec![2]),
                0 => (vec![3], vec![3]),
                z => (vec![z, 3 - z], vec![2, 3]),
            };
            let td = TensorDimens::new(Symmetry::new(&sym), &nvs).unwrap();
            out.push(BlockRequest::new(ss.clone(), coor.to_vec(), td));
        }
        out
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ft = source();
        let reqs = requests();
        let config = ThreadGroupConfig::default().max_parallel_threads(3);
        let blocks = par_extract_blocks(&ft, &reqs, &config).unwrap();

        assert_eq!(blocks.len(), reqs.len());
        for (block, req) in blocks.iter().zip(&reqs) {
            let expected = req.extract(&ft).unwrap();
            let got: Vec<_> = block.items().map(|(k, it)| (k.clone(), *it)).collect();
            let want: Vec<_> = expected.items().map(|(k, it)| (k.clone(), *it)).collect();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_blocks_partition_the_source() {
        // every sorted key falls into exactly one of the group combinations
        let ft = source();
        let blocks = par_extract_blocks(&ft, &requests(), &ThreadGroupConfig::default()).unwrap();
        let total: usize = blocks.iter().map(|b| b.nnz()).sum();
        assert_eq!(total, ft.nnz());
    }

    #[test]
    fn test_first_error_is_reported() {
        let ft = source();
        let mut reqs = requests();
        reqs[1].coor = vec![0, 0, 7];
        let err = par_extract_blocks(&ft, &reqs, &ThreadGroupConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SparseError::Range(RangeError::Group { group: 7, .. })
        ));
    }

    #[test]
    fn test_no_requests() {
        let ft = source();
        let blocks = par_extract_blocks(&ft, &[], &ThreadGroupConfig::default()).unwrap();
        assert!(blocks.is_empty());
    }
}
