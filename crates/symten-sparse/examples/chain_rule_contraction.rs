//! Chain-Rule Contraction Example
//!
//! Propagates the second derivatives of an outer function `f(y)` through a
//! linear inner map `y = A x` and then splits the folded derivative tensor
//! into blocks by variable group.

use anyhow::Result;
use scirs2_core::ndarray_ext::Array1;
use symten_core::{IndexIter, MultiIndex, Symmetry, TensorDimens, UnfoldedDense};
use symten_exec::ThreadGroupConfig;
use symten_sparse::parallel::{par_extract_blocks, BlockRequest};
use symten_sparse::{FSSparseTensor, FillStats};

fn main() -> Result<()> {
    println!("=== Chain-Rule Contraction Example ===\n");

    // Example 1: Hessian of h(x) = f(A x)
    println!("Example 1: Second-Order Chain Rule");
    println!("----------------------------------");

    // f(y) = y0^2 + 3 y0 y1 + 2 y1^2 + y1 y2, one output row
    let mut f = FSSparseTensor::<f64>::new(2, 3, 1);
    f.insert(&MultiIndex::from([0, 0]), 0, 2.0)?;
    f.insert(&MultiIndex::from([0, 1]), 0, 3.0)?;
    f.insert(&MultiIndex::from([1, 1]), 0, 4.0)?;
    f.insert(&MultiIndex::from([1, 2]), 0, 1.0)?;
    f.print();
    println!("{}\n", FillStats::from_tensor(f.base()));

    // y = A x with A 3x2
    let a = [[1.0, 2.0], [3.0, 4.0], [0.0, 1.0]];

    let mut h = [[0.0f64; 2]; 2];
    for (i, row) in h.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let mut t = UnfoldedDense::<f64>::zeros(3, 2, 1);
            for (ind, _) in IndexIter::unfolded(3, 2) {
                t.set(&ind, 0, a[ind[0]][i] * a[ind[1]][j])?;
            }
            let mut v = Array1::<f64>::zeros(1);
            f.mult_column_and_add(&t, v.view_mut())?;
            *entry = v[0];
        }
    }
    println!("Hessian of h: {:?}\n", h);

    // Example 2: Blocks by variable group
    println!("Example 2: Sub-Blocks by Variable Group");
    println!("---------------------------------------");

    // variables split as [y0 | y1 y2]
    let ss = vec![1, 2];
    let requests = vec![
        BlockRequest::new(ss.clone(), vec![0, 0], TensorDimens::full(2, 1)),
        BlockRequest::new(
            ss.clone(),
            vec![0, 1],
            TensorDimens::new(Symmetry::new(&[1, 1]), &ss)?,
        ),
        BlockRequest::new(ss.clone(), vec![1, 1], TensorDimens::full(2, 2)),
    ];

    let config = ThreadGroupConfig::default();
    let blocks = par_extract_blocks(&f, &requests, &config)?;
    for (request, block) in requests.iter().zip(&blocks) {
        println!("groups {:?}:", request.coor);
        block.print();
        println!();
    }

    let total: usize = blocks.iter().map(|b| b.nnz()).sum();
    println!("{} of {} entries distributed over {} blocks", total, f.nnz(), blocks.len());

    Ok(())
}
