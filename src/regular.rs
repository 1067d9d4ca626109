//! # Random regular LDPC construction
//!
//! This module generates regular sparse parity check matrices the simple
//! way: for a column weight `dv` and row weight `dc`, the matrix is a stack
//! of `dv` row blocks, where each block is a random permutation of the
//! columns partitioned into rows of `dc` entries. Every column gets exactly
//! one entry per block, so the column weight is `dv` and the row weight is
//! `dc` by construction.

use crate::rand::from_seed;
use crate::spmat::SparseMatrix;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The code length is not a multiple of the row weight.
    #[error("code length {n} is not a multiple of the row weight {row_weight}")]
    LengthNotDivisible {
        /// Requested code length.
        n: usize,
        /// Requested row weight.
        row_weight: usize,
    },
}

/// Generates a random `(col_weight, row_weight)`-regular matrix with `n`
/// columns.
///
/// The number of rows is `n * col_weight / row_weight`. The random `seed`
/// is used to obtain repeatable results.
///
/// # Errors
/// An error is returned if `n` is not a multiple of `row_weight`.
///
/// # Examples
/// ```
/// # use ldpc_awgn::regular::generate;
/// let h = generate(3, 6, 96, 1).unwrap();
/// assert_eq!(h.num_rows(), 48);
/// assert_eq!(h.num_cols(), 96);
/// ```
pub fn generate(
    col_weight: usize,
    row_weight: usize,
    n: usize,
    seed: u32,
) -> Result<SparseMatrix, Error> {
    assert!(col_weight > 0 && row_weight > 0);
    if n % row_weight != 0 {
        return Err(Error::LengthNotDivisible { n, row_weight });
    }
    let rows_per_block = n / row_weight;
    let mut h = SparseMatrix::new(rows_per_block * col_weight, n);
    let mut rng = from_seed(seed);
    let mut perm: Vec<usize> = (0..n).collect();
    let mut group = vec![0; row_weight];
    for block in 0..col_weight {
        perm.shuffle(&mut rng);
        for p in 0..rows_per_block {
            group.copy_from_slice(&perm[p * row_weight..(p + 1) * row_weight]);
            group.sort_unstable();
            h.insert_row(block * rows_per_block + p, group.iter());
        }
    }
    Ok(h)
}
