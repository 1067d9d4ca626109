//! Gauss-Jordan reduction over GF(2).
//!
//! This module reduces sparse binary matrices row by row. Each row is
//! materialized as a dense GF(2) vector and XORed against the earlier
//! reduced rows until its leader (lowest set column) is unique. The reduced
//! form has pairwise distinct row leaders, which is what the
//! [`encoder`](crate::encoder) module needs to extract an encoder by column
//! permutation.
//!
//! Rank deficiency is handled per use site: [`reduce`] keeps rows that
//! vanish during elimination as zero rows, so callers can use them as a
//! dependency signal, while [`reduce_full_rank`] treats a vanishing row as
//! an error.

use crate::{gf2::GF2, spmat::SparseMatrix};
use ndarray::Array1;
use num_traits::{One, Zero};
use thiserror::Error;

/// Reduction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// A row vanished during elimination.
    #[error("the matrix is not full rank")]
    NotFullRank,
    /// Removing dependent rows left a column without any ones.
    #[error("column {0} has no ones left after removing dependent rows")]
    ZeroColumn(usize),
}

/// Reduces a matrix over GF(2), keeping dependent rows as zero rows.
///
/// The output has the same dimensions as `h`. Every nonzero output row has a
/// leader that no other output row shares; a row that is linearly dependent
/// on the rows above it comes out as a zero row.
pub fn reduce(h: &SparseMatrix) -> SparseMatrix {
    match reduce_rows(h, false) {
        Ok(reduced) => reduced,
        Err(_) => unreachable!("lenient reduction does not fail"),
    }
}

/// Reduces a matrix over GF(2), requiring full row rank.
///
/// # Errors
/// Returns [`Error::NotFullRank`] if any row vanishes during elimination.
pub fn reduce_full_rank(h: &SparseMatrix) -> Result<SparseMatrix, Error> {
    reduce_rows(h, true)
}

/// Removes the rows of `h` that are linearly dependent on earlier rows.
///
/// The kept rows are the original (unreduced) rows; the lenient reduction is
/// only used to decide which rows are dependent. The surviving rows are
/// renumbered compactly.
///
/// # Errors
/// Returns [`Error::ZeroColumn`] if the removal leaves a column without any
/// ones, since such a column no longer participates in any parity check.
pub fn drop_dependent_rows(h: &SparseMatrix) -> Result<SparseMatrix, Error> {
    let reduced = reduce(h);
    let kept: Vec<usize> = (0..h.num_rows())
        .filter(|&m| reduced.row_weight(m) > 0)
        .collect();
    let mut out = SparseMatrix::new(kept.len(), h.num_cols());
    for (new_row, &old_row) in kept.iter().enumerate() {
        out.insert_row(new_row, h.iter_row(old_row));
    }
    for n in 0..out.num_cols() {
        if out.col_weight(n) == 0 {
            return Err(Error::ZeroColumn(n));
        }
    }
    Ok(out)
}

/// Returns the leader (lowest set column) of a row, or `None` for a zero
/// row.
pub fn leader(h: &SparseMatrix, row: usize) -> Option<usize> {
    h.iter_row(row).min().copied()
}

fn reduce_rows(h: &SparseMatrix, full_rank: bool) -> Result<SparseMatrix, Error> {
    let nrows = h.num_rows();
    let ncols = h.num_cols();
    let mut out = SparseMatrix::new(nrows, ncols);
    let mut dense = Array1::from_elem(ncols, GF2::zero());
    for i in 0..nrows {
        dense.fill(GF2::zero());
        for &c in h.iter_row(i) {
            dense[c] = GF2::one();
        }
        // XOR away earlier rows until the leader is unique. Leaders of the
        // rows above are pairwise distinct, so each leader clashes with at
        // most one of them.
        while let Some(lead) = dense.iter().position(|x| x.is_one()) {
            let Some(j) = (0..i).find(|&j| leader(&out, j) == Some(lead)) else {
                break;
            };
            for &c in out.iter_row(j) {
                dense[c] += GF2::one();
            }
        }
        if full_rank && dense.iter().all(|x| x.is_zero()) {
            return Err(Error::NotFullRank);
        }
        out.insert_row(
            i,
            dense
                .iter()
                .enumerate()
                .filter_map(|(c, x)| if x.is_one() { Some(c) } else { None }),
        );
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spmat::TEST_SPMAT;

    fn test_matrix() -> SparseMatrix {
        SparseMatrix::from_spmat(TEST_SPMAT).unwrap()
    }

    fn with_duplicate_row(h: &SparseMatrix) -> SparseMatrix {
        let mut out = SparseMatrix::new(h.num_rows() + 1, h.num_cols());
        for m in 0..h.num_rows() {
            out.insert_row(m, h.iter_row(m));
        }
        out.insert_row(h.num_rows(), h.iter_row(0));
        out
    }

    #[test]
    fn full_rank_example() {
        let reduced = reduce_full_rank(&test_matrix()).unwrap();
        assert_eq!(reduced.num_rows(), 12);
        for m in 0..reduced.num_rows() {
            assert!(reduced.row_weight(m) > 0);
        }
        let mut leaders: Vec<_> = (0..reduced.num_rows())
            .map(|m| leader(&reduced, m).unwrap())
            .collect();
        leaders.sort_unstable();
        leaders.dedup();
        assert_eq!(leaders.len(), reduced.num_rows());
    }

    #[test]
    fn duplicate_row_gives_one_zero_row() {
        let h = with_duplicate_row(&test_matrix());
        let reduced = reduce(&h);
        let zero_rows = (0..reduced.num_rows())
            .filter(|&m| reduced.row_weight(m) == 0)
            .count();
        assert_eq!(zero_rows, 1);
        assert!(reduce_full_rank(&h).is_err());
    }

    #[test]
    fn reduction_is_idempotent() {
        let reduced = reduce(&test_matrix());
        assert_eq!(reduce(&reduced), reduced);
    }

    #[test]
    fn drop_dependent_rows_recovers_example() {
        let h = with_duplicate_row(&test_matrix());
        let dropped = drop_dependent_rows(&h).unwrap();
        assert_eq!(dropped, test_matrix());
    }

    #[test]
    fn reduced_rows_span_the_same_space() {
        // every original row must reduce to zero against the reduced rows
        let h = test_matrix();
        let reduced = reduce(&h);
        let mut doubled = SparseMatrix::new(24, h.num_cols());
        for m in 0..12 {
            doubled.insert_row(m, reduced.iter_row(m));
        }
        for m in 0..12 {
            doubled.insert_row(12 + m, h.iter_row(m));
        }
        let again = reduce(&doubled);
        for m in 12..24 {
            assert_eq!(again.row_weight(m), 0);
        }
    }
}
