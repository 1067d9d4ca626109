//! Column pruning.
//!
//! Two columns that share ones in two or more rows close a length-4 cycle in
//! the Tanner graph, which degrades iterative decoding. This module removes
//! such columns greedily.

use super::SparseMatrix;

impl SparseMatrix {
    /// Deletes columns that overlap an earlier kept column in more than one
    /// row.
    ///
    /// Columns are scanned left to right. A column is kept only if the set
    /// of rows where it has ones intersects every previously kept column in
    /// at most one row. The returned matrix has the kept columns renumbered
    /// compactly and the same number of rows as `self`; row weights shrink
    /// by the ones of the discarded columns.
    pub fn prune_overlapping_columns(&self) -> SparseMatrix {
        let nrows = self.num_rows();
        let mut kept: Vec<usize> = Vec::with_capacity(self.num_cols());
        let mut marked = vec![false; nrows];
        for n in 0..self.num_cols() {
            for m in marked.iter_mut() {
                *m = false;
            }
            for &m in self.iter_col(n) {
                marked[m] = true;
            }
            let overlapping = kept.iter().any(|&k| {
                self.iter_col(k).filter(|&&m| marked[m]).count() > 1
            });
            if !overlapping {
                kept.push(n);
            }
        }
        let mut pruned = SparseMatrix::new(nrows, kept.len());
        for (new_col, &old_col) in kept.iter().enumerate() {
            for &m in self.iter_col(old_col) {
                pruned.insert(m, new_col);
            }
        }
        pruned
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spmat::TEST_SPMAT;

    fn overlap(h: &SparseMatrix, a: usize, b: usize) -> usize {
        h.iter_col(a)
            .filter(|&m| h.iter_col(b).any(|x| x == m))
            .count()
    }

    #[test]
    fn drops_duplicated_column() {
        let mut h = SparseMatrix::new(3, 3);
        h.insert_row(0, [0, 1].iter());
        h.insert_row(1, [0, 1, 2].iter());
        h.insert_row(2, [2].iter());
        let pruned = h.prune_overlapping_columns();
        assert_eq!(pruned.num_cols(), 2);
        assert_eq!(pruned.num_rows(), 3);
        // column 1 duplicated column 0 and is gone
        assert_eq!(pruned.iter_col(0).copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(pruned.iter_col(1).copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(pruned.row_weight(0), 1);
    }

    #[test]
    fn result_has_no_large_overlaps() {
        let h = SparseMatrix::from_spmat(TEST_SPMAT).unwrap();
        let pruned = h.prune_overlapping_columns();
        for a in 0..pruned.num_cols() {
            for b in 0..a {
                assert!(overlap(&pruned, a, b) <= 1);
            }
        }
    }

    #[test]
    fn kept_columns_preserve_weight() {
        let h = SparseMatrix::from_spmat(TEST_SPMAT).unwrap();
        let pruned = h.prune_overlapping_columns();
        assert_eq!(pruned.num_rows(), h.num_rows());
        for n in 0..pruned.num_cols() {
            assert_eq!(pruned.col_weight(n), 3);
        }
    }
}
