//! Tanner graph of a parity check matrix.
//!
//! The decoder views the parity check matrix as a bipartite graph with one
//! variable node per column, one check node per row, and one edge per one
//! entry. The edges are stored in a single contiguous array in row-major
//! order, so the edges of a check node are a consecutive id range and the
//! edges of a variable node are an id list sorted by check index. Both
//! traversals take O(1) per step, and the structure is immutable once
//! built; all mutable per-edge state lives in the decoder.

use crate::spmat::SparseMatrix;
use std::ops::Range;
use thiserror::Error;

/// Graph construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// A row of the matrix has no ones, so the corresponding check node
    /// would constrain nothing.
    #[error("row {0} of the parity check matrix has no ones")]
    ZeroWeightRow(usize),
    /// A column of the matrix has no ones, so the corresponding variable
    /// node would receive no messages.
    #[error("column {0} of the parity check matrix has no ones")]
    ZeroWeightColumn(usize),
}

/// Tanner graph of a parity check matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TannerGraph {
    num_checks: usize,
    num_vars: usize,
    // variable of each edge; edges ordered by (check, variable)
    edge_var: Box<[usize]>,
    row_start: Box<[usize]>,
    // edge ids grouped per variable, ascending check index
    col_edges: Box<[usize]>,
    col_start: Box<[usize]>,
    max_check_degree: usize,
    max_var_degree: usize,
}

impl TannerGraph {
    /// Builds the Tanner graph of a parity check matrix.
    ///
    /// # Errors
    /// Returns an error if any row or column of the matrix has no ones.
    /// This can happen for matrices that went through column pruning or
    /// dependent-row removal.
    pub fn new(h: &SparseMatrix) -> Result<TannerGraph, Error> {
        let num_checks = h.num_rows();
        let num_vars = h.num_cols();
        let mut edge_var = Vec::new();
        let mut row_start = Vec::with_capacity(num_checks + 1);
        row_start.push(0);
        for m in 0..num_checks {
            if h.row_weight(m) == 0 {
                return Err(Error::ZeroWeightRow(m));
            }
            let mut cols: Vec<usize> = h.iter_row(m).copied().collect();
            cols.sort_unstable();
            edge_var.extend_from_slice(&cols);
            row_start.push(edge_var.len());
        }
        let mut per_col: Vec<Vec<usize>> = vec![Vec::new(); num_vars];
        for (e, &v) in edge_var.iter().enumerate() {
            per_col[v].push(e);
        }
        let mut col_edges = Vec::with_capacity(edge_var.len());
        let mut col_start = Vec::with_capacity(num_vars + 1);
        col_start.push(0);
        for (n, edges) in per_col.iter().enumerate() {
            if edges.is_empty() {
                return Err(Error::ZeroWeightColumn(n));
            }
            col_edges.extend_from_slice(edges);
            col_start.push(col_edges.len());
        }
        let max_check_degree = (0..num_checks)
            .map(|m| row_start[m + 1] - row_start[m])
            .max()
            .unwrap_or(0);
        let max_var_degree = (0..num_vars)
            .map(|n| col_start[n + 1] - col_start[n])
            .max()
            .unwrap_or(0);
        Ok(TannerGraph {
            num_checks,
            num_vars,
            edge_var: edge_var.into_boxed_slice(),
            row_start: row_start.into_boxed_slice(),
            col_edges: col_edges.into_boxed_slice(),
            col_start: col_start.into_boxed_slice(),
            max_check_degree,
            max_var_degree,
        })
    }

    /// Returns the number of check nodes (rows).
    pub fn num_checks(&self) -> usize {
        self.num_checks
    }

    /// Returns the number of variable nodes (columns).
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the number of edges (ones of the matrix).
    pub fn num_edges(&self) -> usize {
        self.edge_var.len()
    }

    /// Returns the largest check node degree.
    pub fn max_check_degree(&self) -> usize {
        self.max_check_degree
    }

    /// Returns the largest variable node degree.
    pub fn max_var_degree(&self) -> usize {
        self.max_var_degree
    }

    /// Returns the edge id range of a check node.
    ///
    /// The edges are ordered by ascending variable index.
    pub fn check_edges(&self, check: usize) -> Range<usize> {
        self.row_start[check]..self.row_start[check + 1]
    }

    /// Returns the edge ids of a variable node.
    ///
    /// The edges are ordered by ascending check index.
    pub fn variable_edges(&self, var: usize) -> &[usize] {
        &self.col_edges[self.col_start[var]..self.col_start[var + 1]]
    }

    /// Returns the variable node incident to an edge.
    pub fn edge_variable(&self, edge: usize) -> usize {
        self.edge_var[edge]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spmat::TEST_SPMAT;

    fn test_graph() -> TannerGraph {
        TannerGraph::new(&SparseMatrix::from_spmat(TEST_SPMAT).unwrap()).unwrap()
    }

    #[test]
    fn edge_count_matches_weights() {
        let graph = test_graph();
        assert_eq!(graph.num_checks(), 12);
        assert_eq!(graph.num_vars(), 16);
        assert_eq!(graph.num_edges(), 48);
        assert_eq!(graph.max_check_degree(), 4);
        assert_eq!(graph.max_var_degree(), 3);
        let by_rows: usize = (0..12).map(|m| graph.check_edges(m).len()).sum();
        let by_cols: usize = (0..16).map(|n| graph.variable_edges(n).len()).sum();
        assert_eq!(by_rows, graph.num_edges());
        assert_eq!(by_cols, graph.num_edges());
    }

    #[test]
    fn row_traversal_ascending_variables() {
        let graph = test_graph();
        for m in 0..graph.num_checks() {
            let vars: Vec<usize> = graph.check_edges(m).map(|e| graph.edge_variable(e)).collect();
            assert!(vars.windows(2).all(|w| w[0] < w[1]));
        }
        let row0: Vec<usize> = graph.check_edges(0).map(|e| graph.edge_variable(e)).collect();
        assert_eq!(&row0, &[2, 7, 9, 12]);
    }

    #[test]
    fn column_traversal_ascending_checks() {
        let graph = test_graph();
        let check_of_edge = |e: usize| {
            (0..graph.num_checks())
                .find(|&m| graph.check_edges(m).contains(&e))
                .unwrap()
        };
        for n in 0..graph.num_vars() {
            let checks: Vec<usize> = graph
                .variable_edges(n)
                .iter()
                .map(|&e| check_of_edge(e))
                .collect();
            assert!(checks.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn rejects_zero_weight_column() {
        let mut h = SparseMatrix::new(2, 3);
        h.insert_row(0, [0, 1].iter());
        h.insert_row(1, [0, 1].iter());
        assert_eq!(TannerGraph::new(&h), Err(Error::ZeroWeightColumn(2)));
    }

    #[test]
    fn rejects_zero_weight_row() {
        let mut h = SparseMatrix::new(2, 2);
        h.insert_row(0, [0, 1].iter());
        assert_eq!(TannerGraph::new(&h), Err(Error::ZeroWeightRow(1)));
    }
}
