//! # Sparse binary matrix representation and functions
//!
//! This module implements a representation for sparse binary matrices based
//! on the spmat text format used to interchange LDPC parity check matrices.
//!
//! The spmat format is a whitespace-delimited token stream laid out as:
//!
//! ```text
//! N M
//! dc_max dv_max
//! dc[0] ... dc[M-1]
//! dv[0] ... dv[N-1]
//! <row 0: dc[0] column indices, 1-indexed, ascending>
//! ...
//! <row M-1>
//! ```
//!
//! where `N` is the number of columns (code length), `M` the number of rows
//! (parity checks), `dc[m]` the weight of row `m` and `dv[n]` the weight of
//! column `n`.

use std::borrow::Borrow;
use std::fmt::Write;
use std::slice::Iter;
use thiserror::Error;

mod prune;

/// spmat format error.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The token stream ended before the matrix was complete.
    #[error("spmat data ends unexpectedly")]
    UnexpectedEof,
    /// A token could not be parsed as a number.
    #[error("token {0:?} is not a number")]
    NotANumber(String),
    /// A row lists a column index outside `1..=N`.
    #[error("column index {index} out of range in row {row}")]
    ColumnOutOfRange {
        /// Row containing the offending index.
        row: usize,
        /// The 1-indexed column value read from the file.
        index: usize,
    },
    /// A row does not list its column indices in strictly ascending order.
    #[error("column indices of row {0} are not strictly ascending")]
    RowNotAscending(usize),
    /// A declared column weight does not match the row lists.
    #[error("column {col} has weight {found} but the header declares {declared}")]
    ColumnWeightMismatch {
        /// The offending column.
        col: usize,
        /// Weight computed from the row lists.
        found: usize,
        /// Weight declared on line 4.
        declared: usize,
    },
    /// The declared maximum weights do not match the weight lists.
    #[error("declared maximum weights ({0}, {1}) do not match the matrix")]
    MaxWeightMismatch(usize, usize),
}

/// A [`Result`] type for spmat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A sparse binary matrix.
///
/// The matrix stores the positions of its one entries both by row and by
/// column, so that both directions can be traversed in O(1) per step.
#[derive(Eq, Debug, Clone)]
pub struct SparseMatrix {
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
}

impl PartialEq for SparseMatrix {
    fn eq(&self, other: &SparseMatrix) -> bool {
        if self.num_rows() != other.num_rows() || self.num_cols() != other.num_cols() {
            return false;
        }
        self.rows.iter().zip(other.rows.iter()).all(|(r1, r2)| {
            let mut r1 = r1.clone();
            let mut r2 = r2.clone();
            r1.sort_unstable();
            r2.sort_unstable();
            r1 == r2
        })
    }
}

impl SparseMatrix {
    /// Create a new sparse matrix of a given size.
    ///
    /// The matrix is initialized to the zero matrix.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_awgn::spmat::SparseMatrix;
    /// let h = SparseMatrix::new(12, 16);
    /// assert_eq!(h.num_rows(), 12);
    /// assert_eq!(h.num_cols(), 16);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> SparseMatrix {
        use std::iter::repeat_with;
        let rows = repeat_with(Vec::new).take(nrows).collect();
        let cols = repeat_with(Vec::new).take(ncols).collect();
        SparseMatrix { rows, cols }
    }

    /// Returns the number of rows of the matrix.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns of the matrix.
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Returns the row weight of `row`.
    ///
    /// The row weight is the number of entries equal to one in a particular
    /// row. Rows are indexed starting from zero.
    pub fn row_weight(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    /// Returns the column weight of `col`.
    pub fn col_weight(&self, col: usize) -> usize {
        self.cols[col].len()
    }

    /// Returns the largest row weight of the matrix.
    pub fn max_row_weight(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Returns the largest column weight of the matrix.
    pub fn max_col_weight(&self) -> usize {
        self.cols.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Returns `true` if the entry at a particular row and column is a one.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        // typically columns are shorter, so we search in the column
        self.cols[col].contains(&row)
    }

    /// Inserts a one in a particular row and column.
    ///
    /// If there is already a one in this row and column, this function does
    /// nothing.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_awgn::spmat::SparseMatrix;
    /// let mut h = SparseMatrix::new(12, 16);
    /// assert!(!h.contains(3, 7));
    /// h.insert(3, 7);
    /// assert!(h.contains(3, 7));
    /// ```
    pub fn insert(&mut self, row: usize, col: usize) {
        if !self.contains(row, col) {
            self.rows[row].push(col);
            self.cols[col].push(row);
        }
    }

    /// Inserts ones in particular columns of a row.
    ///
    /// The effect is as calling [`insert`](Self::insert) on each of the
    /// elements of the iterator `cols`.
    pub fn insert_row<T, S>(&mut self, row: usize, cols: T)
    where
        T: Iterator<Item = S>,
        S: Borrow<usize>,
    {
        for col in cols {
            self.insert(row, *col.borrow());
        }
    }

    /// Returns an [Iterator] over the indices of the entries equal to one in
    /// the whole matrix.
    pub fn iter_all(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(j, r)| r.iter().map(move |&k| (j, k)))
    }

    /// Returns an [Iterator] over the entries equal to one in a particular
    /// row.
    pub fn iter_row(&self, row: usize) -> Iter<'_, usize> {
        self.rows[row].iter()
    }

    /// Returns an [Iterator] over the entries equal to one in a particular
    /// column.
    pub fn iter_col(&self, col: usize) -> Iter<'_, usize> {
        self.cols[col].iter()
    }

    /// Writes the matrix in spmat format to a writer.
    ///
    /// The column indices of each row are written in ascending order,
    /// regardless of insertion order.
    ///
    /// # Errors
    /// If a call to `write!()` returns an error, this function returns such
    /// an error.
    pub fn write_spmat<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        writeln!(w, "{} {}", self.num_cols(), self.num_rows())?;
        writeln!(w, "{} {}", self.max_row_weight(), self.max_col_weight())?;
        write_list(w, self.rows.iter().map(|r| r.len()))?;
        write_list(w, self.cols.iter().map(|c| c.len()))?;
        for row in &self.rows {
            let mut v = row.clone();
            v.sort_unstable();
            write_list(w, v.iter().map(|x| x + 1))?;
        }
        Ok(())
    }

    /// Returns a [`String`] with the spmat representation of the matrix.
    pub fn spmat(&self) -> String {
        let mut s = String::new();
        self.write_spmat(&mut s).unwrap();
        s
    }

    /// Constructs and returns a sparse matrix from its spmat representation.
    ///
    /// The weights declared in the header are checked against the row lists;
    /// an inconsistent file is rejected.
    ///
    /// # Errors
    /// If an error is found while parsing `spmat`, an [`Error`] describing
    /// the problem is returned.
    pub fn from_spmat(spmat: &str) -> Result<SparseMatrix> {
        let mut tokens = spmat.split_whitespace();
        let ncols = next_number(&mut tokens)?;
        let nrows = next_number(&mut tokens)?;
        let max_row = next_number(&mut tokens)?;
        let max_col = next_number(&mut tokens)?;
        let mut row_weights = Vec::with_capacity(nrows);
        for _ in 0..nrows {
            row_weights.push(next_number(&mut tokens)?);
        }
        let mut col_weights = Vec::with_capacity(ncols);
        for _ in 0..ncols {
            col_weights.push(next_number(&mut tokens)?);
        }
        let mut h = SparseMatrix::new(nrows, ncols);
        for (row, &weight) in row_weights.iter().enumerate() {
            let mut previous = None;
            for _ in 0..weight {
                let index = next_number(&mut tokens)?;
                if index == 0 || index > ncols {
                    return Err(Error::ColumnOutOfRange { row, index });
                }
                let col = index - 1;
                if previous.is_some_and(|p| p >= col) {
                    return Err(Error::RowNotAscending(row));
                }
                previous = Some(col);
                h.insert(row, col);
            }
        }
        for (col, &declared) in col_weights.iter().enumerate() {
            let found = h.col_weight(col);
            if found != declared {
                return Err(Error::ColumnWeightMismatch {
                    col,
                    found,
                    declared,
                });
            }
        }
        if max_row != h.max_row_weight() || max_col != h.max_col_weight() {
            return Err(Error::MaxWeightMismatch(max_row, max_col));
        }
        Ok(h)
    }
}

fn next_number<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<usize> {
    let token = tokens.next().ok_or(Error::UnexpectedEof)?;
    token
        .parse()
        .map_err(|_| Error::NotANumber(token.to_string()))
}

fn write_list<W: Write, T: std::fmt::Display>(
    w: &mut W,
    mut items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    if let Some(x) = items.next() {
        write!(w, "{}", x)?;
    }
    for x in items {
        write!(w, " {}", x)?;
    }
    writeln!(w)
}

/// The 16x12 example matrix from the spmat format documentation.
///
/// This (3,4)-regular matrix is handy for tests and doctests.
#[cfg(test)]
pub(crate) const TEST_SPMAT: &str = "\
16 12
4 3
4 4 4 4 4 4 4 4 4 4 4 4
3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3
3 8 10 13
4 7 9 13
2 5 7 10
4 6 11 14
3 9 15 16
1 6 9 10
4 8 12 15
2 6 12 16
1 7 14 16
3 5 12 14
2 11 13 15
1 5 8 11
";
