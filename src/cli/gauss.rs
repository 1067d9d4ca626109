//! Gauss-Jordan CLI subcommand.
//!
//! This subcommand removes the linearly dependent rows of a parity check
//! matrix, using a lenient Gauss-Jordan reduction over GF(2) as the
//! dependency signal, and prints the resulting matrix in spmat form.

use crate::cli::Run;
use crate::gauss::drop_dependent_rows;
use crate::spmat::SparseMatrix;
use clap::Parser;
use std::error::Error;

/// Gauss-Jordan CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Removes linearly dependent rows of a parity check matrix")]
pub struct Args {
    /// spmat file for the parity check matrix
    pub file: String,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = SparseMatrix::from_spmat(&std::fs::read_to_string(&self.file)?)?;
        let pruned = drop_dependent_rows(&h)?;
        print!("{}", pruned.spmat());
        Ok(())
    }
}
