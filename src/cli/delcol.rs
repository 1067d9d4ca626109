//! Column pruning CLI subcommand.

use crate::cli::Run;
use crate::spmat::SparseMatrix;
use clap::Parser;
use std::error::Error;

/// delcol CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Deletes columns with pairwise row overlap greater than one")]
pub struct Args {
    /// spmat file for the parity check matrix
    pub file: String,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = SparseMatrix::from_spmat(&std::fs::read_to_string(&self.file)?)?;
        print!("{}", h.prune_overlapping_columns().spmat());
        Ok(())
    }
}
