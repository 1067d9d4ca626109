//! Random regular construction CLI subcommand.

use crate::cli::Run;
use crate::regular;
use clap::Parser;
use std::error::Error;

/// mkmat CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Generates a random regular parity check matrix")]
pub struct Args {
    /// Column weight
    col_weight: usize,
    /// Row weight
    row_weight: usize,
    /// Code length
    length: usize,
    /// Seed for the random number generator
    seed: u32,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = regular::generate(self.col_weight, self.row_weight, self.length, self.seed)?;
        print!("{}", h.spmat());
        Ok(())
    }
}
