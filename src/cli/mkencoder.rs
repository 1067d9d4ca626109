//! Encoder derivation CLI subcommand.
//!
//! This subcommand derives the encoder/decoder matrix pair of a parity
//! check matrix and writes them next to the input file with the `.enc` and
//! `.dec` extensions appended.

use crate::cli::Run;
use crate::encoder::derive_pair;
use crate::spmat::SparseMatrix;
use clap::Parser;
use std::error::Error;

/// mkencoder CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Derives an encoder/decoder matrix pair")]
pub struct Args {
    /// spmat file for the parity check matrix
    pub file: String,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = SparseMatrix::from_spmat(&std::fs::read_to_string(&self.file)?)?;
        let pair = derive_pair(&h)?;
        let encoder_path = format!("{}.enc", self.file);
        let decoder_path = format!("{}.dec", self.file);
        std::fs::write(&encoder_path, pair.encoder.spmat())?;
        std::fs::write(&decoder_path, pair.decoder.spmat())?;
        println!("encoder = {}", encoder_path);
        println!("decoder = {}", decoder_path);
        Ok(())
    }
}
