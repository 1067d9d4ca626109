//! Implementation of the CLI application of ldpc-awgn.

use clap::Parser;
use std::error::Error;

pub mod delcol;
pub mod gauss;
pub mod mkencoder;
pub mod mkmat;
pub mod sim;

/// Trait to run a CLI subcommand.
pub trait Run {
    /// Run the CLI subcommand.
    fn run(&self) -> Result<(), Box<dyn Error>>;
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "ldpc-awgn", about = "Binary LDPC toolkit for the AWGN channel", version)]
pub enum Args {
    /// sim subcommand
    Sim(sim::Args),
    /// mkmat subcommand
    Mkmat(mkmat::Args),
    /// gauss subcommand
    Gauss(gauss::Args),
    /// mkencoder subcommand
    Mkencoder(mkencoder::Args),
    /// delcol subcommand
    Delcol(delcol::Args),
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        match self {
            Args::Sim(x) => x.run(),
            Args::Mkmat(x) => x.run(),
            Args::Gauss(x) => x.run(),
            Args::Mkencoder(x) => x.run(),
            Args::Delcol(x) => x.run(),
        }
    }
}
