//! Simulation CLI subcommand.
//!
//! This subcommand runs a bit/block error rate simulation of iterative
//! decoding over the AWGN channel and prints the result record.

use crate::cli::Run;
use crate::simulation::ber::{Config, Report, Simulation, StopCondition};
use crate::spmat::SparseMatrix;
use clap::Parser;
use console::Term;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Simulation CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Performs a bit/block error rate simulation")]
pub struct Args {
    /// spmat file for the parity check matrix
    file: String,
    /// Eb/N0 (dB)
    snr: f64,
    /// Maximum number of decoder iterations per block
    #[arg(long, default_value = "20")]
    max_iterations: usize,
    /// Seed for the random number generator
    #[arg(long, default_value = "1234")]
    seed: u32,
    /// Stop policy: 0 stops on bit errors, 1 on block errors
    #[arg(long, default_value = "0")]
    stop: u8,
    /// Number of errors at which the simulation stops
    #[arg(long, default_value = "100")]
    errors: u64,
    /// Print the running counters to stderr after every block
    #[arg(long)]
    display: bool,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let h = SparseMatrix::from_spmat(&std::fs::read_to_string(&self.file)?)?;
        let stop = match self.stop {
            0 => StopCondition::BitErrors(self.errors),
            1 => StopCondition::BlockErrors(self.errors),
            _ => return Err("stop mode must be 0 or 1".into()),
        };
        let config = Config {
            snr_db: self.snr,
            max_iterations: self.max_iterations,
            seed: self.seed,
            stop,
            matrix_name: self.file.clone(),
        };
        let mut sim = Simulation::new(&h, config)?;

        // a block is uninterruptible, so only honor Ctrl-C between blocks
        let interrupted = Arc::new(AtomicBool::new(false));
        ctrlc::set_handler({
            let interrupted = interrupted.clone();
            move || interrupted.store(true, Ordering::SeqCst)
        })?;

        let term = Term::stderr();
        let start = Instant::now();
        // the stop condition is tested after each block, so at least one
        // block always runs and the report never divides by zero
        loop {
            sim.step();
            if self.display {
                let elapsed = Duration::from_secs(start.elapsed().as_secs());
                term.write_line(&format!(
                    "{} [{}]",
                    sim.report(),
                    humantime::format_duration(elapsed)
                ))?;
            }
            if sim.done() || interrupted.load(Ordering::SeqCst) {
                break;
            }
        }
        println!("{}", Report::HEADER);
        println!("{}", sim.report());
        Ok(())
    }
}
