//! Error rate simulation.
//!
//! This module contains the Monte-Carlo driver that transmits blocks over
//! the AWGN channel, decodes them, and accumulates bit and block error
//! counters until a stop condition is met.

use super::channel::AwgnChannel;
use crate::{
    decoder::Decoder,
    graph::{self, TannerGraph},
    rand::{from_seed, Rng},
    spmat::SparseMatrix,
};
use std::fmt;
use thiserror::Error;

/// Simulation setup error.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The parity check matrix has at least as many rows as columns, so the
    /// code rate is not positive and the noise variance is undefined.
    #[error("the code has no information bits (M >= N)")]
    RateNotPositive,
    /// The parity check matrix could not be turned into a Tanner graph.
    #[error(transparent)]
    Graph(#[from] graph::Error),
}

/// Stop condition of a simulation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StopCondition {
    /// Stop as soon as the bit error counter reaches the threshold.
    BitErrors(u64),
    /// Stop as soon as the block error counter reaches the threshold.
    BlockErrors(u64),
}

impl StopCondition {
    /// Returns the mode number of the condition (0 for bit errors, 1 for
    /// block errors), as used in the result record.
    pub fn mode(&self) -> u8 {
        match self {
            StopCondition::BitErrors(_) => 0,
            StopCondition::BlockErrors(_) => 1,
        }
    }

    /// Returns the error threshold of the condition.
    pub fn threshold(&self) -> u64 {
        match *self {
            StopCondition::BitErrors(t) | StopCondition::BlockErrors(t) => t,
        }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Eb/N0 in dB.
    pub snr_db: f64,
    /// Maximum number of decoder iterations per block.
    pub max_iterations: usize,
    /// Seed of the random number generator.
    pub seed: u32,
    /// Stop condition.
    pub stop: StopCondition,
    /// Name of the parity check matrix, echoed in the result record.
    pub matrix_name: String,
}

/// Monte-Carlo error rate simulation.
#[derive(Debug)]
pub struct Simulation {
    decoder: Decoder,
    channel: AwgnChannel,
    rng: Rng,
    received: Vec<f64>,
    noise_var: f64,
    config: Config,
    total_blocks: u64,
    error_blocks: u64,
    total_bits: u64,
    error_bits: u64,
    total_iterations: u64,
}

impl Simulation {
    /// Creates a new simulation for a parity check matrix.
    ///
    /// The noise variance per channel use is derived from the configured
    /// Eb/N0 and the code rate `(N - M) / N`.
    ///
    /// # Errors
    /// Returns an error if the matrix has a zero-weight row or column, or
    /// if its rate is not positive.
    pub fn new(h: &SparseMatrix, config: Config) -> Result<Simulation, Error> {
        let graph = TannerGraph::new(h)?;
        let n = graph.num_vars();
        let m = graph.num_checks();
        if m >= n {
            return Err(Error::RateNotPositive);
        }
        let noise_var =
            0.5 * 10.0_f64.powf(-config.snr_db / 10.0) * n as f64 / ((n - m) as f64);
        let rng = from_seed(config.seed);
        Ok(Simulation {
            decoder: Decoder::new(graph),
            channel: AwgnChannel::new(noise_var),
            rng,
            received: vec![0.0; n],
            noise_var,
            config,
            total_blocks: 0,
            error_blocks: 0,
            total_bits: 0,
            error_bits: 0,
            total_iterations: 0,
        })
    }

    /// Returns the noise variance per channel use.
    pub fn noise_var(&self) -> f64 {
        self.noise_var
    }

    /// Simulates one block and returns its error weight.
    ///
    /// A decoding failure is not an error: the hard decisions after the
    /// last iteration are counted as they stand.
    pub fn step(&mut self) -> usize {
        let n = self.decoder.graph().num_vars();
        self.total_blocks += 1;
        self.total_bits += n as u64;
        self.channel.fill_received(&mut self.rng, &mut self.received);
        let output = self
            .decoder
            .decode(&self.received, self.noise_var, self.config.max_iterations)
            .unwrap_or_else(|failed| failed);
        self.total_iterations += output.iterations as u64;
        self.error_bits += output.error_weight as u64;
        if output.error_weight > 0 {
            self.error_blocks += 1;
        }
        output.error_weight
    }

    /// Returns `true` once the stop condition has been reached.
    pub fn done(&self) -> bool {
        match self.config.stop {
            StopCondition::BitErrors(threshold) => self.error_bits >= threshold,
            StopCondition::BlockErrors(threshold) => self.error_blocks >= threshold,
        }
    }

    /// Runs blocks until the stop condition is reached.
    ///
    /// The condition is tested after each block, so at least one block is
    /// always simulated, even with a zero threshold. At low noise this can
    /// take a very long time, since errors may be rare. Callers that need
    /// to remain interruptible should drive [`step`](Self::step)
    /// themselves.
    pub fn run(&mut self) {
        loop {
            self.step();
            if self.done() {
                break;
            }
        }
    }

    /// Returns the result record with the counters accumulated so far.
    pub fn report(&self) -> Report {
        Report {
            snr_db: self.config.snr_db,
            bit_error_rate: self.error_bits as f64 / self.total_bits as f64,
            block_error_rate: self.error_blocks as f64 / self.total_blocks as f64,
            noise_var: self.noise_var,
            error_bits: self.error_bits,
            total_bits: self.total_bits,
            error_blocks: self.error_blocks,
            total_blocks: self.total_blocks,
            average_iterations: self.total_iterations as f64 / self.total_blocks as f64,
            seed: self.config.seed,
            max_iterations: self.config.max_iterations,
            code_length: self.decoder.graph().num_vars(),
            num_checks: self.decoder.graph().num_checks(),
            matrix_name: self.config.matrix_name.clone(),
            stop_mode: self.config.stop.mode(),
            stop_threshold: self.config.stop.threshold(),
        }
    }
}

/// Simulation result record.
///
/// The [`Display`](fmt::Display) implementation prints the record as a
/// single space-separated line. Bit errors are counted over the whole
/// codeword, not only over the information bits, so the reported bit error
/// rate is not the traditional post-decoding information bit error rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Eb/N0 in dB.
    pub snr_db: f64,
    /// Bit error rate (errors over the whole word).
    pub bit_error_rate: f64,
    /// Block error rate.
    pub block_error_rate: f64,
    /// Noise variance per channel use.
    pub noise_var: f64,
    /// Number of bit errors.
    pub error_bits: u64,
    /// Number of transmitted bits.
    pub total_bits: u64,
    /// Number of block errors.
    pub error_blocks: u64,
    /// Number of transmitted blocks.
    pub total_blocks: u64,
    /// Average number of decoder iterations per block.
    pub average_iterations: f64,
    /// Seed of the random number generator.
    pub seed: u32,
    /// Maximum number of decoder iterations per block.
    pub max_iterations: usize,
    /// Code length N.
    pub code_length: usize,
    /// Number of parity checks M.
    pub num_checks: usize,
    /// Name of the parity check matrix.
    pub matrix_name: String,
    /// Stop mode (0 for bit errors, 1 for block errors).
    pub stop_mode: u8,
    /// Stop threshold.
    pub stop_threshold: u64,
}

impl Report {
    /// Header line naming the fields of the record.
    pub const HEADER: &'static str =
        "#snr pb pB var #ebits #bits #eblks #blks aveitr seed maxitr N M file stop #err";
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.12e} {:.12e} {:.12e} {:.12e} {} {} {} {} {:.6} {} {} {} {} {} {} {}",
            self.snr_db,
            self.bit_error_rate,
            self.block_error_rate,
            self.noise_var,
            self.error_bits,
            self.total_bits,
            self.error_blocks,
            self.total_blocks,
            self.average_iterations,
            self.seed,
            self.max_iterations,
            self.code_length,
            self.num_checks,
            self.matrix_name,
            self.stop_mode,
            self.stop_threshold,
        )
    }
}
