//! Simulation.
//!
//! This module contains utilities to simulate the bit and block error rates
//! of iterative decoding on a binary-input AWGN channel.

pub mod ber;
pub mod channel;
