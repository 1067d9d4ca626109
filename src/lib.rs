//! # LDPC AWGN
//!
//! `ldpc_awgn` is a research toolkit for binary LDPC codes on the
//! binary-input AWGN channel. It contains a sparse parity check matrix
//! representation with a plain-text interchange format, Gauss-Jordan
//! reduction over GF(2), derivation of encoder/decoder matrix pairs,
//! random regular code construction, a probability-domain sum-product
//! decoder, and a Monte-Carlo bit/block error rate simulator.

pub mod cli;
pub mod decoder;
pub mod encoder;
pub mod gauss;
pub mod gf2;
pub mod graph;
pub mod rand;
pub mod regular;
pub mod simulation;
pub mod spmat;
