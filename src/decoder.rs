//! Probability-domain sum-product decoder.
//!
//! This module implements an iterative belief propagation decoder for the
//! binary-input AWGN channel working directly on probabilities. Check nodes
//! run a forward/backward recursion over the two-state trellis of the
//! single parity check code (the state is the running parity of the bits
//! seen so far), and variable nodes run a downward/upward product recursion
//! over their incident edges. Every recursion step rescales the state pair
//! to sum to one, which prevents underflow without changing the extrinsic
//! outputs.
//!
//! The decoder uses a flooding schedule: in each iteration all check nodes
//! update, then all variable nodes update, then the syndrome of the hard
//! decisions is tested.

use crate::graph::TannerGraph;

/// Smallest value a variable message component may take.
///
/// A component that vanishes after the variable node update is floored to
/// this value and its partner set to the complement, keeping the pair
/// normalized.
pub const CLAMP: f64 = 1e-8;

#[derive(Debug, Copy, Clone, Default)]
struct EdgeMessage {
    // variable -> check, probabilities of 0 and 1
    q0: f64,
    q1: f64,
    // check -> variable, probabilities of 0 and 1
    r0: f64,
    r1: f64,
}

/// Sum-product decoder for a fixed Tanner graph.
///
/// All buffers are allocated on construction and reused across blocks;
/// decoding allocates only the output codeword.
#[derive(Debug, Clone)]
pub struct Decoder {
    graph: TannerGraph,
    messages: Box<[EdgeMessage]>,
    // per-variable channel likelihoods p(y|0) and p(y|1), set per block
    like0: Box<[f64]>,
    like1: Box<[f64]>,
    // per-variable pseudo posterior and hard decision
    posterior0: Box<[f64]>,
    posterior1: Box<[f64]>,
    decision: Box<[u8]>,
    // check node scratch, sized to the largest check degree
    row_like0: Box<[f64]>,
    row_like1: Box<[f64]>,
    row_q0: Box<[f64]>,
    row_q1: Box<[f64]>,
    fwd0: Box<[f64]>,
    fwd1: Box<[f64]>,
    bwd0: Box<[f64]>,
    bwd1: Box<[f64]>,
    // variable node scratch, sized to the largest variable degree
    col_r0: Box<[f64]>,
    col_r1: Box<[f64]>,
    down0: Box<[f64]>,
    down1: Box<[f64]>,
    up0: Box<[f64]>,
    up1: Box<[f64]>,
}

/// Decoder output.
///
/// This struct is returned both when decoding converges to a codeword and
/// when the iteration cap is reached, in which case the hard decisions are
/// returned as they stand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecoderOutput {
    /// Hard decision on every code bit.
    pub codeword: Vec<u8>,
    /// Number of iterations run.
    pub iterations: usize,
    /// Hamming weight of the hard decision vector.
    ///
    /// Under the all-zeros transmission convention of the simulator this is
    /// the number of bit errors in the block.
    pub error_weight: usize,
}

impl Decoder {
    /// Creates a new decoder for a Tanner graph.
    pub fn new(graph: TannerGraph) -> Decoder {
        let num_edges = graph.num_edges();
        let num_vars = graph.num_vars();
        let dc = graph.max_check_degree();
        let dv = graph.max_var_degree();
        Decoder {
            messages: vec![EdgeMessage::default(); num_edges].into_boxed_slice(),
            like0: vec![0.0; num_vars].into_boxed_slice(),
            like1: vec![0.0; num_vars].into_boxed_slice(),
            posterior0: vec![0.0; num_vars].into_boxed_slice(),
            posterior1: vec![0.0; num_vars].into_boxed_slice(),
            decision: vec![0; num_vars].into_boxed_slice(),
            row_like0: vec![0.0; dc].into_boxed_slice(),
            row_like1: vec![0.0; dc].into_boxed_slice(),
            row_q0: vec![0.0; dc].into_boxed_slice(),
            row_q1: vec![0.0; dc].into_boxed_slice(),
            fwd0: vec![0.0; dc + 1].into_boxed_slice(),
            fwd1: vec![0.0; dc + 1].into_boxed_slice(),
            bwd0: vec![0.0; dc + 1].into_boxed_slice(),
            bwd1: vec![0.0; dc + 1].into_boxed_slice(),
            col_r0: vec![0.0; dv].into_boxed_slice(),
            col_r1: vec![0.0; dv].into_boxed_slice(),
            down0: vec![0.0; dv + 1].into_boxed_slice(),
            down1: vec![0.0; dv + 1].into_boxed_slice(),
            up0: vec![0.0; dv + 1].into_boxed_slice(),
            up1: vec![0.0; dv + 1].into_boxed_slice(),
            graph,
        }
    }

    /// Returns the Tanner graph the decoder was built for.
    pub fn graph(&self) -> &TannerGraph {
        &self.graph
    }

    /// Decodes a received word.
    ///
    /// The parameters are the received samples (one per variable node), the
    /// channel noise variance and the maximum number of iterations. If the
    /// hard decisions satisfy all parity checks at the end of some
    /// iteration, an `Ok` with the decoded codeword and the number of
    /// iterations used is returned. Otherwise an `Err` is returned carrying
    /// the hard decisions as they stand after the last iteration.
    ///
    /// # Panics
    /// Panics if `received` does not have one sample per variable node.
    pub fn decode(
        &mut self,
        received: &[f64],
        noise_var: f64,
        max_iterations: usize,
    ) -> Result<DecoderOutput, DecoderOutput> {
        self.prepare(received, noise_var);
        let mut error_weight = 0;
        for iteration in 1..=max_iterations {
            for m in 0..self.graph.num_checks() {
                self.update_check_node(m);
            }
            error_weight = 0;
            for n in 0..self.graph.num_vars() {
                error_weight += self.update_variable_node(n);
            }
            if self.syndrome_is_zero() {
                return Ok(self.output(iteration, error_weight));
            }
        }
        Err(self.output(max_iterations, error_weight))
    }

    /// Loads the channel likelihoods for a block and resets the variable
    /// messages to the uniform unnormalized prior.
    fn prepare(&mut self, received: &[f64], noise_var: f64) {
        assert_eq!(received.len(), self.graph.num_vars());
        // likelihoods exp(y x / var) of the symbols x = +1, -1
        for (n, &y) in received.iter().enumerate() {
            self.like0[n] = (y / noise_var).exp();
            self.like1[n] = (-y / noise_var).exp();
        }
        for msg in self.messages.iter_mut() {
            msg.q0 = 1.0;
            msg.q1 = 1.0;
        }
    }

    /// Check node update: forward/backward recursion over the edges of a
    /// row, in row order, producing the extrinsic messages (r0, r1).
    fn update_check_node(&mut self, check: usize) {
        let edges = self.graph.check_edges(check);
        let d = edges.len();
        for (i, e) in edges.clone().enumerate() {
            let v = self.graph.edge_variable(e);
            self.row_like0[i] = self.like0[v];
            self.row_like1[i] = self.like1[v];
            self.row_q0[i] = self.messages[e].q0;
            self.row_q1[i] = self.messages[e].q1;
        }

        self.fwd0[0] = 1.0;
        self.fwd1[0] = 0.0;
        for i in 1..=d {
            let even = self.row_like0[i - 1] * self.row_q0[i - 1];
            let odd = self.row_like1[i - 1] * self.row_q1[i - 1];
            let t0 = even * self.fwd0[i - 1] + odd * self.fwd1[i - 1];
            let t1 = odd * self.fwd0[i - 1] + even * self.fwd1[i - 1];
            let sum = t0 + t1;
            self.fwd0[i] = t0 / sum;
            self.fwd1[i] = t1 / sum;
        }
        // the cumulative parity of the whole check must be even
        self.fwd1[d] = 0.0;

        self.bwd0[d] = 1.0;
        self.bwd1[d] = 0.0;
        for i in (0..d).rev() {
            let even = self.row_like0[i] * self.row_q0[i];
            let odd = self.row_like1[i] * self.row_q1[i];
            let t0 = even * self.bwd0[i + 1] + odd * self.bwd1[i + 1];
            let t1 = odd * self.bwd0[i + 1] + even * self.bwd1[i + 1];
            let sum = t0 + t1;
            self.bwd0[i] = t0 / sum;
            self.bwd1[i] = t1 / sum;
        }
        self.bwd1[0] = 0.0;

        for (i, e) in edges.enumerate() {
            let msg = &mut self.messages[e];
            msg.r0 = self.fwd0[i] * self.bwd0[i + 1] + self.fwd1[i] * self.bwd1[i + 1];
            msg.r1 = self.fwd0[i] * self.bwd1[i + 1] + self.fwd1[i] * self.bwd0[i + 1];
        }
    }

    /// Variable node update: downward/upward recursion over the edges of a
    /// column, in column order, producing the extrinsic messages (q0, q1),
    /// the pseudo posterior and the hard decision.
    ///
    /// Returns the hard decision bit, so that the caller can accumulate the
    /// error weight of the block.
    fn update_variable_node(&mut self, var: usize) -> usize {
        let edges = self.graph.variable_edges(var);
        let d = edges.len();
        for (i, &e) in edges.iter().enumerate() {
            self.col_r0[i] = self.messages[e].r0;
            self.col_r1[i] = self.messages[e].r1;
        }

        self.down0[0] = 1.0;
        self.down1[0] = 1.0;
        for i in 1..=d {
            let t0 = self.col_r0[i - 1] * self.down0[i - 1];
            let t1 = self.col_r1[i - 1] * self.down1[i - 1];
            let sum = t0 + t1;
            self.down0[i] = t0 / sum;
            self.down1[i] = t1 / sum;
        }

        self.up0[d] = 1.0;
        self.up1[d] = 1.0;
        for i in (0..d).rev() {
            let t0 = self.col_r0[i] * self.up0[i + 1];
            let t1 = self.col_r1[i] * self.up1[i + 1];
            let sum = t0 + t1;
            self.up0[i] = t0 / sum;
            self.up1[i] = t1 / sum;
        }

        for (i, &e) in edges.iter().enumerate() {
            let t0 = self.down0[i] * self.up0[i + 1];
            let t1 = self.down1[i] * self.up1[i + 1];
            let sum = t0 + t1;
            let msg = &mut self.messages[e];
            msg.q0 = t0 / sum;
            msg.q1 = t1 / sum;
            if msg.q0 == 0.0 {
                msg.q0 = CLAMP;
                msg.q1 = 1.0 - CLAMP;
            }
            if msg.q1 == 0.0 {
                msg.q1 = CLAMP;
                msg.q0 = 1.0 - CLAMP;
            }
        }

        let t0 = self.like0[var] * self.up0[0];
        let t1 = self.like1[var] * self.up1[0];
        let sum = t0 + t1;
        self.posterior0[var] = t0 / sum;
        self.posterior1[var] = t1 / sum;
        let bit = u8::from(self.posterior1[var] > self.posterior0[var]);
        self.decision[var] = bit;
        usize::from(bit)
    }

    /// Returns `true` if the hard decisions satisfy every parity check.
    ///
    /// The scan stops at the first violated check.
    fn syndrome_is_zero(&self) -> bool {
        (0..self.graph.num_checks()).all(|m| {
            self.graph
                .check_edges(m)
                .fold(0u8, |parity, e| parity ^ self.decision[self.graph.edge_variable(e)])
                == 0
        })
    }

    fn output(&self, iterations: usize, error_weight: usize) -> DecoderOutput {
        DecoderOutput {
            codeword: self.decision.to_vec(),
            iterations,
            error_weight,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spmat::{SparseMatrix, TEST_SPMAT};

    fn test_decoder() -> Decoder {
        let h = SparseMatrix::from_spmat(TEST_SPMAT).unwrap();
        Decoder::new(TannerGraph::new(&h).unwrap())
    }

    #[test]
    fn check_update_on_noiseless_row() {
        let mut decoder = test_decoder();
        let received = vec![1.0; 16];
        decoder.prepare(&received, 0.5);
        decoder.update_check_node(0);
        for e in decoder.graph.check_edges(0) {
            let msg = decoder.messages[e];
            assert!((msg.r0 + msg.r1 - 1.0).abs() < 1e-12);
            assert!(msg.r0 > msg.r1);
        }
    }

    #[test]
    fn noiseless_word_decodes_in_one_iteration() {
        let mut decoder = test_decoder();
        let received = vec![1.0; 16];
        let out = decoder.decode(&received, 0.05, 20).unwrap();
        assert_eq!(out.iterations, 1);
        assert_eq!(out.error_weight, 0);
        assert!(out.codeword.iter().all(|&b| b == 0));
    }

    #[test]
    fn messages_normalized_after_decode() {
        let mut decoder = test_decoder();
        let mut received = vec![1.0; 16];
        received[3] = -0.4;
        received[9] = 0.1;
        let _ = decoder.decode(&received, 0.5, 20);
        for msg in decoder.messages.iter() {
            assert!((msg.r0 + msg.r1 - 1.0).abs() < 1e-12);
            assert!((msg.q0 + msg.q1 - 1.0).abs() < 1e-12);
        }
        for n in 0..16 {
            assert!((decoder.posterior0[n] + decoder.posterior1[n] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn vanished_messages_are_clamped() {
        // with this variance the odd-parity message components underflow to
        // exactly zero and must come out clamped
        let mut decoder = test_decoder();
        let received = vec![1.0; 16];
        decoder.decode(&received, 0.005, 20).unwrap();
        for msg in decoder.messages.iter() {
            assert!(msg.q0 != 0.0 && msg.q1 != 0.0);
            assert!((CLAMP..=1.0 - CLAMP).contains(&msg.q0));
            assert!((CLAMP..=1.0 - CLAMP).contains(&msg.q1));
        }
    }

    #[test]
    fn syndrome_zero_implies_codeword() {
        let h = SparseMatrix::from_spmat(TEST_SPMAT).unwrap();
        let mut decoder = Decoder::new(TannerGraph::new(&h).unwrap());
        let mut received = vec![1.0; 16];
        received[0] = -0.2;
        received[7] = 0.05;
        if let Ok(out) = decoder.decode(&received, 0.5, 20) {
            for m in 0..h.num_rows() {
                let parity = h.iter_row(m).fold(0u8, |acc, &c| acc ^ out.codeword[c]);
                assert_eq!(parity, 0);
            }
        }
    }

    #[test]
    fn invariant_under_column_permutation() {
        let h = SparseMatrix::from_spmat(TEST_SPMAT).unwrap();
        // rotate the columns by five positions
        let perm: Vec<usize> = (0..16).map(|n| (n + 5) % 16).collect();
        let mut hp = SparseMatrix::new(12, 16);
        for (m, n) in h.iter_all() {
            hp.insert(m, perm[n]);
        }
        let mut received = vec![1.0; 16];
        received[2] = -0.3;
        received[11] = 0.2;
        let mut permuted = vec![0.0; 16];
        for n in 0..16 {
            permuted[perm[n]] = received[n];
        }
        let mut decoder = Decoder::new(TannerGraph::new(&h).unwrap());
        let mut decoder_p = Decoder::new(TannerGraph::new(&hp).unwrap());
        let a = decoder.decode(&received, 0.5, 20);
        let b = decoder_p.decode(&permuted, 0.5, 20);
        let (a, b) = (a.unwrap_or_else(|e| e), b.unwrap_or_else(|e| e));
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.error_weight, b.error_weight);
        for n in 0..16 {
            assert_eq!(a.codeword[n], b.codeword[perm[n]]);
        }
    }
}
