//! Encoder/decoder matrix pair derivation.
//!
//! An LDPC code given by a parity check matrix H is made encodable by
//! reducing H over GF(2) and permuting columns so that each reduced row has
//! its leader at the matching diagonal position. The permuted reduced matrix
//! (the "encoder") has an upper unitriangular prefix, so the first
//! `num_rows` code bits can be obtained by back-substitution from the
//! remaining, systematic, bits. The same column permutation applied to the
//! original H gives the "decoder" matrix, which keeps the sparsity of H and
//! is the one that should drive belief propagation.

use crate::{gauss, gf2::GF2, spmat::SparseMatrix};
use ndarray::Array2;
use num_traits::{One, Zero};
use thiserror::Error;

/// Encoder derivation error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The parity check matrix does not have full rank, so the column
    /// permutation cannot be constructed.
    #[error("the parity check matrix does not have full rank")]
    NotFullRank,
}

/// An encoder/decoder matrix pair for a common column permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderPair {
    /// Permuted reduced parity check matrix, with row `m` having its leader
    /// in column `m`.
    pub encoder: SparseMatrix,
    /// Permuted original parity check matrix, in the original row order.
    pub decoder: SparseMatrix,
}

/// Derives the encoder/decoder pair of a parity check matrix.
///
/// # Errors
/// Returns [`Error::NotFullRank`] if the Gauss-Jordan reduction finds a
/// linearly dependent row.
pub fn derive_pair(h: &SparseMatrix) -> Result<EncoderPair, Error> {
    let reduced = gauss::reduce_full_rank(h).map_err(|_| Error::NotFullRank)?;
    let nrows = h.num_rows();
    let ncols = h.num_cols();

    // sort the reduced rows by leader
    let mut order: Vec<usize> = (0..nrows).collect();
    order.sort_unstable_by_key(|&m| gauss::leader(&reduced, m));

    // Swap each leader into its row position. Leaders are distinct and
    // ascending after the sort, so position m is never touched again once
    // row m has been processed.
    let mut col_perm: Vec<usize> = (0..ncols).collect();
    for (m, &row) in order.iter().enumerate() {
        let lead = gauss::leader(&reduced, row).expect("full rank rows are nonzero");
        if lead != m {
            col_perm.swap(m, lead);
        }
    }
    let mut inv_perm = vec![0; ncols];
    for (n, &c) in col_perm.iter().enumerate() {
        inv_perm[c] = n;
    }

    let mut encoder = SparseMatrix::new(nrows, ncols);
    for (m, &row) in order.iter().enumerate() {
        encoder.insert_row(m, reduced.iter_row(row).map(|&c| inv_perm[c]));
    }
    let mut decoder = SparseMatrix::new(nrows, ncols);
    for m in 0..nrows {
        decoder.insert_row(m, h.iter_row(m).map(|&c| inv_perm[c]));
    }
    Ok(EncoderPair { encoder, decoder })
}

impl EncoderPair {
    /// Number of information bits of the code.
    pub fn num_info_bits(&self) -> usize {
        self.encoder.num_cols() - self.encoder.num_rows()
    }

    /// Encodes a message into a codeword.
    ///
    /// The message occupies the last `num_info_bits` positions of the
    /// codeword; the first `num_rows` positions are parity bits obtained by
    /// back-substitution over the encoder rows, which have an upper
    /// unitriangular prefix.
    ///
    /// # Panics
    /// Panics if `message` does not have `num_info_bits` elements or
    /// contains values other than 0 and 1.
    pub fn encode(&self, message: &[u8]) -> Vec<u8> {
        let nrows = self.encoder.num_rows();
        let ncols = self.encoder.num_cols();
        assert_eq!(message.len(), ncols - nrows);
        assert!(message.iter().all(|&b| b <= 1));
        let mut codeword = vec![0u8; ncols];
        codeword[nrows..].copy_from_slice(message);
        for m in (0..nrows).rev() {
            let parity = self
                .encoder
                .iter_row(m)
                .filter(|&&c| c > m)
                .fold(0, |acc, &c| acc ^ codeword[c]);
            codeword[m] = parity;
        }
        codeword
    }

    /// Returns the dense generator matrix induced by the encoder.
    ///
    /// Row `k` of the generator is the codeword of the `k`-th unit message,
    /// in the permuted coordinates shared by the encoder and decoder
    /// matrices.
    pub fn generator_matrix(&self) -> Array2<GF2> {
        let k = self.num_info_bits();
        let n = self.encoder.num_cols();
        let mut gen = Array2::from_elem((k, n), GF2::zero());
        let mut message = vec![0u8; k];
        for j in 0..k {
            message[j] = 1;
            for (c, &bit) in self.encode(&message).iter().enumerate() {
                gen[[j, c]] = GF2::new(bit);
            }
            message[j] = 0;
        }
        gen
    }

    /// Computes the product of the decoder matrix with the transposed
    /// generator over GF(2).
    ///
    /// The product is the zero matrix exactly when every codeword produced
    /// by the encoder satisfies every parity check of the decoder matrix.
    pub fn consistency_check(&self) -> Array2<GF2> {
        let nrows = self.decoder.num_rows();
        let ncols = self.decoder.num_cols();
        let mut h = Array2::from_elem((nrows, ncols), GF2::zero());
        for (m, n) in self.decoder.iter_all() {
            h[[m, n]] = GF2::one();
        }
        h.dot(&self.generator_matrix().t())
    }

    /// Returns `true` if [`consistency_check`](Self::consistency_check)
    /// yields the zero matrix.
    pub fn is_consistent(&self) -> bool {
        self.consistency_check().iter().all(|x| x.is_zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::{Rng, SeedableRng};
    use crate::spmat::TEST_SPMAT;
    use rand::Rng as _;

    fn test_matrix() -> SparseMatrix {
        SparseMatrix::from_spmat(TEST_SPMAT).unwrap()
    }

    fn syndrome_is_zero(h: &SparseMatrix, word: &[u8]) -> bool {
        (0..h.num_rows()).all(|m| h.iter_row(m).fold(0, |acc, &c| acc ^ word[c]) == 0)
    }

    #[test]
    fn leaders_on_the_diagonal() {
        let pair = derive_pair(&test_matrix()).unwrap();
        for m in 0..pair.encoder.num_rows() {
            assert_eq!(gauss::leader(&pair.encoder, m), Some(m));
        }
    }

    #[test]
    fn decoder_is_a_column_permutation() {
        let h = test_matrix();
        let pair = derive_pair(&h).unwrap();
        assert_eq!(pair.decoder.num_rows(), h.num_rows());
        assert_eq!(pair.decoder.num_cols(), h.num_cols());
        for m in 0..h.num_rows() {
            assert_eq!(pair.decoder.row_weight(m), h.row_weight(m));
        }
        let mut weights: Vec<_> = (0..h.num_cols()).map(|n| pair.decoder.col_weight(n)).collect();
        weights.sort_unstable();
        let mut expected: Vec<_> = (0..h.num_cols()).map(|n| h.col_weight(n)).collect();
        expected.sort_unstable();
        assert_eq!(weights, expected);
    }

    #[test]
    fn codewords_satisfy_both_matrices() {
        let pair = derive_pair(&test_matrix()).unwrap();
        let mut rng = Rng::seed_from_u64(0);
        for _ in 0..20 {
            let message: Vec<u8> = (0..pair.num_info_bits())
                .map(|_| rng.gen_range(0..=1))
                .collect();
            let codeword = pair.encode(&message);
            assert_eq!(&codeword[pair.encoder.num_rows()..], &message[..]);
            assert!(syndrome_is_zero(&pair.encoder, &codeword));
            assert!(syndrome_is_zero(&pair.decoder, &codeword));
        }
    }

    #[test]
    fn decoder_annihilates_the_generator() {
        let pair = derive_pair(&test_matrix()).unwrap();
        let product = pair.consistency_check();
        assert_eq!(product.dim(), (12, 4));
        assert!(product.iter().all(|x| x.is_zero()));
        assert!(pair.is_consistent());
    }

    #[test]
    fn generator_is_systematic() {
        let pair = derive_pair(&test_matrix()).unwrap();
        let gen = pair.generator_matrix();
        let nrows = pair.encoder.num_rows();
        assert_eq!(gen.dim(), (4, 16));
        for j in 0..pair.num_info_bits() {
            for k in 0..pair.num_info_bits() {
                let expected = if j == k { GF2::one() } else { GF2::zero() };
                assert_eq!(gen[[j, nrows + k]], expected);
            }
        }
    }

    #[test]
    fn zero_message_encodes_to_zero() {
        let pair = derive_pair(&test_matrix()).unwrap();
        let codeword = pair.encode(&vec![0; pair.num_info_bits()]);
        assert!(codeword.iter().all(|&b| b == 0));
    }
}
