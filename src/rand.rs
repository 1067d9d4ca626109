//! # Reproducible random functions
//!
//! This module uses the [`ChaCha8Rng`] RNG from the [rand_chacha] crate to
//! achieve reproducible random number generation. Simulations and matrix
//! constructions are seeded with a 32-bit integer, which is widened into the
//! 64-bit seed of the RNG, so identical inputs yield identical results
//! across runs.
//!
//! # Examples
//! ```
//! # use ldpc_awgn::rand::Rng;
//! # use ldpc_awgn::rand::*;
//! let mut rng = Rng::seed_from_u64(1234);
//! let a = rng.next_u64();
//! let b = Rng::seed_from_u64(1234).next_u64();
//! assert_eq!(a, b);
//! ```
use rand_chacha::ChaCha8Rng;
pub use rand_chacha::rand_core::SeedableRng;
pub use rand_core::RngCore;

/// The RNG used throughout this crate for algorithms using pseudorandom
/// generation.
pub type Rng = ChaCha8Rng;

/// Creates the crate RNG from a 32-bit seed.
pub fn from_seed(seed: u32) -> Rng {
    Rng::seed_from_u64(u64::from(seed))
}
