//! Channel simulation.
//!
//! This module contains the simulation of a binary-input AWGN channel under
//! the convention that the all-zeros codeword is transmitted with the BPSK
//! mapping 0 ↦ +1, 1 ↦ -1, so every received sample is `1 + z` with `z`
//! Gaussian.
//!
//! The Gaussian samples are produced with the Marsaglia polar method. The
//! method generates samples in pairs from two uniform draws; the second
//! sample of a pair is held over and returned by the next call, also across
//! block boundaries, so restarting a block does not bias the stream.

use rand::Rng;
use rand_distr::Open01;

/// AWGN channel simulation.
///
/// This struct is used to sample received words for a fixed noise variance.
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    sigma: f64,
    spare: Option<f64>,
}

impl AwgnChannel {
    /// Creates a new AWGN channel with a given noise variance.
    ///
    /// # Panics
    ///
    /// This function panics if `noise_var` is not a nonnegative finite
    /// number.
    pub fn new(noise_var: f64) -> AwgnChannel {
        assert!(noise_var.is_finite() && noise_var >= 0.0);
        AwgnChannel {
            sigma: noise_var.sqrt(),
            spare: None,
        }
    }

    /// Returns one sample of zero-mean Gaussian noise.
    pub fn sample<R: Rng>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.spare.take() {
            return z * self.sigma;
        }
        loop {
            let u = 2.0 * rng.sample::<f64, _>(Open01) - 1.0;
            let v = 2.0 * rng.sample::<f64, _>(Open01) - 1.0;
            let s = u * u + v * v;
            if s <= 1.0 && s != 0.0 {
                let f = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * f);
                return u * f * self.sigma;
            }
        }
    }

    /// Fills `received` with the samples of one transmitted block.
    ///
    /// The transmitted word is assumed to be all zeros, so every sample is
    /// `1 + z` with `z` drawn from the channel noise.
    pub fn fill_received<R: Rng>(&mut self, rng: &mut R, received: &mut [f64]) {
        for y in received.iter_mut() {
            *y = 1.0 + self.sample(rng);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::from_seed;

    #[test]
    fn zero_variance() {
        let mut channel = AwgnChannel::new(0.0);
        let mut rng = from_seed(0);
        let mut received = vec![0.0; 64];
        channel.fill_received(&mut rng, &mut received);
        assert!(received.iter().all(|&y| y == 1.0));
    }

    #[test]
    #[should_panic]
    fn negative_variance() {
        let _channel = AwgnChannel::new(-0.5);
    }

    #[test]
    fn repeatable() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        for out in [&mut a, &mut b] {
            let mut channel = AwgnChannel::new(1.0);
            let mut rng = from_seed(77);
            for _ in 0..100 {
                out.push(channel.sample(&mut rng));
            }
        }
        assert_eq!(a, b);
    }

    #[test]
    fn sample_moments() {
        let mut channel = AwgnChannel::new(2.0);
        let mut rng = from_seed(1);
        let n = 20000;
        let samples: Vec<f64> = (0..n).map(|_| channel.sample(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|z| (z - mean) * (z - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.1);
        assert!((var - 2.0).abs() < 0.2);
    }
}
