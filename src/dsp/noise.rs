//! Noise source backed by PCG32.
//!
//! All randomness in effect rendering flows through [`NoiseSource`], so a
//! seeded source makes a render byte-for-byte reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random draws used by the effect generators.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: Pcg32,
}

impl NoiseSource {
    /// A deterministic source.
    pub fn seeded(seed: u64) -> Self {
        NoiseSource {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// A source seeded from OS entropy; renders differ run to run.
    pub fn from_entropy() -> Self {
        NoiseSource {
            rng: Pcg32::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform value in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Gaussian value with mean 0 and standard deviation `std_dev`.
    pub fn gaussian(&mut self, std_dev: f64) -> f64 {
        // Box-Muller; u1 is kept away from zero so ln() stays finite.
        let u1: f64 = self.rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = self.rng.gen_range(0.0..1.0);
        let mag = (-2.0 * u1.ln()).sqrt();
        mag * (std::f64::consts::TAU * u2).cos() * std_dev
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        if !(p > 0.0) {
            return false;
        }
        self.rng.gen_bool(p.min(1.0))
    }

    /// Uniform index in `[0, upper)`, or 0 when `upper` is 0.
    pub fn index_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    /// Derive an independent source for a sub-stream (e.g. one effect).
    pub fn fork(&mut self, stream: u64) -> NoiseSource {
        let base: u64 = self.rng.gen_range(0..u64::MAX);
        NoiseSource::seeded(base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}
