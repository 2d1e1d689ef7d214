//! Amplitude envelopes: exponential decay and a slow sine LFO.

use super::oscillator::sine;

/// Exponential decay envelope, `exp(-t · rate)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// Decay rate per second. Larger is shorter.
    pub rate: f64,
}

impl Decay {
    pub fn new(rate: f64) -> Self {
        Decay { rate }
    }

    /// Gain at time `t` seconds, 1.0 at `t = 0`.
    #[inline]
    pub fn gain(&self, t: f64) -> f64 {
        (-t * self.rate).exp()
    }

    /// Time for the envelope to fall to `level` (e.g. 0.001 for -60 dB).
    pub fn time_to(&self, level: f64) -> f64 {
        if self.rate <= 0.0 || level <= 0.0 {
            return f64::INFINITY;
        }
        -level.ln() / self.rate
    }
}

/// Slow sine modulation of amplitude around a base level.
///
/// Gain is `base + depth · sin(2π·freq·t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    pub freq: f64,
    pub base: f64,
    pub depth: f64,
}

impl Lfo {
    pub fn new(freq: f64, base: f64, depth: f64) -> Self {
        Lfo { freq, base, depth }
    }

    #[inline]
    pub fn gain(&self, t: f64) -> f64 {
        self.base + self.depth * sine(self.freq, t)
    }
}
