//! Closed-form oscillators evaluated at absolute time.
//!
//! Effects here are rendered offline, so tones are computed directly as
//! `sin(2π·f·t)` instead of by phase accumulation. Swept tones multiply the
//! instantaneous frequency by absolute time, which bends the sweep upward
//! faster than a true chirp. That curvature is part of the sound.

use std::f64::consts::PI;

/// Sine at `freq` Hz, evaluated at time `t` seconds.
#[inline]
pub fn sine(freq: f64, t: f64) -> f64 {
    (2.0 * PI * freq * t).sin()
}

/// Frequency after `t` seconds moving from `start` at `rate` Hz per second.
#[inline]
pub fn swept_freq(start: f64, rate: f64, t: f64) -> f64 {
    start + rate * t
}

/// A linear frequency sweep from `start` to `end` Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
}

impl Sweep {
    pub fn new(start: f64, end: f64) -> Self {
        Sweep { start, end }
    }

    /// Frequency after `progress` of the sweep, `progress` in [0, 1].
    pub fn freq_at(&self, progress: f64) -> f64 {
        self.start + (self.end - self.start) * progress
    }

    /// Sample `i` of an `n`-sample sweep evaluated at time `t`.
    pub fn sample(&self, i: usize, n: usize, t: f64) -> f64 {
        let progress = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        sine(self.freq_at(progress), t)
    }
}

/// Quantize `value` to steps of `1 / levels` by flooring (bit-crush).
#[inline]
pub fn bit_crush(value: f64, levels: f64) -> f64 {
    (value * levels).floor() / levels
}
