//! Sample buffers and the time axes generators evaluate formulas on.

/// Default output sample rate for every generated effect.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// A mono buffer of floating-point amplitudes, roughly in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub sample_rate: u32,
    pub samples: Vec<f64>,
}

impl SampleBuffer {
    /// A silent buffer of `len` samples.
    pub fn silent(sample_rate: u32, len: usize) -> Self {
        SampleBuffer {
            sample_rate,
            samples: vec![0.0; len],
        }
    }

    pub fn from_samples(sample_rate: u32, samples: Vec<f64>) -> Self {
        SampleBuffer {
            sample_rate,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute amplitude, 0.0 for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// Multiply every sample by `gain`.
    pub fn scale(&mut self, gain: f64) {
        for s in self.samples.iter_mut() {
            *s *= gain;
        }
    }

    /// Zero `len` samples starting at `start`, clipped to the buffer end.
    pub fn zero_range(&mut self, start: usize, len: usize) {
        let end = start.saturating_add(len).min(self.samples.len());
        if start < end {
            self.samples[start..end].fill(0.0);
        }
    }
}

/// Number of samples for `duration` seconds at `sample_rate`.
///
/// Rounds to the nearest integer; negative or non-finite durations give 0.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    let n = duration * sample_rate as f64;
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    n.round() as usize
}

/// How sample indices map to time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxis {
    /// `t = i / sample_rate`. The last sample sits one period before `duration`.
    Stepped,
    /// `t = i * duration / (n - 1)`. Both endpoints are included, so the
    /// last sample sits exactly at `duration`.
    Spanning,
}

impl TimeAxis {
    /// Time values for `n` samples covering `duration` seconds.
    pub fn times(self, n: usize, duration: f64, sample_rate: u32) -> Vec<f64> {
        match self {
            TimeAxis::Stepped => {
                let sr = sample_rate as f64;
                (0..n).map(|i| i as f64 / sr).collect()
            }
            TimeAxis::Spanning => linspace(0.0, duration, n),
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
