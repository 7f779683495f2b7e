//! One-pole lowpass used as the synth's tone control.
//!
//! ```text
//! y[n] = alpha * y[n-1] + (1 - alpha) * x[n]
//! alpha = clamp(exp(-2π * cutoff / sample_rate), 0, 1)
//! ```
//!
//! 6 dB/octave, zero latency, one multiply-add per sample. The voice reads
//! the filter memory between samples through [`OnePole::state`], so the
//! memory is exposed rather than hidden behind `process`.
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio Applications",
//! Section: One-Pole Filter.

use crate::flush_denormal;
use libm::expf;

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `alpha` is always in \[0, 1\]
/// - a non-positive sample rate gives `alpha = 1`, which holds the state
/// - `state` is never subnormal
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    alpha: f32,
    sample_rate: f32,
    cutoff: f32,
}

impl OnePole {
    /// Create a new filter with zeroed memory.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            alpha: 0.0,
            sample_rate,
            cutoff: cutoff_hz,
        };
        filter.recalculate_alpha();
        filter
    }

    /// Set the cutoff frequency. Re-applying the current value is free.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if cutoff_hz != self.cutoff {
            self.cutoff = cutoff_hz;
            self.recalculate_alpha();
        }
    }

    /// Process one sample and return the new state.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(self.alpha * self.state + (1.0 - self.alpha) * input);
        self.state
    }

    /// Filter memory: the most recent output.
    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Current smoothing coefficient.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Reset filter memory to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    fn recalculate_alpha(&mut self) {
        self.alpha = if self.sample_rate > 0.0 {
            expf(-core::f32::consts::TAU * self.cutoff / self.sample_rate).clamp(0.0, 1.0)
        } else {
            1.0
        };
    }
}
