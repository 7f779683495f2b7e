//! Memoryless tone shaping stages applied before the tone filter.
//!
//! - [`drive`] - normalized tanh saturation
//! - [`tilt`] - color control that leans the spectrum up or down

use libm::tanhf;

/// Drive multiplier: full drive pushes the shaper input 2.5x.
pub const DRIVE_SCALE: f32 = 2.5;

/// Normalized tanh waveshaper.
///
/// `tanh(k * s) / tanh(k)` with `k = 2.5 * amount`. The division keeps a
/// full-scale input at full scale, so drive adds harmonics without adding
/// level. `amount <= 0` returns the input unchanged.
///
/// ```rust
/// use sub808_synth::drive;
///
/// assert_eq!(drive(0.3, 0.0), 0.3);
/// assert!((drive(1.0, 0.75) - 1.0).abs() < 1e-6);
/// assert!(drive(0.3, 0.75) > 0.3);
/// ```
#[inline]
pub fn drive(sample: f32, amount: f32) -> f32 {
    if amount <= 0.0 {
        return sample;
    }
    let k = amount * DRIVE_SCALE;
    tanhf(k * sample) / tanhf(k)
}

/// Tilt the signal toward highs (`color > 0`) or lows (`color < 0`).
///
/// `reference` is a smoothed copy of the signal, the tone filter's memory.
/// The difference `sample - reference` acts as the high band.
///
/// ```text
/// high = s - reference
/// out  = s + high * color * 0.5 - s * (-color) * 0.5
/// ```
///
/// `color = 0` returns the input unchanged.
#[inline]
pub fn tilt(sample: f32, color: f32, reference: f32) -> f32 {
    let high = sample - reference;
    sample + high * color * 0.5 - sample * (-color) * 0.5
}
