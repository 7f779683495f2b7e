//! Pitch and numeric helpers shared by the voice and the filter.
//!
//! - [`midi_to_freq`] - 12-TET note number to Hz, A4 = 440 Hz = note 69
//! - [`semitones_to_ratio`] - frequency ratio for a semitone offset
//! - [`flush_denormal`] - zero out values in the subnormal range

use libm::powf;

/// Reference pitch of MIDI note 69 (A4).
pub const A4_FREQ: f32 = 440.0;

/// MIDI note number of A4.
pub const A4_NOTE: u8 = 69;

/// Convert a MIDI note number to frequency in Hz.
///
/// # Example
/// ```rust
/// use sub808_core::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 1e-3);
/// assert!((midi_to_freq(33) - 55.0).abs() < 1e-3);
/// ```
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    A4_FREQ * semitones_to_ratio(f32::from(note) - f32::from(A4_NOTE))
}

/// Frequency ratio for an offset in semitones: `2^(semitones / 12)`.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    powf(2.0, semitones / 12.0)
}

/// Flush subnormal values to zero.
///
/// Anything smaller in magnitude than [`f32::MIN_POSITIVE`] becomes zero, so
/// decaying filter memory never lingers in the IEEE 754 subnormal range,
/// where arithmetic is slow on most CPUs. Normal values pass unchanged.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < f32::MIN_POSITIVE { 0.0 } else { x }
}
