//! The single Sub808 voice.
//!
//! One sine oscillator with linear pitch glide, shaped by the ADSR envelope,
//! saturated, tilted and finally low-passed per output channel. Each output
//! sample goes through the same fixed chain:
//!
//! ```text
//! glide step -> envelope -> sin(phase) * env -> drive -> tilt -> advance phase
//!            -> per channel: tone lowpass -> * gain
//! ```
//!
//! The tilt stage uses channel 0's tone filter memory as its reference for
//! every channel, read before this sample's filter update. In stereo both
//! channels receive the same shaped signal, so the coupling only shows if
//! the channel filters ever diverge.

use alloc::vec::Vec;
use core::f32::consts::TAU;

use libm::sinf;
use sub808_core::{OnePole, SynthParams, semitones_to_ratio};

use crate::envelope::{AdsrEnvelope, AdsrParameters};
use crate::shaping::{drive, tilt};

/// Most output channels a voice renders.
pub const MAX_CHANNELS: usize = 2;

/// Longest glide accepted by [`MonoVoice::note_on`], in seconds.
pub const MAX_GLIDE_SECONDS: f32 = 10.0;

/// Per-block modulation values, in engine units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceModulation {
    /// Semitone offset applied at note-on.
    pub pitch_semitones: f32,
    /// Glide duration in seconds.
    pub glide_time: f32,
    /// Drive amount, 0 – 1.
    pub drive: f32,
    /// Color tilt, -1 – 1.
    pub color: f32,
    /// Tone lowpass cutoff in Hz.
    pub tone_cutoff: f32,
    /// Output gain.
    pub gain: f32,
}

impl Default for VoiceModulation {
    fn default() -> Self {
        Self::from(&SynthParams::default())
    }
}

impl From<&SynthParams> for VoiceModulation {
    fn from(params: &SynthParams) -> Self {
        Self {
            pitch_semitones: params.pitch_semitones,
            glide_time: params.glide_time,
            drive: params.drive,
            color: params.color,
            tone_cutoff: params.tone_cutoff,
            gain: params.gain,
        }
    }
}

/// Monophonic voice. A new note always takes over the previous one.
///
/// # Example
///
/// ```rust
/// use sub808_synth::MonoVoice;
///
/// let mut voice = MonoVoice::new(44100.0, 2);
/// voice.note_on(55.0);
///
/// let mut left = [0.0f32; 64];
/// let mut right = [0.0f32; 64];
/// voice.render(&mut [&mut left[..], &mut right[..]]);
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct MonoVoice {
    sample_rate: f32,
    phase: f32,
    phase_delta: f32,
    current_freq: f32,
    target_freq: f32,
    glide_samples_remaining: u32,
    envelope: AdsrEnvelope,
    tone: Vec<OnePole>,
    modulation: VoiceModulation,
}

impl Default for MonoVoice {
    fn default() -> Self {
        Self::new(44100.0, 2)
    }
}

impl MonoVoice {
    /// Create a prepared voice with default parameters.
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        let mut voice = Self {
            sample_rate,
            phase: 0.0,
            phase_delta: 0.0,
            current_freq: 0.0,
            target_freq: 0.0,
            glide_samples_remaining: 0,
            envelope: AdsrEnvelope::new(sample_rate),
            tone: Vec::new(),
            modulation: VoiceModulation::default(),
        };
        voice.prepare(sample_rate, channels);
        voice
    }

    /// Size the voice for a sample rate and channel count and clear all state.
    ///
    /// Channel count is clamped to 1..=2. Phase, glide, filter memory and
    /// the envelope all start over; parameters are kept.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize) {
        let channels = channels.clamp(1, MAX_CHANNELS);
        self.sample_rate = sample_rate;
        self.phase = 0.0;
        self.phase_delta = 0.0;
        self.current_freq = 0.0;
        self.target_freq = 0.0;
        self.glide_samples_remaining = 0;
        self.envelope.set_sample_rate(sample_rate);
        self.envelope.reset();
        self.tone.clear();
        self.tone
            .resize(channels, OnePole::new(sample_rate, self.modulation.tone_cutoff));
    }

    /// Apply a full parameter snapshot.
    pub fn apply_params(&mut self, params: &SynthParams) {
        self.set_envelope(AdsrParameters {
            attack: params.attack,
            decay: params.decay,
            sustain: params.sustain,
            release: params.release,
        });
        self.set_modulation(VoiceModulation::from(params));
    }

    /// Apply envelope parameters.
    pub fn set_envelope(&mut self, params: AdsrParameters) {
        self.envelope.set_parameters(params);
    }

    /// Apply pitch, glide, drive, color, tone and gain.
    pub fn set_modulation(&mut self, modulation: VoiceModulation) {
        self.modulation = modulation;
        for filter in &mut self.tone {
            filter.set_cutoff(modulation.tone_cutoff);
        }
    }

    /// Start a note at `base_freq` Hz (before the pitch offset).
    ///
    /// Glides from the current pitch when a glide time is set and a note has
    /// sounded since [`prepare`](Self::prepare); otherwise jumps straight to
    /// the new pitch.
    pub fn note_on(&mut self, base_freq: f32) {
        let target = base_freq * semitones_to_ratio(self.modulation.pitch_semitones);
        let glide = self.modulation.glide_time.clamp(0.0, MAX_GLIDE_SECONDS);

        let glide_samples = if glide > 0.0 && self.current_freq > 0.0 && self.sample_rate > 0.0 {
            libm::roundf(glide * self.sample_rate) as u32
        } else {
            0
        };

        self.target_freq = target;
        self.glide_samples_remaining = glide_samples;
        if glide_samples == 0 {
            self.current_freq = target;
            self.update_phase_delta();
        }

        self.envelope.note_on();
    }

    /// Release the note. Pitch and glide carry on through the release.
    pub fn note_off(&mut self) {
        self.envelope.note_off();
    }

    /// Silence immediately.
    pub fn all_sound_off(&mut self) {
        self.envelope.reset();
    }

    /// Render into `channels`, overwriting their contents.
    ///
    /// Renders the length of the shortest channel. Channels beyond the
    /// prepared count are zeroed. A non-positive sample rate renders silence.
    pub fn render(&mut self, channels: &mut [&mut [f32]]) {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        let active = self.tone.len().min(channels.len());

        for channel in channels.iter_mut().skip(active) {
            channel.fill(0.0);
        }
        if self.sample_rate <= 0.0 {
            for channel in channels.iter_mut().take(active) {
                channel.fill(0.0);
            }
            return;
        }

        let m = self.modulation;
        for i in 0..num_samples {
            if self.glide_samples_remaining > 0 {
                self.step_glide();
            }

            let env = self.envelope.next_sample();
            let mut s = sinf(self.phase) * env;
            s = drive(s, m.drive);
            s = tilt(s, m.color, self.tone[0].state());

            self.phase += self.phase_delta;
            while self.phase >= TAU {
                self.phase -= TAU;
            }

            for (channel, filter) in channels.iter_mut().zip(self.tone.iter_mut()) {
                channel[i] = filter.process(s) * m.gain;
            }
        }
    }

    /// Oscillator phase in radians, in \[0, 2π).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Phase increment per sample.
    pub fn phase_delta(&self) -> f32 {
        self.phase_delta
    }

    /// Frequency currently sounding, in Hz. Zero before the first note.
    pub fn current_freq(&self) -> f32 {
        self.current_freq
    }

    /// Frequency the glide is heading to, in Hz.
    pub fn target_freq(&self) -> f32 {
        self.target_freq
    }

    /// Samples left in the running glide.
    pub fn glide_samples_remaining(&self) -> u32 {
        self.glide_samples_remaining
    }

    /// Tone filter memory for `channel`.
    pub fn tone_state(&self, channel: usize) -> Option<f32> {
        self.tone.get(channel).map(OnePole::state)
    }

    /// Prepared channel count.
    pub fn channels(&self) -> usize {
        self.tone.len()
    }

    /// Prepared sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Amplitude envelope.
    pub fn envelope(&self) -> &AdsrEnvelope {
        &self.envelope
    }

    /// Modulation values in effect.
    pub fn modulation(&self) -> VoiceModulation {
        self.modulation
    }

    /// `true` while the envelope is producing output.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    #[inline]
    fn step_glide(&mut self) {
        let remaining = self.glide_samples_remaining;
        self.current_freq += (self.target_freq - self.current_freq) / remaining as f32;
        self.glide_samples_remaining = remaining - 1;
        if self.glide_samples_remaining == 0 {
            self.current_freq = self.target_freq;
        }
        self.update_phase_delta();
    }

    #[inline]
    fn update_phase_delta(&mut self) {
        self.phase_delta = if self.sample_rate > 0.0 {
            TAU * self.current_freq / self.sample_rate
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    fn render_mono(voice: &mut MonoVoice, len: usize) -> Vec<f32> {
        let mut out = alloc::vec![0.0f32; len];
        voice.render(&mut [&mut out[..]]);
        out
    }

    #[test]
    fn silent_before_first_note() {
        let mut voice = MonoVoice::new(SR, 1);
        let out = render_mono(&mut voice, 256);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(voice.current_freq(), 0.0);
    }

    #[test]
    fn first_note_snaps_even_with_glide() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.set_modulation(VoiceModulation {
            glide_time: 0.1,
            ..VoiceModulation::default()
        });
        voice.note_on(110.0);
        assert_eq!(voice.current_freq(), 110.0);
        assert_eq!(voice.glide_samples_remaining(), 0);
        assert!((voice.phase_delta() - TAU * 110.0 / SR).abs() < 1e-9);
    }

    #[test]
    fn pitch_offset_applies_to_target() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.set_modulation(VoiceModulation {
            pitch_semitones: 12.0,
            ..VoiceModulation::default()
        });
        voice.note_on(55.0);
        assert!((voice.current_freq() - 110.0).abs() < 1e-3);
    }

    #[test]
    fn glide_schedules_rounded_samples() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.note_on(110.0);
        voice.set_modulation(VoiceModulation {
            glide_time: 0.02,
            ..VoiceModulation::default()
        });
        voice.note_on(220.0);
        assert_eq!(voice.glide_samples_remaining(), 882);
        assert_eq!(voice.current_freq(), 110.0);
        assert_eq!(voice.target_freq(), 220.0);
    }

    #[test]
    fn glide_rounding_to_zero_snaps() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.note_on(110.0);
        voice.set_modulation(VoiceModulation {
            glide_time: 0.000_001,
            ..VoiceModulation::default()
        });
        voice.note_on(220.0);
        assert_eq!(voice.glide_samples_remaining(), 0);
        assert_eq!(voice.current_freq(), 220.0);
    }

    #[test]
    fn glide_moves_monotonically() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.note_on(110.0);
        voice.set_modulation(VoiceModulation {
            glide_time: 0.01,
            ..VoiceModulation::default()
        });
        voice.note_on(220.0);
        let mut prev = voice.current_freq();
        let mut buf = [0.0f32; 1];
        for _ in 0..441 {
            voice.render(&mut [&mut buf[..]]);
            assert!(voice.current_freq() >= prev);
            prev = voice.current_freq();
        }
        assert_eq!(voice.current_freq(), 220.0);
        assert_eq!(voice.glide_samples_remaining(), 0);
    }

    #[test]
    fn prepare_resets_state() {
        let mut voice = MonoVoice::new(SR, 2);
        voice.note_on(100.0);
        render_mono(&mut voice, 500);
        assert!(voice.phase() > 0.0);
        voice.prepare(48000.0, 1);
        assert_eq!(voice.phase(), 0.0);
        assert_eq!(voice.phase_delta(), 0.0);
        assert_eq!(voice.current_freq(), 0.0);
        assert_eq!(voice.channels(), 1);
        assert_eq!(voice.tone_state(0), Some(0.0));
        assert!(!voice.is_active());
    }

    #[test]
    fn channel_count_is_clamped() {
        assert_eq!(MonoVoice::new(SR, 0).channels(), 1);
        assert_eq!(MonoVoice::new(SR, 6).channels(), 2);
    }

    #[test]
    fn extra_channels_are_zeroed() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.note_on(55.0);
        let mut a = [0.0f32; 128];
        let mut b = [1.0f32; 128];
        voice.render(&mut [&mut a[..], &mut b[..]]);
        assert!(a.iter().any(|&s| s != 0.0));
        assert!(b.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn zero_sample_rate_is_silent() {
        let mut voice = MonoVoice::new(0.0, 1);
        voice.note_on(55.0);
        let mut buf = [1.0f32; 64];
        voice.render(&mut [&mut buf[..]]);
        assert!(buf.iter().all(|&s| s == 0.0));
        assert_eq!(voice.phase_delta(), 0.0);
    }

    #[test]
    fn empty_buffer_is_noop() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.note_on(55.0);
        voice.render(&mut []);
        let mut empty: [f32; 0] = [];
        voice.render(&mut [&mut empty[..]]);
        assert_eq!(voice.phase(), 0.0);
    }

    #[test]
    fn all_sound_off_silences_next_sample() {
        let mut voice = MonoVoice::new(SR, 1);
        voice.set_modulation(VoiceModulation {
            tone_cutoff: 8000.0,
            ..VoiceModulation::default()
        });
        voice.note_on(55.0);
        render_mono(&mut voice, 2000);
        voice.all_sound_off();
        assert!(!voice.is_active());
        assert_eq!(voice.envelope().level(), 0.0);
    }
}
