//! Block-level engine: parameters and note events in, audio out.

use sub808_core::{SynthParams, midi_to_freq};

use crate::event::{NoteEvent, TimedEvent};
use crate::voice::MonoVoice;

/// The Sub808 synth engine.
///
/// Each call to [`process_block`](Self::process_block) applies one
/// parameter snapshot, folds every note event in order, then renders the
/// whole block. Events therefore take effect at the block start regardless
/// of their offset.
///
/// # Example
///
/// ```rust
/// use sub808_core::SynthParams;
/// use sub808_synth::{Sub808Synth, TimedEvent};
///
/// let mut synth = Sub808Synth::new(48000.0, 1);
/// let params = SynthParams::default();
/// let mut out = [0.0f32; 256];
///
/// synth.process_block(&params, &[TimedEvent::note_on(36, 100)], &mut [&mut out[..]]);
/// assert!(out.iter().any(|&s| s != 0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sub808Synth {
    voice: MonoVoice,
}

impl Sub808Synth {
    /// Create an engine prepared for `sample_rate` and `channels` (1 or 2).
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        Self {
            voice: MonoVoice::new(sample_rate, channels),
        }
    }

    /// Resize for a new sample rate or channel count. Clears all voice state.
    pub fn prepare(&mut self, sample_rate: f32, channels: usize) {
        self.voice.prepare(sample_rate, channels);
    }

    /// Apply one event immediately.
    pub fn handle_event(&mut self, event: NoteEvent) {
        match event {
            NoteEvent::NoteOn { note, .. } => self.voice.note_on(midi_to_freq(note)),
            NoteEvent::NoteOff { .. } => self.voice.note_off(),
            NoteEvent::AllNotesOff | NoteEvent::AllSoundOff => self.voice.all_sound_off(),
        }
    }

    /// Render one block.
    ///
    /// `channels` is overwritten. Parameters are applied before the events
    /// so a note-on in this block already uses this block's pitch and glide.
    pub fn process_block(
        &mut self,
        params: &SynthParams,
        events: &[TimedEvent],
        channels: &mut [&mut [f32]],
    ) {
        self.voice.apply_params(params);
        for timed in events {
            self.handle_event(timed.event);
        }
        self.voice.render(channels);
    }

    /// Silence and clear the voice without changing the sample rate.
    pub fn reset(&mut self) {
        let (sample_rate, channels) = (self.voice.sample_rate(), self.voice.channels());
        self.voice.prepare(sample_rate, channels);
    }

    /// The voice, for inspection.
    pub fn voice(&self) -> &MonoVoice {
        &self.voice
    }

    /// `true` while a note is sounding or releasing.
    pub fn is_active(&self) -> bool {
        self.voice.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeState;

    #[test]
    fn note_on_uses_block_parameters() {
        let mut synth = Sub808Synth::new(44100.0, 1);
        let params = SynthParams {
            pitch_semitones: -12.0,
            ..SynthParams::default()
        };
        let mut out = [0.0f32; 16];
        synth.process_block(&params, &[TimedEvent::note_on(69, 100)], &mut [&mut out[..]]);
        assert!((synth.voice().target_freq() - 220.0).abs() < 1e-2);
    }

    #[test]
    fn note_off_ignores_note_number() {
        let mut synth = Sub808Synth::new(44100.0, 1);
        let params = SynthParams::default();
        let mut out = [0.0f32; 512];
        synth.process_block(&params, &[TimedEvent::note_on(40, 100)], &mut [&mut out[..]]);
        synth.process_block(&params, &[TimedEvent::note_off(52)], &mut [&mut out[..]]);
        assert_eq!(synth.voice().envelope().state(), EnvelopeState::Release);
    }

    #[test]
    fn channel_mode_messages_reset_envelope() {
        for event in [NoteEvent::AllNotesOff, NoteEvent::AllSoundOff] {
            let mut synth = Sub808Synth::new(44100.0, 1);
            let params = SynthParams::default();
            let mut out = [0.0f32; 512];
            synth.process_block(&params, &[TimedEvent::note_on(40, 100)], &mut [&mut out[..]]);
            synth.process_block(&params, &[TimedEvent::new(10, event)], &mut [&mut out[..]]);
            assert!(!synth.is_active());
            assert!(out.iter().all(|&s| s.abs() <= params.gain));
            assert!(out[511].abs() < 1e-6, "tone filter tail should have died out");
        }
    }

    #[test]
    fn events_fold_in_order() {
        let mut synth = Sub808Synth::new(44100.0, 1);
        let params = SynthParams::default();
        let mut out = [0.0f32; 64];
        let events = [
            TimedEvent::note_on(40, 100),
            TimedEvent::new(5, NoteEvent::AllSoundOff),
            TimedEvent::new(20, NoteEvent::NoteOn { note: 45, velocity: 90 }),
        ];
        synth.process_block(&params, &events, &mut [&mut out[..]]);
        assert!(synth.is_active());
        assert!((synth.voice().current_freq() - midi_to_freq(45)).abs() < 1e-3);
    }

    #[test]
    fn reset_keeps_configuration() {
        let mut synth = Sub808Synth::new(48000.0, 2);
        let mut l = [0.0f32; 64];
        let mut r = [0.0f32; 64];
        synth.process_block(
            &SynthParams::default(),
            &[TimedEvent::note_on(36, 100)],
            &mut [&mut l[..], &mut r[..]],
        );
        synth.reset();
        assert!(!synth.is_active());
        assert_eq!(synth.voice().sample_rate(), 48000.0);
        assert_eq!(synth.voice().channels(), 2);
        assert_eq!(synth.voice().phase(), 0.0);
    }
}
