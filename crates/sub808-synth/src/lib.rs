//! Sub808 Synth - the Sub808 bass synthesizer engine
//!
//! A monophonic sine voice built for 808-style bass: linear ADSR, pitch
//! glide, tanh drive, a color tilt and a one-pole tone filter.
//!
//! # Components
//!
//! - [`AdsrEnvelope`] / [`AdsrParameters`] / [`EnvelopeState`] - linear ADSR
//! - [`drive`] / [`tilt`] - memoryless shaping stages
//! - [`MonoVoice`] / [`VoiceModulation`] - oscillator, glide and per-channel tone filter
//! - [`NoteEvent`] / [`TimedEvent`] - note input, with raw MIDI decoding
//! - [`Sub808Synth`] - block processing: parameter snapshot, events, render
//!
//! ```rust
//! use sub808_core::SynthParams;
//! use sub808_synth::{NoteEvent, Sub808Synth, TimedEvent};
//!
//! let mut synth = Sub808Synth::new(44100.0, 2);
//! let mut params = SynthParams::default();
//! params.glide_time = 0.05;
//!
//! let mut left = [0.0f32; 128];
//! let mut right = [0.0f32; 128];
//! let note = NoteEvent::from_midi(&[0x90, 33, 100]).map(|e| TimedEvent::new(0, e));
//! synth.process_block(&params, note.as_slice(), &mut [&mut left[..], &mut right[..]]);
//! ```
//!
//! # no_std Support
//!
//! Builds without `std` (an allocator is required for the per-channel
//! filter state). Disable default features to use it on embedded targets.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod envelope;
pub mod event;
pub mod shaping;
pub mod synth;
pub mod voice;

pub use envelope::{AdsrEnvelope, AdsrParameters, EnvelopeState};
pub use event::{NoteEvent, TimedEvent};
pub use shaping::{DRIVE_SCALE, drive, tilt};
pub use synth::Sub808Synth;
pub use voice::{MAX_CHANNELS, MAX_GLIDE_SECONDS, MonoVoice, VoiceModulation};
