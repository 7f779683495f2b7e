//! Audio processor for the Sub808 plugin.
//!
//! Handles the real-time callback: one parameter snapshot per block, note
//! events folded in order, then the voice renders straight into the host
//! buffers. Nothing here allocates, locks or logs once prepared.

use sub808_synth::{Sub808Synth, TimedEvent};

use crate::shared::Sub808Shared;

/// Audio configuration handed to [`PluginProcessor::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block the host will pass to `process`.
    pub max_block_size: usize,
    /// Output channel count (1 or 2).
    pub channels: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            max_block_size: 512,
            channels: 2,
        }
    }
}

/// Output bus layout offered by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// No output.
    Disabled,
    /// One channel.
    Mono,
    /// Two channels.
    Stereo,
    /// Any other channel count.
    Discrete(usize),
}

impl ChannelLayout {
    /// Layout for a plain channel count.
    pub const fn from_channels(channels: usize) -> Self {
        match channels {
            0 => Self::Disabled,
            1 => Self::Mono,
            2 => Self::Stereo,
            n => Self::Discrete(n),
        }
    }

    /// Number of channels in the layout.
    pub const fn channels(self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Discrete(n) => n,
        }
    }
}

/// The host-facing audio interface.
///
/// `prepare` runs off the audio thread before processing starts and again
/// whenever the host changes sample rate, block size or channel count.
pub trait PluginProcessor {
    /// Allocate and reset for `config`.
    fn prepare(&mut self, config: AudioConfig);

    /// Overwrite `channels` with one block of output.
    fn process(&mut self, channels: &mut [&mut [f32]], events: &[TimedEvent]);

    /// Whether the processor can render into `layout`.
    fn supports_layout(&self, layout: ChannelLayout) -> bool;

    /// Silence all voices and clear filter memory.
    fn reset(&mut self);
}

/// Audio-thread processor wrapping the Sub808 engine.
#[derive(Debug)]
pub struct Sub808AudioProcessor {
    shared: Sub808Shared,
    synth: Sub808Synth,
    config: Option<AudioConfig>,
}

impl Sub808AudioProcessor {
    /// Create a processor reading parameters from `shared`.
    ///
    /// Output is silent until [`prepare`](PluginProcessor::prepare) is called.
    pub fn new(shared: Sub808Shared) -> Self {
        Self {
            shared,
            synth: Sub808Synth::new(0.0, 1),
            config: None,
        }
    }

    /// Configuration from the last `prepare`, if any.
    pub fn config(&self) -> Option<AudioConfig> {
        self.config
    }

    /// The engine, for inspection.
    pub fn synth(&self) -> &Sub808Synth {
        &self.synth
    }

    /// Shared parameter state.
    pub fn shared(&self) -> &Sub808Shared {
        &self.shared
    }
}

impl PluginProcessor for Sub808AudioProcessor {
    fn prepare(&mut self, config: AudioConfig) {
        let channels = config.channels.clamp(1, sub808_synth::MAX_CHANNELS);
        self.synth.prepare(config.sample_rate, channels);
        tracing::info!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            channels,
            "prepared audio processor"
        );
        self.config = Some(config);
    }

    fn process(&mut self, channels: &mut [&mut [f32]], events: &[TimedEvent]) {
        if self.config.is_none() {
            for channel in channels.iter_mut() {
                channel.fill(0.0);
            }
            return;
        }
        let params = self.shared.snapshot();
        self.synth.process_block(&params, events, channels);
    }

    fn supports_layout(&self, layout: ChannelLayout) -> bool {
        matches!(layout, ChannelLayout::Mono | ChannelLayout::Stereo)
    }

    fn reset(&mut self) {
        self.synth.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sub808_core::SynthParam;

    fn prepared(channels: usize) -> Sub808AudioProcessor {
        let mut processor = Sub808AudioProcessor::new(Sub808Shared::new(None));
        processor.prepare(AudioConfig {
            sample_rate: 44100.0,
            max_block_size: 256,
            channels,
        });
        processor
    }

    #[test]
    fn layout_predicate_accepts_mono_and_stereo_only() {
        let processor = Sub808AudioProcessor::new(Sub808Shared::new(None));
        assert!(processor.supports_layout(ChannelLayout::Mono));
        assert!(processor.supports_layout(ChannelLayout::Stereo));
        assert!(!processor.supports_layout(ChannelLayout::Disabled));
        assert!(!processor.supports_layout(ChannelLayout::Discrete(6)));
        assert!(!processor.supports_layout(ChannelLayout::from_channels(3)));
    }

    #[test]
    fn layout_from_channels() {
        assert_eq!(ChannelLayout::from_channels(1), ChannelLayout::Mono);
        assert_eq!(ChannelLayout::from_channels(2), ChannelLayout::Stereo);
        assert_eq!(ChannelLayout::from_channels(8).channels(), 8);
    }

    #[test]
    fn unprepared_process_is_silent() {
        let mut processor = Sub808AudioProcessor::new(Sub808Shared::new(None));
        let mut out = [1.0f32; 64];
        processor.process(&mut [&mut out[..]], &[TimedEvent::note_on(36, 100)]);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn note_renders_audio() {
        let mut processor = prepared(2);
        let mut l = [0.0f32; 256];
        let mut r = [0.0f32; 256];
        processor.process(&mut [&mut l[..], &mut r[..]], &[TimedEvent::note_on(36, 100)]);
        assert!(l.iter().any(|&s| s != 0.0));
        assert_eq!(l, r);
    }

    #[test]
    fn parameter_writes_reach_next_block() {
        let mut processor = prepared(1);
        processor.shared().set(SynthParam::PitchSemitones, 12.0);
        let mut out = [0.0f32; 32];
        processor.process(&mut [&mut out[..]], &[TimedEvent::note_on(57, 100)]);
        assert!((processor.synth().voice().target_freq() - 440.0).abs() < 1e-2);
    }

    #[test]
    fn extra_channels_are_zeroed() {
        let mut processor = prepared(1);
        let mut a = [0.0f32; 128];
        let mut b = [5.0f32; 128];
        processor.process(&mut [&mut a[..], &mut b[..]], &[TimedEvent::note_on(40, 100)]);
        assert!(a.iter().any(|&s| s != 0.0));
        assert!(b.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn prepare_always_resets_voice() {
        let mut processor = prepared(2);
        let mut l = [0.0f32; 64];
        let mut r = [0.0f32; 64];
        processor.process(&mut [&mut l[..], &mut r[..]], &[TimedEvent::note_on(40, 100)]);
        assert!(processor.synth().is_active());

        // Only the block size changes.
        processor.prepare(AudioConfig {
            sample_rate: 44100.0,
            max_block_size: 1024,
            channels: 2,
        });
        assert!(!processor.synth().is_active());
        assert_eq!(processor.synth().voice().phase(), 0.0);

        processor.process(&mut [&mut l[..], &mut r[..]], &[TimedEvent::note_on(40, 100)]);
        processor.prepare(AudioConfig {
            sample_rate: 48000.0,
            max_block_size: 1024,
            channels: 2,
        });
        assert!(!processor.synth().is_active());
        assert_eq!(processor.synth().voice().sample_rate(), 48000.0);
    }

    #[test]
    fn reset_silences() {
        let mut processor = prepared(1);
        let mut out = [0.0f32; 64];
        processor.process(&mut [&mut out[..]], &[TimedEvent::note_on(40, 100)]);
        processor.reset();
        assert!(!processor.synth().is_active());
        processor.process(&mut [&mut out[..]], &[]);
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
