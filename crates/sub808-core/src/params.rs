//! The synth's ten controls.
//!
//! [`SynthParam`] names each control and owns its descriptor; [`SynthParams`]
//! is the plain value snapshot the engine consumes once per block.
//!
//! | id | string id        | range         | default | unit |
//! |----|------------------|---------------|---------|------|
//! | 0  | `gain`           | 0 – 1         | 0.25    |      |
//! | 1  | `attack`         | 0.001 – 2     | 0.005   | s    |
//! | 2  | `decay`          | 0.001 – 2     | 0.05    | s    |
//! | 3  | `sustain`        | 0 – 1         | 0.8     |      |
//! | 4  | `release`        | 0.001 – 5     | 0.15    | s    |
//! | 5  | `pitchSemitones` | -12 – 12      | 0       | st   |
//! | 6  | `glideTime`      | 0 – 0.3       | 0       | s    |
//! | 7  | `drive`          | 0 – 1         | 0.1     |      |
//! | 8  | `color`          | -1 – 1        | 0       |      |
//! | 9  | `toneCutoff`     | 80 – 8000     | 300     | Hz   |
//!
//! The string ids are the persisted keys and must not change.

use crate::param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};

/// Number of synth parameters.
pub const PARAM_COUNT: usize = 10;

/// Identifies one of the synth's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SynthParam {
    /// Output amplitude multiplier.
    Gain,
    /// Envelope attack time in seconds.
    Attack,
    /// Envelope decay time in seconds.
    Decay,
    /// Envelope sustain level.
    Sustain,
    /// Envelope release time in seconds.
    Release,
    /// Semitone offset applied to every note.
    PitchSemitones,
    /// Portamento duration in seconds.
    GlideTime,
    /// Waveshaper intensity.
    Drive,
    /// Tilt between low (negative) and high (positive) emphasis.
    Color,
    /// Tone low-pass cutoff in Hz.
    ToneCutoff,
}

static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::new("Gain", "Gain", ParamUnit::None, 0.0, 1.0, 0.25)
        .with_id(ParamId(0), "gain")
        .with_group("output"),
    ParamDescriptor::time_s("Attack", "Atk", 0.001, 2.0, 0.005)
        .with_id(ParamId(1), "attack")
        .with_group("envelope"),
    ParamDescriptor::time_s("Decay", "Dec", 0.001, 2.0, 0.05)
        .with_id(ParamId(2), "decay")
        .with_group("envelope"),
    ParamDescriptor::new("Sustain", "Sus", ParamUnit::None, 0.0, 1.0, 0.8)
        .with_id(ParamId(3), "sustain")
        .with_group("envelope"),
    ParamDescriptor::time_s("Release", "Rel", 0.001, 5.0, 0.15)
        .with_id(ParamId(4), "release")
        .with_group("envelope"),
    ParamDescriptor::new("Pitch", "Pitch", ParamUnit::Semitones, -12.0, 12.0, 0.0)
        .with_id(ParamId(5), "pitchSemitones")
        .with_step(1.0)
        .with_group("pitch"),
    ParamDescriptor::time_s("Glide", "Glide", 0.0, 0.3, 0.0)
        .with_id(ParamId(6), "glideTime")
        .with_group("pitch"),
    ParamDescriptor::new("Drive", "Drive", ParamUnit::None, 0.0, 1.0, 0.1)
        .with_id(ParamId(7), "drive")
        .with_group("tone"),
    ParamDescriptor::new("Color", "Color", ParamUnit::None, -1.0, 1.0, 0.0)
        .with_id(ParamId(8), "color")
        .with_group("tone"),
    ParamDescriptor::new("Tone", "Tone", ParamUnit::Hertz, 80.0, 8000.0, 300.0)
        .with_id(ParamId(9), "toneCutoff")
        .with_step(1.0)
        .with_scale(ParamScale::Logarithmic)
        .with_group("tone"),
];

impl SynthParam {
    /// All parameters in id order.
    pub const ALL: [SynthParam; PARAM_COUNT] = [
        SynthParam::Gain,
        SynthParam::Attack,
        SynthParam::Decay,
        SynthParam::Sustain,
        SynthParam::Release,
        SynthParam::PitchSemitones,
        SynthParam::GlideTime,
        SynthParam::Drive,
        SynthParam::Color,
        SynthParam::ToneCutoff,
    ];

    /// Zero-based index, equal to the numeric [`ParamId`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parameter at `index`, or `None` past the last one.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PARAM_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Looks up a parameter by its persisted key (exact match).
    ///
    /// ```rust
    /// use sub808_core::SynthParam;
    ///
    /// assert_eq!(SynthParam::from_string_id("toneCutoff"), Some(SynthParam::ToneCutoff));
    /// assert_eq!(SynthParam::from_string_id("cutoff"), None);
    /// ```
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.string_id() == id)
    }

    /// Descriptor for this parameter.
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Persisted key, e.g. `"pitchSemitones"`.
    #[inline]
    pub fn string_id(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Default value in engine units.
    #[inline]
    pub fn default_value(self) -> f32 {
        self.descriptor().default
    }
}

/// Plain values for all ten parameters, in engine units.
///
/// This is what the audio thread works with: one snapshot per block.
/// Fields may be written directly; [`set`](Self::set) and
/// [`clamped`](Self::clamped) bring values back into range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Output amplitude multiplier, 0 – 1.
    pub gain: f32,
    /// Attack time in seconds.
    pub attack: f32,
    /// Decay time in seconds.
    pub decay: f32,
    /// Sustain level, 0 – 1.
    pub sustain: f32,
    /// Release time in seconds.
    pub release: f32,
    /// Pitch offset in semitones.
    pub pitch_semitones: f32,
    /// Glide time in seconds.
    pub glide_time: f32,
    /// Drive amount, 0 – 1.
    pub drive: f32,
    /// Color tilt, -1 – 1.
    pub color: f32,
    /// Tone cutoff in Hz.
    pub tone_cutoff: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::from_array(&Self::default_array())
    }
}

impl SynthParams {
    /// Default values in id order.
    pub fn default_array() -> [f32; PARAM_COUNT] {
        SynthParam::ALL.map(SynthParam::default_value)
    }

    /// Builds a snapshot from values in id order, without clamping.
    pub const fn from_array(values: &[f32; PARAM_COUNT]) -> Self {
        Self {
            gain: values[0],
            attack: values[1],
            decay: values[2],
            sustain: values[3],
            release: values[4],
            pitch_semitones: values[5],
            glide_time: values[6],
            drive: values[7],
            color: values[8],
            tone_cutoff: values[9],
        }
    }

    /// Values in id order.
    pub const fn to_array(&self) -> [f32; PARAM_COUNT] {
        [
            self.gain,
            self.attack,
            self.decay,
            self.sustain,
            self.release,
            self.pitch_semitones,
            self.glide_time,
            self.drive,
            self.color,
            self.tone_cutoff,
        ]
    }

    /// Reads one value.
    pub fn get(&self, param: SynthParam) -> f32 {
        match param {
            SynthParam::Gain => self.gain,
            SynthParam::Attack => self.attack,
            SynthParam::Decay => self.decay,
            SynthParam::Sustain => self.sustain,
            SynthParam::Release => self.release,
            SynthParam::PitchSemitones => self.pitch_semitones,
            SynthParam::GlideTime => self.glide_time,
            SynthParam::Drive => self.drive,
            SynthParam::Color => self.color,
            SynthParam::ToneCutoff => self.tone_cutoff,
        }
    }

    /// Writes one value, clamped to its range.
    pub fn set(&mut self, param: SynthParam, value: f32) {
        let value = param.descriptor().clamp(value);
        let slot = match param {
            SynthParam::Gain => &mut self.gain,
            SynthParam::Attack => &mut self.attack,
            SynthParam::Decay => &mut self.decay,
            SynthParam::Sustain => &mut self.sustain,
            SynthParam::Release => &mut self.release,
            SynthParam::PitchSemitones => &mut self.pitch_semitones,
            SynthParam::GlideTime => &mut self.glide_time,
            SynthParam::Drive => &mut self.drive,
            SynthParam::Color => &mut self.color,
            SynthParam::ToneCutoff => &mut self.tone_cutoff,
        };
        *slot = value;
    }

    /// Writes one value by persisted key. Returns `false` for unknown keys,
    /// which leave the snapshot untouched.
    pub fn set_by_string_id(&mut self, id: &str, value: f32) -> bool {
        if let Some(param) = SynthParam::from_string_id(id) {
            self.set(param, value);
            true
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("ignoring unknown parameter {id:?}");
            false
        }
    }

    /// Copy with every value clamped to its range.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for param in SynthParam::ALL {
            out.set(param, self.get(param));
        }
        out
    }

    /// `true` when every value already lies in its range.
    pub fn is_in_range(&self) -> bool {
        SynthParam::ALL.into_iter().all(|p| {
            let d = p.descriptor();
            let v = self.get(p);
            v >= d.min && v <= d.max
        })
    }

    /// Iterates `(param, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SynthParam, f32)> + '_ {
        SynthParam::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

impl ParameterInfo for SynthParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        SynthParam::from_index(index).map(|p| *p.descriptor())
    }

    fn get_param(&self, index: usize) -> f32 {
        SynthParam::from_index(index).map_or(0.0, |p| self.get(p))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(param) = SynthParam::from_index(index) {
            self.set(param, value);
        }
    }
}
