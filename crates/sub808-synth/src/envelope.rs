//! Linear ADSR envelope generator.
//!
//! Each stage moves the level by a constant step per sample:
//!
//! ```text
//! step = distance / (seconds * sample_rate)
//! ```
//!
//! Attack climbs from wherever the level currently is to 1.0, decay falls to
//! the sustain level, and release falls from the level held at note-off to
//! zero. Because the release step is derived from that starting level, a
//! release always lasts `release` seconds no matter when the note was let go.
//!
//! A stage shorter than one sample is skipped rather than divided by.

/// ADSR envelope states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Envelope is inactive and outputs zero.
    #[default]
    Idle,
    /// Output ramps linearly toward 1.0.
    Attack,
    /// Output falls linearly from 1.0 toward the sustain level.
    Decay,
    /// Output holds at the sustain level while the gate is held.
    Sustain,
    /// Output falls linearly to zero after the gate is released.
    Release,
}

/// Envelope timing and level, in seconds and \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParameters {
    /// Attack time in seconds.
    pub attack: f32,
    /// Decay time in seconds.
    pub decay: f32,
    /// Sustain level.
    pub sustain: f32,
    /// Release time in seconds.
    pub release: f32,
}

impl Default for AdsrParameters {
    fn default() -> Self {
        Self {
            attack: 0.005,
            decay: 0.05,
            sustain: 0.8,
            release: 0.15,
        }
    }
}

/// Linear ADSR envelope.
///
/// # Example
///
/// ```rust
/// use sub808_synth::{AdsrEnvelope, AdsrParameters, EnvelopeState};
///
/// let mut env = AdsrEnvelope::new(48000.0);
/// env.set_parameters(AdsrParameters {
///     attack: 0.01,
///     decay: 0.1,
///     sustain: 0.6,
///     release: 0.2,
/// });
///
/// env.note_on();
/// for _ in 0..48000 {
///     env.next_sample();
/// }
/// assert_eq!(env.state(), EnvelopeState::Sustain);
///
/// env.note_off();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    state: EnvelopeState,
    level: f32,
    sample_rate: f32,
    params: AdsrParameters,

    // Per-sample steps; zero means the stage is skipped.
    attack_step: f32,
    decay_step: f32,
    release_step: f32,
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl AdsrEnvelope {
    /// Create an idle envelope with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate,
            params: AdsrParameters::default(),
            attack_step: 0.0,
            decay_step: 0.0,
            release_step: 0.0,
        };
        env.recalculate_steps();
        env
    }

    /// Set sample rate and recalculate steps. Does not reset the stage.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_steps();
        self.settle_running_stage();
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Apply new stage times and sustain level.
    ///
    /// Re-applying identical parameters does nothing. A change takes effect
    /// from the current level: the running stage keeps going with the new
    /// slope, and a running release is rescaled to finish `release` seconds
    /// from now.
    pub fn set_parameters(&mut self, params: AdsrParameters) {
        let params = AdsrParameters {
            attack: params.attack.max(0.0),
            decay: params.decay.max(0.0),
            sustain: params.sustain.clamp(0.0, 1.0),
            release: params.release.max(0.0),
        };
        if params == self.params {
            return;
        }
        self.params = params;
        self.recalculate_steps();
        if self.state == EnvelopeState::Release {
            self.begin_release();
        } else {
            self.settle_running_stage();
        }
    }

    /// Currently applied parameters.
    pub fn parameters(&self) -> AdsrParameters {
        self.params
    }

    /// Gate on. Enters attack from the current level.
    pub fn note_on(&mut self) {
        if self.attack_step > 0.0 {
            self.state = EnvelopeState::Attack;
        } else {
            self.level = 1.0;
            self.finish_attack();
        }
    }

    /// Gate off. Enters release from attack, decay or sustain.
    ///
    /// Ignored while idle or already releasing.
    pub fn note_off(&mut self) {
        match self.state {
            EnvelopeState::Attack | EnvelopeState::Decay | EnvelopeState::Sustain => {
                self.begin_release();
            }
            EnvelopeState::Idle | EnvelopeState::Release => {}
        }
    }

    /// Force the envelope to idle with zero output.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
    }

    /// Current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// `true` unless idle.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Per-sample step of the running release, zero outside release.
    pub fn release_step(&self) -> f32 {
        if self.state == EnvelopeState::Release {
            self.release_step
        } else {
            0.0
        }
    }

    /// Advance by one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {}

            EnvelopeState::Attack => {
                self.level += self.attack_step;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.finish_attack();
                }
            }

            EnvelopeState::Decay => {
                self.level -= self.decay_step;
                if self.level <= self.params.sustain {
                    self.level = self.params.sustain;
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.params.sustain;
            }

            EnvelopeState::Release => {
                self.level -= self.release_step;
                if self.level <= 0.0 {
                    self.reset();
                }
            }
        }

        self.level
    }

    fn finish_attack(&mut self) {
        if self.decay_step > 0.0 && self.level > self.params.sustain {
            self.state = EnvelopeState::Decay;
        } else {
            self.level = self.params.sustain;
            self.state = EnvelopeState::Sustain;
        }
    }

    /// Completes attack or decay at once when its new length is under one
    /// sample, so a zero step never stalls the stage.
    fn settle_running_stage(&mut self) {
        match self.state {
            EnvelopeState::Attack if self.attack_step <= 0.0 => {
                self.level = 1.0;
                self.finish_attack();
            }
            EnvelopeState::Decay if self.decay_step <= 0.0 => {
                self.level = self.params.sustain;
                self.state = EnvelopeState::Sustain;
            }
            _ => {}
        }
    }

    fn begin_release(&mut self) {
        match stage_step(self.level, self.params.release, self.sample_rate) {
            Some(step) => {
                self.release_step = step;
                self.state = EnvelopeState::Release;
            }
            None => self.reset(),
        }
    }

    fn recalculate_steps(&mut self) {
        self.attack_step = stage_step(1.0, self.params.attack, self.sample_rate).unwrap_or(0.0);
        self.decay_step = stage_step(
            1.0 - self.params.sustain,
            self.params.decay,
            self.sample_rate,
        )
        .unwrap_or(0.0);
    }
}

/// Per-sample step covering `distance` in `seconds`, or `None` when the
/// stage is shorter than one sample or has nothing to cover.
#[inline]
fn stage_step(distance: f32, seconds: f32, sample_rate: f32) -> Option<f32> {
    let samples = seconds * sample_rate;
    if samples >= 1.0 && distance > 0.0 {
        Some(distance / samples)
    } else {
        None
    }
}
