//! Parameter descriptors and the introspection trait.
//!
//! Every control the synth exposes is described by a [`ParamDescriptor`]:
//! display names, unit, range, default, normalization curve and two stable
//! identifiers. The numeric [`ParamId`] is what hosts record for
//! automation; the `string_id` is the key used in preset files and saved
//! state documents.
//!
//! # Normalized Space
//!
//! Hosts and knobs work in \[0, 1\]. [`ParamDescriptor::normalize`] and
//! [`ParamDescriptor::denormalize`] convert between that space and plain
//! engine units, following the descriptor's [`ParamScale`].
//!
//! # Example
//!
//! ```rust
//! use sub808_core::{ParamDescriptor, ParamId, ParamScale, ParamUnit};
//!
//! let cutoff = ParamDescriptor::new("Tone", "Tone", ParamUnit::Hertz, 80.0, 8000.0, 300.0)
//!     .with_id(ParamId(9), "toneCutoff")
//!     .with_scale(ParamScale::Logarithmic);
//!
//! assert_eq!(cutoff.clamp(20_000.0), 8000.0);
//! assert!((cutoff.denormalize(cutoff.normalize(300.0)) - 300.0).abs() < 0.01);
//! ```

use alloc::format;
use alloc::string::String;

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// With `Power(exp)` and `exp > 1`, the lower part of the range gets more
/// travel, which suits envelope times.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// Constant ratio per unit of travel. Requires `min > 0.0`.
    Logarithmic,
    /// Power curve with the given exponent.
    Power(f32),
}

/// Stable parameter identifier.
///
/// Hosts store this for automation lanes, so once published a `ParamId`
/// must never change for a given control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Unit type for parameter display and text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Seconds (s) - envelope and glide times.
    Seconds,
    /// Hertz (Hz) - filter cutoff.
    Hertz,
    /// Semitones (st) - pitch offsets.
    Semitones,
    /// Dimensionless amounts such as gain, sustain level, drive and color.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use sub808_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Seconds => " s",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Semitones => " st",
            ParamUnit::None => "",
        }
    }

    /// Decimal places used when formatting values of this unit.
    const fn precision(&self) -> usize {
        match self {
            ParamUnit::Seconds => 3,
            ParamUnit::Hertz => 0,
            ParamUnit::Semitones => 1,
            ParamUnit::None => 2,
        }
    }
}

/// Metadata for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g. "Attack", "Tone").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value on construction and reset.
    pub default: f32,

    /// Recommended step increment for encoder-style control.
    pub step: f32,

    /// Stable numeric ID for host automation.
    pub id: ParamId,

    /// Stable textual ID used as the key in presets and saved state.
    pub string_id: &'static str,

    /// Normalization curve.
    pub scale: ParamScale,

    /// Parameter group for host tree display. Empty means top-level.
    pub group: &'static str,
}

impl ParamDescriptor {
    /// Creates a linear descriptor with no IDs assigned.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            group: "",
        }
    }

    /// Envelope or glide time in seconds, with a cubic skew toward short times.
    pub const fn time_s(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Seconds, min, max, default)
            .with_step(0.001)
            .with_scale(ParamScale::Power(3.0))
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use sub808_core::{ParamDescriptor, ParamId, ParamUnit};
    ///
    /// let desc = ParamDescriptor::new("Gain", "Gain", ParamUnit::None, 0.0, 1.0, 0.25)
    ///     .with_id(ParamId(0), "gain");
    /// assert_eq!(desc.string_id, "gain");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Sets the encoder step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamps a value to this parameter's range.
    ///
    /// NaN maps to the default so a corrupt value never reaches the engine.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// Out-of-range input is clamped first.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        let normalized = match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            ParamScale::Power(exp) => libm::powf((value - self.min) / range, 1.0 / exp),
        };
        normalized.clamp(0.0, 1.0)
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        let plain = match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
            ParamScale::Power(exp) => {
                self.min + libm::powf(normalized, exp) * (self.max - self.min)
            }
        };
        self.clamp(plain)
    }

    /// Formats a plain value with this parameter's unit.
    ///
    /// ```rust
    /// use sub808_core::{ParamDescriptor, ParamUnit};
    ///
    /// let tone = ParamDescriptor::new("Tone", "Tone", ParamUnit::Hertz, 80.0, 8000.0, 300.0);
    /// assert_eq!(tone.format_value(300.0), "300 Hz");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        format!(
            "{:.*}{}",
            self.unit.precision(),
            value,
            self.unit.suffix()
        )
    }

    /// Parses user text into a clamped plain value.
    ///
    /// Accepts a bare number or a number followed by this parameter's unit
    /// suffix, with or without the separating space. Returns `None` when the
    /// text is not a number.
    ///
    /// ```rust
    /// use sub808_core::{ParamDescriptor, ParamUnit};
    ///
    /// let tone = ParamDescriptor::new("Tone", "Tone", ParamUnit::Hertz, 80.0, 8000.0, 300.0);
    /// assert_eq!(tone.parse_value("450 Hz"), Some(450.0));
    /// assert_eq!(tone.parse_value("12000"), Some(8000.0));
    /// assert_eq!(tone.parse_value("warm"), None);
    /// ```
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        let suffix = self.unit.suffix().trim();
        let number = if suffix.is_empty() {
            text
        } else {
            text.strip_suffix(suffix).unwrap_or(text).trim_end()
        };
        number.parse::<f32>().ok().map(|v| self.clamp(v))
    }
}

/// Trait for anything that exposes an indexed list of parameters.
///
/// Indices are zero-based and stable for the lifetime of the implementor.
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value at `index`. Out-of-range indices return `0.0`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value at `index`, clamped to the descriptor range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter index by display name, short name or string ID
    /// (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.string_id.eq_ignore_ascii_case(name)
                    || desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

}
