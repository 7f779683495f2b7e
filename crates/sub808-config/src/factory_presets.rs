//! Factory presets bundled with Sub808.
//!
//! The catalog is an ordered, immutable table. Values are stored exactly as
//! voiced, so a few sit outside the parameter ranges (an attack of zero);
//! [`FactoryPreset::params`] clamps them on the way out.

use sub808_core::SynthParams;

use crate::Preset;

/// One entry of the factory catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryPreset {
    /// Display name.
    pub name: &'static str,
    /// Stored values, not clamped.
    pub values: SynthParams,
}

impl FactoryPreset {
    /// Values ready to apply, clamped through the parameter ranges.
    pub fn params(&self) -> SynthParams {
        self.values.clamped()
    }

    /// The preset as a file-format [`Preset`] for export.
    pub fn to_preset(&self) -> Preset {
        Preset::from_params(self.name, &self.params()).with_description("Sub808 factory preset")
    }
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    name: &'static str,
    gain: f32,
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    pitch_semitones: f32,
    glide_time: f32,
    drive: f32,
    color: f32,
    tone_cutoff: f32,
) -> FactoryPreset {
    FactoryPreset {
        name,
        values: SynthParams {
            gain,
            attack,
            decay,
            sustain,
            release,
            pitch_semitones,
            glide_time,
            drive,
            color,
            tone_cutoff,
        },
    }
}

/// Number of factory presets.
pub const FACTORY_PRESET_COUNT: usize = 10;

#[rustfmt::skip]
static FACTORY_PRESETS: [FactoryPreset; FACTORY_PRESET_COUNT] = [
    //     name                  gain  atk   dec   sus   rel   pitch glide drive color  tone
    entry("Default Clean 808",  0.70, 0.02, 0.20, 0.60, 0.30,  0.0, 0.00, 0.10,  0.00, 300.0),
    entry("Spinz 808",          0.85, 0.00, 0.12, 0.55, 0.20,  0.0, 0.02, 0.45,  0.35, 450.0),
    entry("Zay 808",            0.80, 0.01, 0.25, 0.65, 0.30,  0.0, 0.03, 0.25, -0.20, 280.0),
    entry("Subby Glide",        0.75, 0.02, 0.30, 0.60, 0.40, -2.0, 0.12, 0.15, -0.10, 220.0),
    entry("Punch 808",          0.90, 0.00, 0.10, 0.50, 0.18,  0.0, 0.01, 0.50,  0.40, 520.0),
    entry("Warm Tape 808",      0.78, 0.02, 0.22, 0.62, 0.28, -1.0, 0.02, 0.30, -0.35, 260.0),
    entry("Distorted 808",      0.95, 0.00, 0.12, 0.50, 0.22,  0.0, 0.00, 0.75,  0.45, 600.0),
    entry("Long Boom",          0.80, 0.01, 0.40, 0.60, 0.60,  0.0, 0.00, 0.20, -0.25, 240.0),
    entry("Soft Attack 808",    0.70, 0.06, 0.28, 0.58, 0.35,  0.0, 0.00, 0.15, -0.15, 300.0),
    entry("Tight Click 808",    0.88, 0.00, 0.08, 0.45, 0.15,  0.0, 0.00, 0.40,  0.50, 650.0),
];

/// Factory preset names in catalog order.
pub static FACTORY_PRESET_NAMES: [&str; FACTORY_PRESET_COUNT] = [
    "Default Clean 808",
    "Spinz 808",
    "Zay 808",
    "Subby Glide",
    "Punch 808",
    "Warm Tape 808",
    "Distorted 808",
    "Long Boom",
    "Soft Attack 808",
    "Tight Click 808",
];

/// The whole catalog in order.
pub fn factory_presets() -> &'static [FactoryPreset] {
    &FACTORY_PRESETS
}

/// Preset at `index`, or `None` when the index is negative or past the end.
///
/// ```rust
/// use sub808_config::factory_preset;
///
/// assert_eq!(factory_preset(4).map(|p| p.name), Some("Punch 808"));
/// assert!(factory_preset(-1).is_none());
/// assert!(factory_preset(10).is_none());
/// ```
pub fn factory_preset(index: isize) -> Option<&'static FactoryPreset> {
    usize::try_from(index)
        .ok()
        .and_then(|i| FACTORY_PRESETS.get(i))
}

/// Find a factory preset by name (case-insensitive) or by catalog index.
pub fn find_factory_preset(name_or_index: &str) -> Option<(usize, &'static FactoryPreset)> {
    let key = name_or_index.trim();
    if let Ok(index) = key.parse::<usize>() {
        return FACTORY_PRESETS.get(index).map(|p| (index, p));
    }
    FACTORY_PRESETS
        .iter()
        .enumerate()
        .find(|(_, p)| p.name.eq_ignore_ascii_case(key))
}

/// Check if a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESETS
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
