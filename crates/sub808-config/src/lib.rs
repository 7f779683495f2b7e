//! Presets and persisted state for the Sub808 bass synth.
//!
//! This crate provides:
//!
//! - The ordered factory preset catalog ([`factory_presets`], [`factory_preset`])
//! - TOML user presets ([`Preset`])
//! - JSON host state documents ([`save_state`], [`restore_state`])
//! - Platform paths for user presets ([`paths`])
//!
//! # Example
//!
//! ```rust,no_run
//! use sub808_config::{Preset, factory_preset};
//!
//! // Start from a factory sound and tweak it
//! let mut preset = factory_preset(4).unwrap().to_preset();
//! preset.name = "My Punch".to_string();
//! preset.set_param("toneCutoff", 700.0)?;
//! preset.save("my_punch.toml")?;
//!
//! // Load it back as engine values
//! let params = Preset::load("my_punch.toml")?.to_params();
//! assert_eq!(params.tone_cutoff, 700.0);
//! # Ok::<(), sub808_config::ConfigError>(())
//! ```

mod error;
mod preset;
mod state;

pub mod factory_presets;
#[cfg(feature = "std")]
pub mod paths;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_COUNT, FACTORY_PRESET_NAMES, FactoryPreset, factory_preset, factory_presets,
    find_factory_preset, is_factory_preset,
};
pub use preset::Preset;
pub use state::{STATE_TAG, restore_state, save_state};

use sub808_core::{ParameterInfo, SynthParam, SynthParams};

/// Resolve a parameter from its stable key, display name or short name
/// (case-insensitive).
///
/// ```rust
/// use sub808_config::param_by_name;
/// use sub808_core::SynthParam;
///
/// assert_eq!(param_by_name("toneCutoff"), Some(SynthParam::ToneCutoff));
/// assert_eq!(param_by_name("atk"), Some(SynthParam::Attack));
/// assert_eq!(param_by_name("wobble"), None);
/// ```
pub fn param_by_name(name: &str) -> Option<SynthParam> {
    SynthParams::default()
        .find_param_by_name(name.trim())
        .and_then(SynthParam::from_index)
}
