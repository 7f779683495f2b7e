//! User preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use sub808_core::SynthParams;

use crate::error::ConfigError;

/// A named set of parameter values stored as TOML.
///
/// Values are keyed by the stable parameter names used for host state, so a
/// preset written by one version keeps loading after parameters are added.
///
/// # TOML Format
///
/// ```toml
/// name = "My 808"
/// description = "Short and gritty"
///
/// [params]
/// gain = 0.8
/// drive = 0.55
/// toneCutoff = 420.0
/// ```
///
/// Unknown keys are ignored and missing keys take their defaults when the
/// preset is turned into [`SynthParams`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by stable name.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new preset with no stored values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset holding all ten values of `params`.
    pub fn from_params(name: impl Into<String>, params: &SynthParams) -> Self {
        let mut preset = Self::new(name);
        preset.params = params
            .iter()
            .map(|(param, value)| (param.string_id().to_string(), value))
            .collect();
        preset
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Store one value by stable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParam`] if no parameter has that name.
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<(), ConfigError> {
        let param = crate::param_by_name(name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_string()))?;
        self.params
            .insert(param.string_id().to_string(), param.descriptor().clamp(value));
        Ok(())
    }

    /// Resolve the stored values against the defaults.
    ///
    /// Unknown keys are skipped and every value is clamped to its range.
    pub fn to_params(&self) -> SynthParams {
        self.apply_to(&SynthParams::default())
    }

    /// Overlay the stored values onto `base`, keeping `base` for missing keys.
    pub fn apply_to(&self, base: &SynthParams) -> SynthParams {
        let mut params = *base;
        for (key, &value) in &self.params {
            if !params.set_by_string_id(key, value) {
                tracing::debug!(preset = %self.name, key = %key, "skipping unknown preset key");
            }
        }
        params
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::from_params("Untitled", &SynthParams::default())
    }
}
