//! Helpers shared by several commands.

use anyhow::{Context, bail};
use sub808_config::{Preset, find_factory_preset, param_by_name, paths};
use sub808_core::{SynthParam, SynthParams};

/// Where a resolved preset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSource {
    /// Factory catalog entry at this index.
    Factory(usize),
    /// TOML file in the user preset directory or at a path.
    User,
}

/// A preset resolved from the command line.
#[derive(Debug, Clone)]
pub struct ResolvedPreset {
    pub name: String,
    pub description: Option<String>,
    pub params: SynthParams,
    pub source: PresetSource,
}

impl ResolvedPreset {
    /// The preset in file format.
    pub fn to_preset(&self) -> Preset {
        let preset = Preset::from_params(&self.name, &self.params);
        match &self.description {
            Some(desc) => preset.with_description(desc),
            None => preset,
        }
    }
}

/// Resolve a factory preset (name or index) or a user preset (name or path).
pub fn resolve_preset(name: &str) -> anyhow::Result<ResolvedPreset> {
    if let Some((index, factory)) = find_factory_preset(name) {
        return Ok(ResolvedPreset {
            name: factory.name.to_string(),
            description: Some("Factory preset".to_string()),
            params: factory.params(),
            source: PresetSource::Factory(index),
        });
    }

    let Some(path) = paths::find_preset(name) else {
        bail!("Unknown preset: {name} (try `sub808 presets list`)");
    };
    let preset = Preset::load(&path)
        .with_context(|| format!("failed to load preset {}", path.display()))?;
    Ok(ResolvedPreset {
        name: preset.name.clone(),
        description: preset.description.clone(),
        params: preset.to_params(),
        source: PresetSource::User,
    })
}

/// Parse a `name=value` assignment. Values may carry the parameter's unit.
pub fn parse_assignment(text: &str) -> anyhow::Result<(SynthParam, f32)> {
    let Some((name, value)) = text.split_once('=') else {
        bail!("expected name=value, got {text:?}");
    };
    let param = param_by_name(name)
        .with_context(|| format!("unknown parameter {:?} (try `sub808 params`)", name.trim()))?;
    let value = param
        .descriptor()
        .parse_value(value)
        .with_context(|| format!("invalid value {:?} for {}", value.trim(), param.string_id()))?;
    Ok((param, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_by_key_and_display_name() {
        let (param, value) = parse_assignment("toneCutoff=450").unwrap();
        assert_eq!(param, SynthParam::ToneCutoff);
        assert_eq!(value, 450.0);

        let (param, value) = parse_assignment(" Tone = 600 Hz").unwrap();
        assert_eq!(param, SynthParam::ToneCutoff);
        assert_eq!(value, 600.0);
    }

    #[test]
    fn assignment_clamps() {
        let (_, value) = parse_assignment("gain=3").unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn assignment_errors() {
        assert!(parse_assignment("gain").is_err());
        assert!(parse_assignment("wobble=1").is_err());
        assert!(parse_assignment("drive=hot").is_err());
    }

    #[test]
    fn resolves_factory_by_name_and_index() {
        let by_name = resolve_preset("punch 808").unwrap();
        let by_index = resolve_preset("4").unwrap();
        assert_eq!(by_name.source, PresetSource::Factory(4));
        assert_eq!(by_name.params, by_index.params);
        assert_eq!(by_name.name, "Punch 808");
    }

    #[test]
    fn unknown_preset_is_error() {
        let err = resolve_preset("definitely-not-a-preset-name").unwrap_err();
        assert!(err.to_string().contains("Unknown preset"));
    }
}
