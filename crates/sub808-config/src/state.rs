//! Host state documents.
//!
//! State is a small JSON object tagged with the plugin name:
//!
//! ```json
//! {"plugin":"sub808","params":{"gain":0.25,"attack":0.005}}
//! ```
//!
//! Saving always writes all ten values. Restoring is all-or-nothing: a
//! document that fails any check changes nothing, and a document that
//! passes replaces every value, with defaults for keys it lacks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sub808_core::{SynthParam, SynthParams};

use crate::error::ConfigError;

/// Value of the `plugin` tag.
pub const STATE_TAG: &str = "sub808";

#[derive(Serialize, Deserialize)]
struct StateDocument {
    plugin: String,
    params: BTreeMap<String, Value>,
}

/// Serialize all ten values to a state document.
pub fn save_state(params: &SynthParams) -> Result<String, ConfigError> {
    let doc = StateDocument {
        plugin: STATE_TAG.to_string(),
        params: params
            .iter()
            .map(|(param, value)| (param.string_id().to_string(), Value::from(value)))
            .collect(),
    };
    Ok(serde_json::to_string(&doc)?)
}

/// Restore a state document into a full parameter set.
///
/// Unknown keys are ignored and missing keys take their defaults. Known
/// keys must hold numbers; values are clamped.
///
/// # Errors
///
/// [`ConfigError::StateJson`] when the bytes are not a JSON object with
/// `plugin` and `params` fields, [`ConfigError::StateFormat`] when the tag
/// is wrong or a known key holds something other than a number.
pub fn restore_state(bytes: &[u8]) -> Result<SynthParams, ConfigError> {
    let doc: StateDocument = serde_json::from_slice(bytes)?;
    if doc.plugin != STATE_TAG {
        return Err(ConfigError::state_format(format!(
            "state belongs to plugin {:?}",
            doc.plugin
        )));
    }

    let mut params = SynthParams::default();
    for (key, value) in &doc.params {
        let Some(param) = SynthParam::from_string_id(key) else {
            tracing::debug!(key = %key, "ignoring unknown state key");
            continue;
        };
        let number = value.as_f64().ok_or_else(|| {
            ConfigError::state_format(format!("value for {key:?} is not a number"))
        })? as f32;
        params.set(param, number);
    }
    Ok(params)
}
