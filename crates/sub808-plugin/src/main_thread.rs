//! Main-thread side of the Sub808 plugin.
//!
//! Handles parameter metadata queries, display formatting, state
//! save/restore and the factory program list. Nothing here runs on the
//! audio thread.

use sub808_config::{
    ConfigError, FACTORY_PRESET_COUNT, FACTORY_PRESET_NAMES, restore_state, save_state,
};
use sub808_core::ParamDescriptor;

use crate::shared::Sub808Shared;

/// Main-thread handler for the Sub808 plugin.
#[derive(Debug, Clone)]
pub struct Sub808MainThread {
    shared: Sub808Shared,
}

impl Sub808MainThread {
    /// Create a new main-thread handler referencing the shared state.
    pub fn new(shared: Sub808Shared) -> Self {
        Self { shared }
    }

    /// Shared parameter state.
    pub fn shared(&self) -> &Sub808Shared {
        &self.shared
    }

    // ── Parameters ──────────────────────────────────────────────────────

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.shared.param_count()
    }

    /// Descriptor for the parameter at `index`.
    pub fn param_info(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.shared.descriptor(index)
    }

    /// Current value for a stable parameter id.
    pub fn get_value(&self, id: u32) -> Option<f32> {
        let index = self.shared.index_by_id(id)?;
        self.shared.get_value(index)
    }

    /// Host automation write. Unknown ids are ignored.
    pub fn set_value(&self, id: u32, value: f32) {
        if let Some(index) = self.shared.index_by_id(id) {
            self.shared.set_value(index, value);
        }
    }

    /// Format `value` for display, e.g. `"300 Hz"`.
    pub fn value_to_text(&self, id: u32, value: f32) -> String {
        match self
            .shared
            .index_by_id(id)
            .and_then(|i| self.shared.descriptor(i))
        {
            Some(desc) => desc.format_value(value),
            None => format!("{value:.2}"),
        }
    }

    /// Parse display text back to a clamped value.
    pub fn text_to_value(&self, id: u32, text: &str) -> Option<f32> {
        let index = self.shared.index_by_id(id)?;
        self.shared.descriptor(index)?.parse_value(text)
    }

    // ── State ───────────────────────────────────────────────────────────

    /// Serialize all ten values.
    ///
    /// ```json
    /// {"plugin":"sub808","params":{"attack":0.005,"gain":0.25}}
    /// ```
    pub fn save_state(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(save_state(&self.shared.snapshot())?.into_bytes())
    }

    /// Restore a state document.
    ///
    /// Keys the document lacks go back to their defaults. Rejected documents
    /// leave every value untouched.
    pub fn load_state(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        match restore_state(bytes) {
            Ok(params) => {
                self.shared.apply(&params);
                tracing::debug!(len = bytes.len(), "restored plugin state");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejected plugin state");
                Err(err)
            }
        }
    }

    // ── Programs ────────────────────────────────────────────────────────

    /// Number of factory programs.
    pub fn program_count(&self) -> usize {
        FACTORY_PRESET_COUNT
    }

    /// Name of program `index`, or `None` if out of range.
    pub fn program_name(&self, index: isize) -> Option<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| FACTORY_PRESET_NAMES.get(i).copied())
    }

    /// Last selected program.
    pub fn current_program(&self) -> usize {
        self.shared.current_program()
    }

    /// Select a factory program; out-of-range indices are no-ops.
    pub fn select_program(&self, index: isize) -> bool {
        self.shared.load_preset(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sub808_core::{SynthParam, SynthParams};

    fn main_thread() -> Sub808MainThread {
        Sub808MainThread::new(Sub808Shared::new(None))
    }

    #[test]
    fn param_info_covers_all_params() {
        let mt = main_thread();
        assert_eq!(mt.param_count(), 10);
        assert_eq!(mt.param_info(0).unwrap().string_id, "gain");
        assert_eq!(mt.param_info(9).unwrap().string_id, "toneCutoff");
        assert!(mt.param_info(10).is_none());
    }

    #[test]
    fn automation_by_id() {
        let mt = main_thread();
        mt.set_value(7, 0.6);
        assert_eq!(mt.get_value(7), Some(0.6));
        mt.set_value(42, 1.0);
        assert_eq!(mt.get_value(42), None);
    }

    #[test]
    fn text_conversion() {
        let mt = main_thread();
        assert_eq!(mt.value_to_text(9, 300.0), "300 Hz");
        assert_eq!(mt.value_to_text(1, 0.005), "0.005 s");
        assert_eq!(mt.value_to_text(99, 1.5), "1.50");
        assert_eq!(mt.text_to_value(9, "450 Hz"), Some(450.0));
        assert_eq!(mt.text_to_value(9, "20000"), Some(8000.0));
        assert_eq!(mt.text_to_value(99, "1"), None);
    }

    #[test]
    fn state_roundtrip() {
        let mt = main_thread();
        mt.shared().set(SynthParam::Color, -0.7);
        mt.shared().set(SynthParam::Release, 1.25);
        let bytes = mt.save_state().unwrap();

        let other = main_thread();
        other.load_state(&bytes).unwrap();
        assert_eq!(other.shared().snapshot(), mt.shared().snapshot());
    }

    #[test]
    fn rejected_state_leaves_values() {
        let mt = main_thread();
        mt.shared().set(SynthParam::Gain, 0.33);
        assert!(mt.load_state(b"{ broken").is_err());
        assert!(mt.load_state(br#"{"plugin":"sub808","params":{"gain":"x"}}"#).is_err());
        assert_eq!(mt.shared().value(SynthParam::Gain), 0.33);
    }

    #[test]
    fn programs() {
        let mt = main_thread();
        assert_eq!(mt.program_count(), 10);
        assert_eq!(mt.program_name(3), Some("Subby Glide"));
        assert_eq!(mt.program_name(-1), None);
        assert_eq!(mt.program_name(10), None);

        assert!(mt.select_program(3));
        assert_eq!(mt.current_program(), 3);
        assert_eq!(mt.shared().snapshot().pitch_semitones, -2.0);

        assert!(!mt.select_program(11));
        assert_eq!(mt.current_program(), 3);
        assert_ne!(mt.shared().snapshot(), SynthParams::default());
    }
}
