//! Thread-safe shared state for the Sub808 plugin.
//!
//! `Sub808Shared` lives for the lifetime of the plugin instance and is
//! accessible from both the main thread (params, state, programs) and the
//! audio thread (processing). Parameter values are stored as atomic `u32`
//! (f32 bit-cast) for lock-free access.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use sub808_config::{factory_preset, param_by_name};
use sub808_core::{PARAM_COUNT, ParamDescriptor, SynthParam, SynthParams};

/// Inner storage for plugin shared state.
struct Sub808SharedData {
    /// Current parameter values as f32 bit-cast to u32, in id order.
    values: [AtomicU32; PARAM_COUNT],
    /// Index of the last selected factory program.
    program: AtomicUsize,
    /// Called after main-thread writes so a mirroring UI or host can refresh.
    host_notify: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Shared state accessible from all plugin threads.
///
/// One atomic cell per parameter. Writers store whole values, the audio
/// thread loads each cell once per block; no consistency across cells is
/// promised within a block.
///
/// Wraps an `Arc` so it can be cloned into the audio processor and any
/// `'static + Send` callbacks.
#[derive(Clone)]
pub struct Sub808Shared {
    inner: Arc<Sub808SharedData>,
}

impl Sub808Shared {
    /// Create shared state with every parameter at its default.
    ///
    /// `host_notify` is called after parameter changes that originate outside
    /// the host's own automation (preset loads, state restore). Pass `None`
    /// for standalone or test use.
    pub fn new(host_notify: Option<Box<dyn Fn() + Send + Sync>>) -> Self {
        let values = SynthParam::ALL.map(|p| AtomicU32::new(p.default_value().to_bits()));
        Self {
            inner: Arc::new(Sub808SharedData {
                values,
                program: AtomicUsize::new(0),
                host_notify,
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        SynthParam::from_index(index).map(SynthParam::descriptor)
    }

    /// Find parameter index by stable `ParamId`.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        SynthParam::ALL
            .iter()
            .position(|p| p.descriptor().id.0 == id)
    }

    /// Find parameter index by stable key, display name or short name.
    pub fn index_by_name(&self, name: &str) -> Option<usize> {
        param_by_name(name).map(SynthParam::index)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds;
    /// unknown indices are ignored.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, param)) = self
            .inner
            .values
            .get(index)
            .zip(SynthParam::from_index(index))
        {
            let clamped = param.descriptor().clamp(value);
            atomic.store(clamped.to_bits(), Ordering::Release);
        }
    }

    /// Read one parameter.
    pub fn value(&self, param: SynthParam) -> f32 {
        f32::from_bits(self.inner.values[param.index()].load(Ordering::Acquire))
    }

    /// Write one parameter, clamped.
    pub fn set(&self, param: SynthParam, value: f32) {
        self.set_value(param.index(), value);
    }

    /// Load every cell into a plain snapshot for one audio block.
    pub fn snapshot(&self) -> SynthParams {
        let mut values = [0.0; PARAM_COUNT];
        for (slot, atomic) in values.iter_mut().zip(&self.inner.values) {
            *slot = f32::from_bits(atomic.load(Ordering::Acquire));
        }
        SynthParams::from_array(&values)
    }

    /// Store all ten values, clamped, then notify.
    pub fn apply(&self, params: &SynthParams) {
        for (param, value) in params.iter() {
            self.set(param, value);
        }
        self.notify_host();
    }

    /// Apply factory preset `index`.
    ///
    /// Returns `false` and changes nothing when `index` is negative or past
    /// the end of the catalog.
    pub fn load_preset(&self, index: isize) -> bool {
        let Some(preset) = factory_preset(index) else {
            tracing::debug!(index, "ignoring out-of-range program");
            return false;
        };
        for (param, value) in preset.params().iter() {
            self.set(param, value);
        }
        self.inner.program.store(index.unsigned_abs(), Ordering::Release);
        tracing::info!(index, name = preset.name, "loaded factory preset");
        self.notify_host();
        true
    }

    /// Index of the last selected factory program.
    pub fn current_program(&self) -> usize {
        self.inner.program.load(Ordering::Acquire)
    }

    /// Invoke the change callback, if any.
    pub fn notify_host(&self) {
        if let Some(cb) = &self.inner.host_notify {
            cb();
        }
    }
}

impl Default for Sub808Shared {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Sub808Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sub808Shared")
            .field("params", &self.snapshot())
            .field("program", &self.current_program())
            .finish_non_exhaustive()
    }
}
