//! Sub808 Core - parameter model and DSP primitives
//!
//! The building blocks shared by the Sub808 synth engine, the preset layer
//! and the plugin wrapper.
//!
//! # Parameters
//!
//! - [`ParamDescriptor`] - range, default, unit, scale and stable IDs of a control
//! - [`ParameterInfo`] - indexed parameter introspection
//! - [`SynthParam`] - the ten synth controls
//! - [`SynthParams`] - a per-block value snapshot
//!
//! # DSP
//!
//! - [`OnePole`] - one-pole lowpass with exposed memory
//! - [`midi_to_freq`], [`semitones_to_ratio`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for targets without an OS.
//! An allocator is still needed for [`ParamDescriptor::format_value`].
//!
//! ```toml
//! [dependencies]
//! sub808-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod math;
pub mod one_pole;
pub mod param_info;
pub mod params;

pub use math::{A4_FREQ, A4_NOTE, flush_denormal, midi_to_freq, semitones_to_ratio};
pub use one_pole::OnePole;
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use params::{PARAM_COUNT, SynthParam, SynthParams};
