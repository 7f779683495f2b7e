//! Host-agnostic plugin layer for the Sub808 bass synth.
//!
//! Splits the instrument along the lines every plugin host draws:
//!
//! | Piece | Thread | Role |
//! |-------|--------|------|
//! | [`Sub808Shared`] | any | one atomic cell per parameter, factory program selection |
//! | [`Sub808AudioProcessor`] | audio | [`PluginProcessor`]: prepare, process, layout, reset |
//! | [`Sub808MainThread`] | main | parameter metadata, value text, state, programs |
//!
//! A host binding wires its callbacks to these types; the CLI renderer
//! drives them directly.
//!
//! # Example
//!
//! ```rust
//! use sub808_plugin::{
//!     AudioConfig, PluginProcessor, Sub808AudioProcessor, Sub808MainThread, Sub808Shared,
//! };
//! use sub808_synth::TimedEvent;
//!
//! let shared = Sub808Shared::new(None);
//! let main_thread = Sub808MainThread::new(shared.clone());
//! let mut processor = Sub808AudioProcessor::new(shared);
//!
//! main_thread.select_program(4);
//! processor.prepare(AudioConfig { sample_rate: 48000.0, max_block_size: 256, channels: 2 });
//!
//! let mut left = [0.0f32; 256];
//! let mut right = [0.0f32; 256];
//! processor.process(&mut [&mut left[..], &mut right[..]], &[TimedEvent::note_on(33, 100)]);
//! assert!(left.iter().any(|&s| s != 0.0));
//! ```

pub mod audio;
pub mod main_thread;
pub mod shared;

pub use audio::{AudioConfig, ChannelLayout, PluginProcessor, Sub808AudioProcessor};
pub use main_thread::Sub808MainThread;
pub use shared::Sub808Shared;
