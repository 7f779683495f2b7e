//! Offline rendering command.
//!
//! Drives the plugin processor the way a host would: parameters go through
//! the shared atomic cells, notes arrive as timed events, audio comes out in
//! blocks. Blocks are split at note boundaries so every event lands on its
//! exact sample.

use anyhow::{Context, bail};
use clap::Args;
use std::path::PathBuf;
use sub808_config::Preset;
use sub808_plugin::{AudioConfig, PluginProcessor, Sub808AudioProcessor, Sub808Shared};
use sub808_synth::{NoteEvent, TimedEvent};

use super::common::{PresetSource, parse_assignment, resolve_preset};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file (32-bit float)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or index, or a user preset name
    #[arg(short, long, value_name = "NAME|INDEX")]
    preset: Option<String>,

    /// Load parameters from a preset TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    preset_file: Option<PathBuf>,

    /// Override a parameter, e.g. --set drive=0.6 --set "tone=450 Hz"
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// MIDI note(s) to play back-to-back (default: 36)
    #[arg(
        short,
        long = "note",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(0..=127)
    )]
    notes: Vec<u8>,

    /// Gate length of each note in seconds
    #[arg(long, default_value = "0.5")]
    note_length: f32,

    /// Silence rendered after the last note-off, in seconds
    #[arg(long, default_value = "0.5")]
    tail: f32,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Output channels (1 or 2)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=2))]
    channels: u16,

    /// Largest processing block in samples
    #[arg(long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..=65536))]
    block_size: u32,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.note_length.is_finite() && args.note_length > 0.0) {
        bail!("--note-length must be a positive number of seconds");
    }
    if !(args.tail.is_finite() && args.tail >= 0.0) {
        bail!("--tail must be zero or a positive number of seconds");
    }
    if args.sample_rate == 0 {
        bail!("--sample-rate must be positive");
    }

    let shared = Sub808Shared::new(None);

    if let Some(name) = &args.preset {
        let resolved = resolve_preset(name)?;
        match resolved.source {
            PresetSource::Factory(index) => {
                shared.load_preset(index as isize);
            }
            PresetSource::User => shared.apply(&resolved.params),
        }
        tracing::info!(preset = %resolved.name, "using preset");
    }
    if let Some(path) = &args.preset_file {
        let preset = Preset::load(path)
            .with_context(|| format!("failed to load preset file {}", path.display()))?;
        shared.apply(&preset.to_params());
        tracing::info!(preset = %preset.name, path = %path.display(), "using preset file");
    }
    for assignment in &args.set {
        let (param, value) = parse_assignment(assignment)?;
        shared.set(param, value);
        tracing::debug!(param = param.string_id(), value, "parameter override");
    }

    let notes = if args.notes.is_empty() {
        vec![36]
    } else {
        args.notes.clone()
    };
    let sample_rate = args.sample_rate as f32;
    let note_samples = seconds_to_samples(args.note_length, sample_rate).max(1);
    let tail_samples = seconds_to_samples(args.tail, sample_rate);
    let (schedule, total) = schedule_notes(&notes, note_samples, tail_samples);

    let channels = usize::from(args.channels);
    let block_size = args.block_size as usize;
    let mut processor = Sub808AudioProcessor::new(shared);
    processor.prepare(AudioConfig {
        sample_rate,
        max_block_size: block_size,
        channels,
    });

    let spec = hound::WavSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&args.output, spec)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut buffers = vec![vec![0.0f32; block_size]; channels];
    let mut events: Vec<TimedEvent> = Vec::with_capacity(2);
    let mut next_event = 0;
    let mut position = 0u64;
    let mut peak = 0.0f32;

    while position < total {
        events.clear();
        while let Some(&(at, event)) = schedule.get(next_event)
            && at == position
        {
            events.push(TimedEvent::new(0, event));
            next_event += 1;
        }

        let boundary = schedule.get(next_event).map_or(total, |&(at, _)| at);
        let len = (boundary - position).min(block_size as u64) as usize;

        let mut slices: Vec<&mut [f32]> = buffers.iter_mut().map(|b| &mut b[..len]).collect();
        processor.process(&mut slices, &events);

        for i in 0..len {
            for buffer in &buffers {
                let sample = buffer[i];
                peak = peak.max(sample.abs());
                writer.write_sample(sample)?;
            }
        }
        position += len as u64;
    }
    writer.finalize()?;

    let seconds = total as f32 / sample_rate;
    tracing::info!(
        notes = notes.len(),
        samples = total,
        peak,
        path = %args.output.display(),
        "render complete"
    );
    println!(
        "Rendered {} note(s), {:.2} s at {} Hz to {}",
        notes.len(),
        seconds,
        args.sample_rate,
        args.output.display()
    );
    Ok(())
}

fn seconds_to_samples(seconds: f32, sample_rate: f32) -> u64 {
    (seconds * sample_rate).round() as u64
}

/// Note-on/note-off pairs played back-to-back, followed by `tail` samples.
///
/// Returns the events sorted by sample position and the total length.
fn schedule_notes(notes: &[u8], note_samples: u64, tail: u64) -> (Vec<(u64, NoteEvent)>, u64) {
    let mut schedule = Vec::with_capacity(notes.len() * 2);
    let mut at = 0u64;
    for &note in notes {
        schedule.push((at, NoteEvent::NoteOn { note, velocity: 100 }));
        at += note_samples;
        schedule.push((at, NoteEvent::NoteOff { note }));
    }
    (schedule, at + tail)
}
