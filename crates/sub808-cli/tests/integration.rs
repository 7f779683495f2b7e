//! Integration tests for sub808-cli.
//!
//! Tests cover the binary's listing commands and end-to-end rendering and
//! preset export workflows.

use std::process::Command;

use sub808_config::Preset;
use tempfile::TempDir;

/// Helper to get the path to the `sub808` binary built by cargo.
fn sub808_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sub808"))
}

// ---------------------------------------------------------------------------
// `sub808 --help` / `--version`
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = sub808_bin()
        .arg("--help")
        .output()
        .expect("failed to run sub808 --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("presets"));
    assert!(stdout.contains("params"));
}

#[test]
fn cli_version_works() {
    let output = sub808_bin()
        .arg("--version")
        .output()
        .expect("failed to run sub808 --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ---------------------------------------------------------------------------
// `sub808 params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_all_keys() {
    let output = sub808_bin().arg("params").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "gain",
        "attack",
        "decay",
        "sustain",
        "release",
        "pitchSemitones",
        "glideTime",
        "drive",
        "color",
        "toneCutoff",
    ] {
        assert!(stdout.contains(key), "params listing should contain '{key}'");
    }
    assert!(stdout.contains("300 Hz"));
}

#[test]
fn cli_params_detail_and_unknown() {
    let output = sub808_bin().args(["params", "tone"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("toneCutoff"));
    assert!(stdout.contains("80 Hz .. 8000 Hz"));

    let output = sub808_bin().args(["params", "wobble"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("wobble"));
}

// ---------------------------------------------------------------------------
// `sub808 presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_factory() {
    let output = sub808_bin()
        .args(["presets", "list", "--factory"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
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
    ] {
        assert!(stdout.contains(name), "missing factory preset '{name}'");
    }
}

#[test]
fn cli_presets_show() {
    let output = sub808_bin()
        .args(["presets", "show", "Punch 808"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Factory preset #4"));
    assert!(stdout.contains("520 Hz"));
    assert!(stdout.contains("0.001 s"), "zero attack shows clamped");
}

#[test]
fn cli_presets_show_unknown_fails() {
    let output = sub808_bin()
        .args(["presets", "show", "99"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown preset"));
}

#[test]
fn cli_presets_export_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glide.toml");

    let output = sub808_bin()
        .args(["presets", "export", "3"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let preset = Preset::load(&path).unwrap();
    assert_eq!(preset.name, "Subby Glide");
    assert_eq!(preset.to_params().pitch_semitones, -2.0);

    // Refuses to overwrite without --force.
    let output = sub808_bin()
        .args(["presets", "export", "3"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = sub808_bin()
        .args(["presets", "export", "Long Boom", "--force"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(Preset::load(&path).unwrap().name, "Long Boom");
}

// ---------------------------------------------------------------------------
// `sub808 render`
// ---------------------------------------------------------------------------

#[test]
fn cli_render_writes_float_wav() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boom.wav");

    let output = sub808_bin()
        .arg("render")
        .arg(&path)
        .args(["--preset", "Punch 808", "--note", "33", "--note", "40"])
        .args(["--note-length", "0.25", "--tail", "0.1", "--sample-rate", "44100"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);

    let samples: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
    let frames = samples.len() / 2;
    assert_eq!(frames, 2 * 11025 + 4410);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|&s| s.abs() > 0.01));
    assert!(samples.iter().all(|&s| s.abs() <= 0.9 * 4.0));

    // Mono-compatible stereo: both channels carry the same signal.
    for frame in samples.chunks_exact(2) {
        assert_eq!(frame[0], frame[1]);
    }
}

#[test]
fn cli_render_mono_with_overrides_and_preset_file() {
    let dir = TempDir::new().unwrap();
    let preset_path = dir.path().join("mine.toml");
    std::fs::write(
        &preset_path,
        "name = \"Mine\"\n[params]\ngain = 0.5\nrelease = 0.05\n",
    )
    .unwrap();
    let wav = dir.path().join("mono.wav");

    let output = sub808_bin()
        .arg("render")
        .arg(&wav)
        .arg("--preset-file")
        .arg(&preset_path)
        .args(["--set", "drive=0.7", "--set", "tone=1200 Hz"])
        .args(["--channels", "1", "--block-size", "64", "--note-length", "0.1", "--tail", "0.2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let mut reader = hound::WavReader::open(&wav).unwrap();
    assert_eq!(reader.spec().channels, 1);
    let samples: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 4800 + 9600);

    // A 50 ms release has finished well before the end of the tail.
    let end = &samples[samples.len() - 100..];
    assert!(end.iter().all(|&s| s.abs() < 1e-4));
}

#[test]
fn cli_render_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("x.wav");

    for extra in [
        &["--set", "wobble=1"][..],
        &["--channels", "3"],
        &["--note", "128"],
        &["--preset", "No Such Preset"],
        &["--preset", "4", "--preset-file", "whatever.toml"],
    ] {
        let output = sub808_bin()
            .arg("render")
            .arg(&wav)
            .args(extra)
            .output()
            .unwrap();
        assert!(!output.status.success(), "should reject {extra:?}");
    }
}
