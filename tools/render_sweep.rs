//! Offline render harness.
//!
//! Drives the exciter engine with test material and writes the results as
//! WAV files under `render/`, for listening tests and response inspection:
//! a full-range sweep through the default settings, one render per factory
//! preset, and one render per soloed band.
//!
//! Usage: `cargo run --bin render_sweep`

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

use jexciter::dsp::{ExciterControls, MultibandExciter, NUM_BANDS};
use jexciter::presets::PresetBank;

const SAMPLE_RATE: u32 = 48_000;
const OUT_DIR: &str = "render";

fn wav_spec(channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Logarithmic sweep from `f0` to `f1` over `seconds`.
fn log_sweep(f0: f64, f1: f64, seconds: f64) -> Vec<f64> {
    let total = (seconds * SAMPLE_RATE as f64) as usize;
    let ratio = f1 / f0;
    let mut phase = 0.0f64;
    let mut out = Vec::with_capacity(total);
    for n in 0..total {
        let t = n as f64 / total as f64;
        let freq = f0 * ratio.powf(t);
        phase += 2.0 * PI * freq / SAMPLE_RATE as f64;
        out.push(0.8 * phase.sin());
    }
    out
}

/// Four-tone test signal with one component per band.
fn band_tones(seconds: f64) -> Vec<f64> {
    let total = (seconds * SAMPLE_RATE as f64) as usize;
    let freqs = [60.0, 400.0, 3_000.0, 12_000.0];
    (0..total)
        .map(|n| {
            let t = n as f64 / SAMPLE_RATE as f64;
            freqs
                .iter()
                .map(|&f| 0.2 * (2.0 * PI * f * t).sin())
                .sum::<f64>()
        })
        .collect()
}

/// Render a mono input through the engine into a stereo file, exercising the
/// mono-in/stereo-out frame path.
fn render_stereo(path: &Path, controls: &ExciterControls, input: &[f64]) -> Result<()> {
    let mut engine = MultibandExciter::new(SAMPLE_RATE as f64);
    engine.apply_controls(controls);

    let mut writer = WavWriter::create(path, wav_spec(2))
        .with_context(|| format!("creating {}", path.display()))?;
    for &x in input {
        let mut frame = [0.0f64; 2];
        if !engine.process_frame(&[x], &mut frame) {
            anyhow::bail!("engine rejected a mono->stereo frame");
        }
        writer.write_sample(frame[0] as f32)?;
        writer.write_sample(frame[1] as f32)?;
    }
    writer.finalize().context("finalizing wav")?;
    Ok(())
}

fn main() -> Result<()> {
    std::fs::create_dir_all(OUT_DIR).context("creating output directory")?;
    let out = Path::new(OUT_DIR);

    // Full-range sweep at the default settings.
    let sweep = log_sweep(20.0, 20_000.0, 6.0);
    render_stereo(&out.join("sweep_default.wav"), &ExciterControls::default(), &sweep)?;
    println!("wrote sweep_default.wav");

    // One render per factory preset.
    let bank = PresetBank::factory();
    let tones = band_tones(4.0);
    for name in bank.names() {
        let mut controls = ExciterControls::default();
        bank.apply(name, &mut controls);
        let file = format!(
            "preset_{}.wav",
            name.to_lowercase().replace(' ', "_")
        );
        render_stereo(&out.join(&file), &controls, &tones)?;
        println!("wrote {file}");
    }

    // Solo each band against the sweep to hear the crossover slopes.
    let band_names = ["low", "low_mid", "high_mid", "treble"];
    for band in 0..NUM_BANDS {
        let mut controls = ExciterControls::default();
        controls.band_solo[band] = true;
        controls.sat_db[band] = 12.0;
        let file = format!("solo_{}.wav", band_names[band]);
        render_stereo(&out.join(&file), &controls, &sweep)?;
        println!("wrote {file}");
    }

    Ok(())
}
