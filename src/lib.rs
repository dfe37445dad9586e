mod debug;
pub mod dsp;
pub mod meters;
pub mod presets;

use std::sync::Arc;

use nih_plug::prelude::*;

use crate::dsp::{ExciterControls, MultibandExciter};
use crate::meters::{peak_to_db, Meters};

const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

// -----------------------------------------------------------------------------
// PARAMETERS
// -----------------------------------------------------------------------------
//
// Seventeen controls: per-band on/solo switches, saturation drive in dB,
// wet mix in percent, plus master volume. Ranges and defaults are part of
// the persisted-state contract; see `dsp::controls::ControlId` for the
// stable integer IDs used by the preset bank.
#[derive(Params)]
pub struct JExciterParams {
    #[id = "low_on"]
    pub low_on: BoolParam,

    #[id = "low_mid_on"]
    pub low_mid_on: BoolParam,

    #[id = "high_mid_on"]
    pub high_mid_on: BoolParam,

    #[id = "treble_on"]
    pub treble_on: BoolParam,

    #[id = "low_solo"]
    pub low_solo: BoolParam,

    #[id = "low_mid_solo"]
    pub low_mid_solo: BoolParam,

    #[id = "high_mid_solo"]
    pub high_mid_solo: BoolParam,

    #[id = "treble_solo"]
    pub treble_solo: BoolParam,

    #[id = "low_sat"]
    pub low_sat: FloatParam,

    #[id = "low_mid_sat"]
    pub low_mid_sat: FloatParam,

    #[id = "high_mid_sat"]
    pub high_mid_sat: FloatParam,

    #[id = "treble_sat"]
    pub treble_sat: FloatParam,

    #[id = "low_mix"]
    pub low_mix: FloatParam,

    #[id = "low_mid_mix"]
    pub low_mid_mix: FloatParam,

    #[id = "high_mid_mix"]
    pub high_mid_mix: FloatParam,

    #[id = "treble_mix"]
    pub treble_mix: FloatParam,

    #[id = "master_volume"]
    pub master_volume: FloatParam,
}

// Helper to format drive/volume values in dB for the DAW display
fn format_db(v: f32) -> String {
    format!("{:.1} dB", v)
}

// Helper to format mix values as "50%"
fn format_percent(v: f32) -> String {
    format!("{:.0}%", v)
}

fn sat_param(name: &str) -> FloatParam {
    FloatParam::new(name, 0.0, FloatRange::Linear { min: 0.0, max: 24.0 })
        .with_value_to_string(Arc::new(format_db))
        .with_smoother(SmoothingStyle::Linear(50.0))
}

fn mix_param(name: &str) -> FloatParam {
    FloatParam::new(
        name,
        50.0,
        FloatRange::Linear {
            min: 0.0,
            max: 100.0,
        },
    )
    .with_value_to_string(Arc::new(format_percent))
    .with_smoother(SmoothingStyle::Linear(50.0))
}

impl Default for JExciterParams {
    fn default() -> Self {
        Self {
            low_on: BoolParam::new("Low On", true),
            low_mid_on: BoolParam::new("Low Mid On", true),
            high_mid_on: BoolParam::new("High Mid On", true),
            treble_on: BoolParam::new("Treble On", true),

            low_solo: BoolParam::new("Low Solo", false),
            low_mid_solo: BoolParam::new("Low Mid Solo", false),
            high_mid_solo: BoolParam::new("High Mid Solo", false),
            treble_solo: BoolParam::new("Treble Solo", false),

            low_sat: sat_param("Low Sat"),
            low_mid_sat: sat_param("Low Mid Sat"),
            high_mid_sat: sat_param("High Mid Sat"),
            treble_sat: sat_param("Treble Sat"),

            low_mix: mix_param("Low Mix"),
            low_mid_mix: mix_param("Low Mid Mix"),
            high_mid_mix: mix_param("High Mid Mix"),
            treble_mix: mix_param("Treble Mix"),

            master_volume: FloatParam::new(
                "Master Volume",
                0.0,
                FloatRange::Linear {
                    min: -60.0,
                    max: 12.0,
                },
            )
            .with_value_to_string(Arc::new(format_db))
            .with_smoother(SmoothingStyle::Linear(50.0)),
        }
    }
}

impl JExciterParams {
    /// Snapshot the current (smoothed) values into the engine's control
    /// struct. Calling this advances the float smoothers by one sample, so
    /// call it exactly once per frame.
    fn snapshot(&self) -> ExciterControls {
        ExciterControls {
            band_on: [
                self.low_on.value(),
                self.low_mid_on.value(),
                self.high_mid_on.value(),
                self.treble_on.value(),
            ],
            band_solo: [
                self.low_solo.value(),
                self.low_mid_solo.value(),
                self.high_mid_solo.value(),
                self.treble_solo.value(),
            ],
            sat_db: [
                f64::from(self.low_sat.smoothed.next()),
                f64::from(self.low_mid_sat.smoothed.next()),
                f64::from(self.high_mid_sat.smoothed.next()),
                f64::from(self.treble_sat.smoothed.next()),
            ],
            mix_pct: [
                f64::from(self.low_mix.smoothed.next()),
                f64::from(self.low_mid_mix.smoothed.next()),
                f64::from(self.high_mid_mix.smoothed.next()),
                f64::from(self.treble_mix.smoothed.next()),
            ],
            master_volume_db: f64::from(self.master_volume.smoothed.next()),
        }
    }
}

// -----------------------------------------------------------------------------
// PLUGIN
// -----------------------------------------------------------------------------
pub struct JExciter {
    params: Arc<JExciterParams>,
    engine: MultibandExciter,
    sample_rate: f32,
    meters: Arc<Meters>,
}

impl Default for JExciter {
    fn default() -> Self {
        Self {
            params: Arc::new(JExciterParams::default()),
            engine: MultibandExciter::new(f64::from(DEFAULT_SAMPLE_RATE)),
            sample_rate: DEFAULT_SAMPLE_RATE,
            meters: Arc::new(Meters::new()),
        }
    }
}

impl JExciter {
    /// Shared meter storage for a UI or host shell.
    pub fn meters(&self) -> Arc<Meters> {
        self.meters.clone()
    }

    fn process_internal(&mut self, buffer: &mut Buffer) -> ProcessStatus {
        let channel_count = buffer.channels();
        if channel_count == 0 || channel_count > 2 {
            return ProcessStatus::Normal;
        }

        let mut peak_in = [0.0f32; 2];
        let mut peak_out = [0.0f32; 2];

        for mut frame in buffer.iter_samples() {
            // Controls are recooked every frame from the smoothed parameter
            // values; cooking is pure so this matches any coarser cadence.
            let controls = self.params.snapshot();
            self.engine.apply_controls(&controls);

            let mut input = [0.0f64; 2];
            for (ch, sample) in frame.iter_mut().enumerate() {
                input[ch] = f64::from(*sample);
            }

            let mut output = [0.0f64; 2];
            if !self
                .engine
                .process_frame(&input[..channel_count], &mut output[..channel_count])
            {
                // Unsupported shape: leave the buffer as-is.
                continue;
            }

            for (ch, sample) in frame.iter_mut().enumerate() {
                peak_in[ch] = peak_in[ch].max(input[ch].abs() as f32);
                *sample = output[ch] as f32;
                peak_out[ch] = peak_out[ch].max(sample.abs());
            }
        }

        let right = if channel_count == 2 { 1 } else { 0 };
        self.meters
            .set_input_peaks(peak_to_db(peak_in[0]), peak_to_db(peak_in[right]));
        self.meters
            .set_output_peaks(peak_to_db(peak_out[0]), peak_to_db(peak_out[right]));

        ProcessStatus::Normal
    }
}

impl Plugin for JExciter {
    const NAME: &'static str = "JExciter";
    const VENDOR: &'static str = "JEPlugins";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            ..AudioIOLayout::const_default()
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            ..AudioIOLayout::const_default()
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;
    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        _audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        #[cfg(feature = "debug")]
        crate::debug::logger::init();

        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.sample_rate = buffer_config.sample_rate;
            self.engine.prepare(f64::from(buffer_config.sample_rate));
            self.meters.reset();

            crate::jx_log!("engine prepared at {} Hz", self.sample_rate);
            #[cfg(feature = "debug")]
            crate::debug::logger::drain_to_file();

            true
        }))
        .unwrap_or(false)
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.process_internal(buffer)
        }))
        .unwrap_or(ProcessStatus::Normal)
    }

    fn reset(&mut self) {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.engine.reset();
            self.meters.reset();
        }))
        .unwrap_or(());
    }
}

impl ClapPlugin for JExciter {
    const CLAP_ID: &'static str = "com.jeplugins.jexciter";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Four-band multiband harmonic exciter");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Distortion,
        ClapFeature::Stereo,
        ClapFeature::Mono,
    ];
}

impl Vst3Plugin for JExciter {
    const VST3_CLASS_ID: [u8; 16] = *b"JEPluginsExciter";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Distortion];
}

nih_export_clap!(JExciter);
nih_export_vst3!(JExciter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::NUM_BANDS;

    #[test]
    fn parameter_defaults_match_the_table() {
        // Smoothed values only come alive under a host wrapper, so assert
        // the construction defaults through the plain value accessors.
        let params = JExciterParams::default();
        assert!(params.low_on.value() && params.treble_on.value());
        assert!(!params.low_solo.value() && !params.treble_solo.value());
        assert_eq!(params.low_sat.value(), 0.0);
        assert_eq!(params.treble_sat.value(), 0.0);
        assert_eq!(params.low_mix.value(), 50.0);
        assert_eq!(params.high_mid_mix.value(), 50.0);
        assert_eq!(params.master_volume.value(), 0.0);
    }

    #[test]
    fn snapshot_carries_the_switch_flags() {
        let params = JExciterParams::default();
        let snapshot = params.snapshot();
        assert_eq!(snapshot.band_on, [true; NUM_BANDS]);
        assert_eq!(snapshot.band_solo, [false; NUM_BANDS]);
    }

    #[test]
    fn display_formatters() {
        assert_eq!(format_db(-6.5), "-6.5 dB");
        assert_eq!(format_db(0.0), "0.0 dB");
        assert_eq!(format_percent(50.0), "50%");
    }
}
