//! The multiband exciter signal path.
//!
//! One engine owns the full per-channel crossover networks for a stereo
//! pair, plus the cooked gains and the resolved band-enable mask that both
//! channels share. Everything here runs on the audio thread: no allocation,
//! no locks, bounded work per sample.

use crate::dsp::band_state::resolve_band_states;
use crate::dsp::controls::{CookedGains, ExciterControls};
use crate::dsp::crossover::{BandSplitter, NUM_BANDS};
use crate::dsp::saturation::excite;
use crate::dsp::utils::lerp;

pub struct MultibandExciter {
    sample_rate: f64,
    left: BandSplitter,
    right: BandSplitter,
    gains: CookedGains,
    enabled: [bool; NUM_BANDS],
}

impl MultibandExciter {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            left: BandSplitter::new(sample_rate),
            right: BandSplitter::new(sample_rate),
            gains: CookedGains::default(),
            enabled: [true; NUM_BANDS],
        }
    }

    /// Retune every crossover section for a new sample rate and clear the
    /// filter histories. Must run before the first `process_frame` call and
    /// again whenever the host changes the rate.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.left.configure(sample_rate);
        self.right.configure(sample_rate);
        self.reset();
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Cook the control snapshot and resolve the band mask. Both channels
    /// consume the result; there is no per-channel parameter state.
    pub fn apply_controls(&mut self, controls: &ExciterControls) {
        self.gains = CookedGains::cook(controls);
        self.enabled = resolve_band_states(controls.band_on, controls.band_solo);
    }

    /// Process one frame.
    ///
    /// Supported shapes: mono in / mono out, mono in / stereo out (the input
    /// feeds both channels' independent filter chains), stereo in / stereo
    /// out. Any other shape returns `false` and leaves the output untouched;
    /// that is a normal negative result, not an error.
    pub fn process_frame(&mut self, input: &[f64], output: &mut [f64]) -> bool {
        match (input.len(), output.len()) {
            (1, 1) => {
                output[0] = excite_channel(&mut self.left, &self.gains, &self.enabled, input[0]);
            }
            (1, 2) => {
                output[0] = excite_channel(&mut self.left, &self.gains, &self.enabled, input[0]);
                output[1] = excite_channel(&mut self.right, &self.gains, &self.enabled, input[0]);
            }
            (2, 2) => {
                output[0] = excite_channel(&mut self.left, &self.gains, &self.enabled, input[0]);
                output[1] = excite_channel(&mut self.right, &self.gains, &self.enabled, input[1]);
            }
            _ => return false,
        }
        true
    }

    /// Clear all filter histories. Coefficients and cooked gains survive.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

/// Run one channel's sample through the whole chain: split, excite, blend,
/// sum the enabled bands, apply master gain.
#[inline]
fn excite_channel(
    splitter: &mut BandSplitter,
    gains: &CookedGains,
    enabled: &[bool; NUM_BANDS],
    input: f64,
) -> f64 {
    let bands = splitter.split(input);

    let mut sum = 0.0;
    for band in 0..NUM_BANDS {
        // Disabled bands contribute nothing, dry signal included. The
        // filters above still ran, so re-enabling a band is click-free
        // state-wise.
        if !enabled[band] {
            continue;
        }
        let dry = bands[band];
        let wet = excite(dry, gains.drive[band]);
        sum += lerp(dry, wet, gains.wet[band]);
    }

    sum * gains.master
}
