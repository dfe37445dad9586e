//! Band enable/solo resolution.

use crate::dsp::crossover::NUM_BANDS;

/// Resolve the effective per-band enable mask from the on and solo flags.
///
/// Solo has priority: if any band is soloed, exactly the soloed bands play
/// and every other band is forced off, regardless of its own on flag. With
/// no solo active, each band follows its own on flag. Pure function; callers
/// re-evaluate it from the current flags every frame.
pub fn resolve_band_states(on: [bool; NUM_BANDS], solo: [bool; NUM_BANDS]) -> [bool; NUM_BANDS] {
    if solo.iter().any(|&s| s) {
        solo
    } else {
        on
    }
}
