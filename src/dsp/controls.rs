//! User-facing controls and their cooked linear-domain counterparts.
//!
//! The raw snapshot (`ExciterControls`) carries user units: decibels for the
//! saturation drives and master volume, percent for the wet mixes, plain
//! flags for on/solo. Cooking converts it to the multipliers the signal path
//! consumes. Cooking is pure, so recomputing it per sample or per buffer
//! yields the same coefficients.

use crate::dsp::crossover::NUM_BANDS;
use crate::dsp::utils::{db_to_gain, percent_to_fraction};

/// Stable parameter identifiers.
///
/// Persisted preset data is keyed by these numbers; the id assignment must
/// never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ControlId {
    LowOn = 0,
    LowMidOn = 1,
    HighMidOn = 2,
    TrebleOn = 3,
    LowSolo = 4,
    LowMidSolo = 5,
    HighMidSolo = 6,
    TrebleSolo = 7,
    LowSat = 8,
    LowMidSat = 9,
    HighMidSat = 10,
    TrebleSat = 11,
    LowMix = 12,
    LowMidMix = 13,
    HighMidMix = 14,
    TrebleMix = 15,
    MasterVolume = 16,
}

impl ControlId {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::LowOn),
            1 => Some(Self::LowMidOn),
            2 => Some(Self::HighMidOn),
            3 => Some(Self::TrebleOn),
            4 => Some(Self::LowSolo),
            5 => Some(Self::LowMidSolo),
            6 => Some(Self::HighMidSolo),
            7 => Some(Self::TrebleSolo),
            8 => Some(Self::LowSat),
            9 => Some(Self::LowMidSat),
            10 => Some(Self::HighMidSat),
            11 => Some(Self::TrebleSat),
            12 => Some(Self::LowMix),
            13 => Some(Self::LowMidMix),
            14 => Some(Self::HighMidMix),
            15 => Some(Self::TrebleMix),
            16 => Some(Self::MasterVolume),
            _ => None,
        }
    }
}

/// Raw control snapshot delivered by the parameter layer once per frame.
///
/// Band order everywhere: low, low-mid, high-mid, treble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExciterControls {
    pub band_on: [bool; NUM_BANDS],
    pub band_solo: [bool; NUM_BANDS],
    /// Saturation drive per band, 0..=24 dB.
    pub sat_db: [f64; NUM_BANDS],
    /// Wet mix per band, 0..=100 percent.
    pub mix_pct: [f64; NUM_BANDS],
    /// Master output volume, -60..=12 dB.
    pub master_volume_db: f64,
}

impl Default for ExciterControls {
    fn default() -> Self {
        Self {
            band_on: [true; NUM_BANDS],
            band_solo: [false; NUM_BANDS],
            sat_db: [0.0; NUM_BANDS],
            mix_pct: [50.0; NUM_BANDS],
            master_volume_db: 0.0,
        }
    }
}

impl ExciterControls {
    /// Keyed write path for hosts and preset data. Flag controls treat the
    /// value as a switch with 0.5 as the on threshold.
    pub fn set(&mut self, id: ControlId, value: f64) {
        let on = value >= 0.5;
        match id {
            ControlId::LowOn => self.band_on[0] = on,
            ControlId::LowMidOn => self.band_on[1] = on,
            ControlId::HighMidOn => self.band_on[2] = on,
            ControlId::TrebleOn => self.band_on[3] = on,
            ControlId::LowSolo => self.band_solo[0] = on,
            ControlId::LowMidSolo => self.band_solo[1] = on,
            ControlId::HighMidSolo => self.band_solo[2] = on,
            ControlId::TrebleSolo => self.band_solo[3] = on,
            ControlId::LowSat => self.sat_db[0] = value,
            ControlId::LowMidSat => self.sat_db[1] = value,
            ControlId::HighMidSat => self.sat_db[2] = value,
            ControlId::TrebleSat => self.sat_db[3] = value,
            ControlId::LowMix => self.mix_pct[0] = value,
            ControlId::LowMidMix => self.mix_pct[1] = value,
            ControlId::HighMidMix => self.mix_pct[2] = value,
            ControlId::TrebleMix => self.mix_pct[3] = value,
            ControlId::MasterVolume => self.master_volume_db = value,
        }
    }

    /// Keyed read path; flags come back as 0.0 / 1.0.
    pub fn get(&self, id: ControlId) -> f64 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match id {
            ControlId::LowOn => flag(self.band_on[0]),
            ControlId::LowMidOn => flag(self.band_on[1]),
            ControlId::HighMidOn => flag(self.band_on[2]),
            ControlId::TrebleOn => flag(self.band_on[3]),
            ControlId::LowSolo => flag(self.band_solo[0]),
            ControlId::LowMidSolo => flag(self.band_solo[1]),
            ControlId::HighMidSolo => flag(self.band_solo[2]),
            ControlId::TrebleSolo => flag(self.band_solo[3]),
            ControlId::LowSat => self.sat_db[0],
            ControlId::LowMidSat => self.sat_db[1],
            ControlId::HighMidSat => self.sat_db[2],
            ControlId::TrebleSat => self.sat_db[3],
            ControlId::LowMix => self.mix_pct[0],
            ControlId::LowMidMix => self.mix_pct[1],
            ControlId::HighMidMix => self.mix_pct[2],
            ControlId::TrebleMix => self.mix_pct[3],
            ControlId::MasterVolume => self.master_volume_db,
        }
    }
}

/// Linear-domain coefficients cooked from a control snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookedGains {
    /// Linear saturation drive per band, `10^(dB/20)`, always >= 1.
    pub drive: [f64; NUM_BANDS],
    /// Wet fraction per band, 0..=1.
    pub wet: [f64; NUM_BANDS],
    /// Linear master gain.
    pub master: f64,
}

impl CookedGains {
    pub fn cook(controls: &ExciterControls) -> Self {
        let mut drive = [1.0; NUM_BANDS];
        let mut wet = [0.0; NUM_BANDS];
        for band in 0..NUM_BANDS {
            drive[band] = db_to_gain(controls.sat_db[band]);
            wet[band] = percent_to_fraction(controls.mix_pct[band]);
        }
        Self {
            drive,
            wet,
            master: db_to_gain(controls.master_volume_db),
        }
    }
}

impl Default for CookedGains {
    fn default() -> Self {
        Self::cook(&ExciterControls::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_parameter_table() {
        let controls = ExciterControls::default();
        assert_eq!(controls.band_on, [true; 4]);
        assert_eq!(controls.band_solo, [false; 4]);
        assert_eq!(controls.sat_db, [0.0; 4]);
        assert_eq!(controls.mix_pct, [50.0; 4]);
        assert_eq!(controls.master_volume_db, 0.0);
    }

    #[test]
    fn cooking_reference_values() {
        let mut controls = ExciterControls::default();
        controls.sat_db = [20.0, 0.0, 6.0, 24.0];
        controls.mix_pct = [50.0, 0.0, 100.0, 25.0];
        controls.master_volume_db = -60.0;

        let cooked = CookedGains::cook(&controls);
        assert!((cooked.drive[0] - 10.0).abs() < 1e-9);
        assert!((cooked.drive[1] - 1.0).abs() < 1e-12);
        assert!((cooked.drive[3] - 15.848931924611133).abs() < 1e-9);
        assert_eq!(cooked.wet[0], 0.5);
        assert_eq!(cooked.wet[1], 0.0);
        assert_eq!(cooked.wet[2], 1.0);
        assert_eq!(cooked.wet[3], 0.25);
        assert!((cooked.master - 0.001).abs() < 1e-12);
    }

    #[test]
    fn cooking_is_pure() {
        let controls = ExciterControls::default();
        assert_eq!(CookedGains::cook(&controls), CookedGains::cook(&controls));
    }

    #[test]
    fn keyed_set_and_get_round_trip() {
        let mut controls = ExciterControls::default();
        controls.set(ControlId::TrebleSat, 12.5);
        controls.set(ControlId::LowMidMix, 75.0);
        controls.set(ControlId::HighMidOn, 0.0);
        controls.set(ControlId::LowSolo, 1.0);
        controls.set(ControlId::MasterVolume, -6.0);

        assert_eq!(controls.get(ControlId::TrebleSat), 12.5);
        assert_eq!(controls.get(ControlId::LowMidMix), 75.0);
        assert_eq!(controls.get(ControlId::HighMidOn), 0.0);
        assert_eq!(controls.get(ControlId::LowSolo), 1.0);
        assert_eq!(controls.get(ControlId::MasterVolume), -6.0);
        // Untouched controls keep their defaults.
        assert_eq!(controls.get(ControlId::LowSat), 0.0);
        assert_eq!(controls.get(ControlId::TrebleOn), 1.0);
    }

    #[test]
    fn id_mapping_is_stable() {
        assert_eq!(ControlId::from_id(0), Some(ControlId::LowOn));
        assert_eq!(ControlId::from_id(8), Some(ControlId::LowSat));
        assert_eq!(ControlId::from_id(16), Some(ControlId::MasterVolume));
        assert_eq!(ControlId::from_id(17), None);
        for id in 0..17 {
            let control = ControlId::from_id(id).expect("ids 0..=16 are assigned");
            assert_eq!(control as u32, id);
        }
    }
}
