//! Thread-safe metering shared between the audio thread and a UI/host layer.
//!
//! Peak levels are stored as f32 bits in atomics so the audio thread never
//! takes a lock. The core signal path does not read these; they are
//! outbound-only.

use std::sync::atomic::{AtomicU32, Ordering};

pub const METER_FLOOR_DB: f32 = -80.0;

#[derive(Default)]
pub struct Meters {
    input_peak_l: AtomicU32,
    input_peak_r: AtomicU32,
    output_peak_l: AtomicU32,
    output_peak_r: AtomicU32,
}

fn store(slot: &AtomicU32, value: f32) {
    slot.store(value.to_bits(), Ordering::Relaxed);
}

fn load(slot: &AtomicU32) -> f32 {
    f32::from_bits(slot.load(Ordering::Relaxed))
}

/// Convert a linear peak to dBFS, clamped to the meter floor.
pub fn peak_to_db(peak: f32) -> f32 {
    if peak <= 0.0 {
        METER_FLOOR_DB
    } else {
        (20.0 * peak.log10()).max(METER_FLOOR_DB)
    }
}

impl Meters {
    pub fn new() -> Self {
        let meters = Self::default();
        meters.reset();
        meters
    }

    pub fn set_input_peaks(&self, left_db: f32, right_db: f32) {
        store(&self.input_peak_l, left_db);
        store(&self.input_peak_r, right_db);
    }

    pub fn set_output_peaks(&self, left_db: f32, right_db: f32) {
        store(&self.output_peak_l, left_db);
        store(&self.output_peak_r, right_db);
    }

    pub fn input_peak_l(&self) -> f32 {
        load(&self.input_peak_l)
    }

    pub fn input_peak_r(&self) -> f32 {
        load(&self.input_peak_r)
    }

    pub fn output_peak_l(&self) -> f32 {
        load(&self.output_peak_l)
    }

    pub fn output_peak_r(&self) -> f32 {
        load(&self.output_peak_r)
    }

    pub fn reset(&self) {
        self.set_input_peaks(METER_FLOOR_DB, METER_FLOOR_DB);
        self.set_output_peaks(METER_FLOOR_DB, METER_FLOOR_DB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_round_trip() {
        let meters = Meters::new();
        meters.set_input_peaks(-6.0, -12.0);
        meters.set_output_peaks(-3.0, -9.0);
        assert_eq!(meters.input_peak_l(), -6.0);
        assert_eq!(meters.input_peak_r(), -12.0);
        assert_eq!(meters.output_peak_l(), -3.0);
        assert_eq!(meters.output_peak_r(), -9.0);

        meters.reset();
        assert_eq!(meters.input_peak_l(), METER_FLOOR_DB);
        assert_eq!(meters.output_peak_r(), METER_FLOOR_DB);
    }

    #[test]
    fn peak_conversion_clamps_to_floor() {
        assert_eq!(peak_to_db(0.0), METER_FLOOR_DB);
        assert_eq!(peak_to_db(-1.0), METER_FLOOR_DB);
        assert!((peak_to_db(1.0) - 0.0).abs() < 1e-6);
        assert!((peak_to_db(0.5) + 6.0206).abs() < 1e-3);
    }
}
