pub fn db_to_gain(db: f64) -> f64 {
    (10.0f64).powf(db / 20.0)
}

pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}

/// Linear interpolation between `a` (t = 0) and `b` (t = 1).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn rms(samples: &[f64]) -> f64 {
    let mut acc = 0.0f64;
    for &v in samples {
        acc += v * v;
    }
    (acc / (samples.len().max(1) as f64)).sqrt()
}
