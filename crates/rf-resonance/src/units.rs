//! Linear amplitude / decibel conversion

/// Convert a linear amplitude to dB relative to `reference`.
///
/// Values below `floor` (including zero and negatives) are clamped to it first.
pub fn linear_to_db(value: f64, reference: f64, floor: f64) -> f64 {
    20.0 * (value.max(floor) / reference).log10()
}

/// Convert a slice of linear amplitudes to dB
pub fn linear_slice_to_db(values: &[f64], reference: f64, floor: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| linear_to_db(v, reference, floor))
        .collect()
}

/// Convert dB relative to `reference` back to a linear amplitude
pub fn db_to_linear(db: f64, reference: f64) -> f64 {
    reference * 10.0_f64.powf(db / 20.0)
}
