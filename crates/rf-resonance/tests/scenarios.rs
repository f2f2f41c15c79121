//! End-to-End Resonance Analysis Tests
//!
//! Tests the complete analysis pipeline:
//! - Normalization of raw sweeps
//! - Level resolution at f0
//! - Crossing search and bandwidth / Q aggregation

use approx::{assert_abs_diff_eq, assert_relative_eq};

use rf_resonance::crossing::interpolate_crossing;
use rf_resonance::{
    analyze, analyze_many, find_crossing, Direction, ResonanceAnalyzer, ResonanceQuery,
    ResponseCurve, Sample,
};

const F0: f64 = 1000.0;
const STEPS_PER_OCTAVE: i32 = 25;
const OCTAVES: i32 = 3;

/// Peak of 0 dB at 1 kHz, falling 6 dB per octave on both sides
fn octave_peak() -> (Vec<f64>, Vec<f64>) {
    let n = STEPS_PER_OCTAVE * OCTAVES;
    (-n..=n)
        .map(|k| {
            let octaves = k as f64 / STEPS_PER_OCTAVE as f64;
            (F0 * 2.0_f64.powf(octaves), -6.0 * octaves.abs())
        })
        .unzip()
}

/// Deterministic permutation of 0..n
fn scrambled(n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (i * 7919 + 13) % n);
    order
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_textbook_peak_q() {
    let (freq, mag) = octave_peak();
    let result = analyze(&freq, &mag, &ResonanceQuery::new(F0)).unwrap();

    // -3 dB is half an octave either side: Q = 1 / (sqrt(2) - 1/sqrt(2)) = sqrt(2)
    let expected_q = std::f64::consts::SQRT_2;

    assert_abs_diff_eq!(result.reference_db, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.threshold_db, -3.0, epsilon = 1e-12);
    assert_relative_eq!(result.left.unwrap(), F0 / std::f64::consts::SQRT_2, max_relative = 0.01);
    assert_relative_eq!(result.right.unwrap(), F0 * std::f64::consts::SQRT_2, max_relative = 0.01);
    assert_relative_eq!(result.q.unwrap(), expected_q, max_relative = 0.01);
}

#[test]
fn test_flat_response_has_no_bandwidth() {
    let freq: Vec<f64> = (1..=50).map(|i| i as f64 * 100.0).collect();
    let mag = vec![0.0; freq.len()];

    let result = analyze(&freq, &mag, &ResonanceQuery::new(F0)).unwrap();

    assert_eq!(result.threshold_db, -3.0);
    assert_eq!(result.left, None);
    assert_eq!(result.right, None);
    assert_eq!(result.bandwidth, None);
    assert_eq!(result.q, None);
}

#[test]
fn test_f0_on_first_sample() {
    let freq = [100.0, 200.0, 300.0, 400.0, 500.0];
    let mag = [0.0, -1.0, -2.0, -4.0, -8.0];

    let result = analyze(&freq, &mag, &ResonanceQuery::new(100.0)).unwrap();

    assert_eq!(result.reference_db, 0.0);
    assert_eq!(result.left, None);
    assert_abs_diff_eq!(result.right.unwrap(), 350.0, epsilon = 1e-9);
    assert_eq!(result.bandwidth, None);
}

#[test]
fn test_f0_on_last_sample() {
    let freq = [100.0, 200.0, 300.0, 400.0, 500.0];
    let mag = [-8.0, -4.0, -2.0, -1.0, 0.0];

    let result = analyze(&freq, &mag, &ResonanceQuery::new(500.0)).unwrap();

    assert_eq!(result.reference_db, 0.0);
    assert_eq!(result.right, None);
    assert_abs_diff_eq!(result.left.unwrap(), 250.0, epsilon = 1e-9);
    assert_eq!(result.q, None);
}

#[test]
fn test_f0_outside_range_clamps() {
    let freq = [100.0, 200.0, 300.0];
    let mag = [-8.0, -4.0, -1.0];

    let result = analyze(&freq, &mag, &ResonanceQuery::new(10_000.0)).unwrap();

    assert_eq!(result.reference_db, -1.0);
    assert_eq!(result.threshold_db, -4.0);
    assert_eq!(result.right, None);
}

#[test]
fn test_flat_bracket_midpoint() {
    let a = Sample::new(1200.0, -3.0);
    let b = Sample::new(1300.0, -3.0);

    assert_eq!(interpolate_crossing(a, b, -3.0), 1250.0);
    assert_eq!(interpolate_crossing(b, a, -3.0), 1250.0);
}

#[test]
fn test_duplicate_frequencies_preserved() {
    let freq = [300.0, 200.0, 200.0, 100.0];
    let mag = [-6.0, -1.0, -2.0, 0.0];

    let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();

    assert_eq!(curve.len(), 4);
    assert_eq!(curve.frequencies(), vec![100.0, 200.0, 200.0, 300.0]);
    assert_eq!(curve.magnitudes_db(), vec![0.0, -1.0, -2.0, -6.0]);
    assert_eq!(curve.duplicate_frequency_count(), 1);
}

#[test]
fn test_f0_on_duplicated_first_frequency() {
    let freq = [100.0, 100.0, 200.0, 300.0];
    let mag = [-10.0, 0.0, -1.0, -5.0];

    let result = analyze(&freq, &mag, &ResonanceQuery::new(100.0)).unwrap();

    // Reference resolves to the last of the duplicated samples
    assert_eq!(result.reference_db, 0.0);
    assert_eq!(result.threshold_db, -3.0);
    assert_eq!(result.left, None);
    assert_abs_diff_eq!(result.right.unwrap(), 250.0, epsilon = 1e-9);
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_normalized_curve_sorted_same_length() {
    for n in [1usize, 2, 7, 64, 101] {
        let order = scrambled(n);
        let freq: Vec<f64> = order.iter().map(|&i| 10.0 + (i % 17) as f64 * 3.5).collect();
        let mag: Vec<f64> = order.iter().map(|&i| -(i as f64)).collect();

        let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();

        assert_eq!(curve.len(), n);
        assert!(curve.samples().windows(2).all(|w| w[0].frequency <= w[1].frequency));
    }
}

#[test]
fn test_level_at_sample_frequency_is_exact() {
    let (freq, mag) = octave_peak();
    let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();

    for s in curve.samples() {
        assert_abs_diff_eq!(curve.magnitude_at(s.frequency), s.magnitude_db, epsilon = 1e-12);
    }
}

#[test]
fn test_crossings_bracket_f0_on_monotone_peak() {
    let (freq, mag) = octave_peak();
    let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();
    let analyzer = ResonanceAnalyzer::new(&curve);

    for f0 in [700.0, 950.0, 1000.0, 1010.0, 1500.0] {
        let result = analyzer.analyze(&ResonanceQuery::new(f0)).unwrap();
        let (left, right) = (result.left.unwrap(), result.right.unwrap());

        assert!(left < f0 && f0 < right, "f0={} left={} right={}", f0, left, right);
    }
}

#[test]
fn test_bandwidth_and_q_consistent() {
    let (freq, mag) = octave_peak();
    let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();

    let queries: Vec<ResonanceQuery> = [130.0, 500.0, 1000.0, 4000.0, 7990.0]
        .iter()
        .flat_map(|&f| [ResonanceQuery::new(f), ResonanceQuery::new(f).with_offset_db(12.0)])
        .collect();

    for result in analyze_many(&curve, &queries).unwrap() {
        assert_eq!(result.bandwidth.is_some(), result.q.is_some());

        if let (Some(bw), Some(q), Some(left), Some(right)) =
            (result.bandwidth, result.q, result.left, result.right)
        {
            assert_eq!(bw, right - left);
            assert_eq!(q, result.f0 / (right - left));
        }
    }
}

#[test]
fn test_only_first_transition_reported() {
    // Second resonance at 600 Hz beyond the first dip is ignored
    let freq = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0];
    let mag = [-20.0, -1.0, 0.0, -1.0, -20.0, 0.0, -20.0];
    let curve = ResponseCurve::from_arrays(&freq, &mag).unwrap();

    let right = find_crossing(&curve, -3.0, 300.0, Direction::Increasing).unwrap();

    assert!(right > 400.0 && right < 500.0);
}

#[test]
fn test_invalid_input_rejected() {
    assert!(analyze(&[1.0, 2.0], &[0.0], &ResonanceQuery::new(1.0)).is_err());
    assert!(analyze(&[], &[], &ResonanceQuery::new(1.0)).is_err());
}
