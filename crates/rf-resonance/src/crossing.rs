//! Threshold crossing search around a resonance

use crate::curve::{ResponseCurve, Sample};
use serde::{Deserialize, Serialize};

/// Direction of the outward walk from the sample nearest `f0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward lower frequencies (lower edge of the passband)
    Decreasing,
    /// Toward higher frequencies (upper edge of the passband)
    Increasing,
}

impl Direction {
    /// Next index in this direction, or `None` at the array boundary
    #[inline]
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Decreasing => index.checked_sub(1),
            Direction::Increasing => {
                let next = index + 1;
                (next < len).then_some(next)
            }
        }
    }
}

/// Find where the curve first drops below `threshold_db` walking away from `f0`.
///
/// Starting at the sample nearest `f0`, a sub-threshold start first walks
/// outward until the curve is back at or above the threshold. The walk then
/// continues while samples stay at or above the threshold, and the first
/// sub-threshold sample is linearly interpolated against its neighbour.
///
/// Returns `None` when the boundary is reached in either phase. Only the first
/// transition is reported; further resonances beyond it are not searched.
pub fn find_crossing(
    curve: &ResponseCurve,
    threshold_db: f64,
    f0: f64,
    direction: Direction,
) -> Option<f64> {
    let samples = curve.samples();
    let len = samples.len();
    let mut i = curve.nearest_index(f0);

    if samples[i].magnitude_db < threshold_db {
        loop {
            i = direction.step(i, len)?;
            if samples[i].magnitude_db >= threshold_db {
                break;
            }
        }
    }

    loop {
        let next = direction.step(i, len)?;
        if samples[next].magnitude_db < threshold_db {
            return Some(interpolate_crossing(samples[i], samples[next], threshold_db));
        }
        i = next;
    }
}

/// Frequency where the segment `a`-`b` reaches `threshold_db`.
///
/// A flat segment has no unique crossing; its midpoint is returned.
pub fn interpolate_crossing(a: Sample, b: Sample, threshold_db: f64) -> f64 {
    let dm = b.magnitude_db - a.magnitude_db;
    if dm == 0.0 {
        return 0.5 * (a.frequency + b.frequency);
    }

    a.frequency + (threshold_db - a.magnitude_db) * (b.frequency - a.frequency) / dm
}
