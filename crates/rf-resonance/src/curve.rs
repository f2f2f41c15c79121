//! Response curve normalization and level lookup

use crate::{ResonanceError, Result};
use serde::{Deserialize, Serialize};

/// One measured point of a swept response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Frequency in Hz
    pub frequency: f64,

    /// Magnitude in dB
    pub magnitude_db: f64,
}

impl Sample {
    pub fn new(frequency: f64, magnitude_db: f64) -> Self {
        Self {
            frequency,
            magnitude_db,
        }
    }
}

/// Frequency-sorted, read-only lookup table of samples.
///
/// Duplicate frequencies are kept as separate samples in their input order;
/// they are not merged or averaged.
#[derive(Debug, Clone)]
pub struct ResponseCurve {
    samples: Vec<Sample>,
}

impl ResponseCurve {
    /// Build a curve from parallel frequency / magnitude arrays.
    ///
    /// Pairs are stable-sorted by ascending frequency. Fails with
    /// [`ResonanceError::InvalidInput`] on empty or mismatched arrays, or on
    /// non-finite values.
    pub fn from_arrays(frequencies: &[f64], magnitudes_db: &[f64]) -> Result<Self> {
        if frequencies.len() != magnitudes_db.len() {
            return Err(ResonanceError::InvalidInput(format!(
                "Length mismatch: {} frequencies, {} magnitudes",
                frequencies.len(),
                magnitudes_db.len()
            )));
        }

        if frequencies.is_empty() {
            return Err(ResonanceError::InvalidInput("Empty response curve".into()));
        }

        let samples = frequencies
            .iter()
            .zip(magnitudes_db.iter())
            .map(|(&f, &m)| Sample::new(f, m))
            .collect();

        Self::from_samples(samples)
    }

    /// Build a curve from already-paired samples (any order)
    pub fn from_samples(mut samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(ResonanceError::InvalidInput("Empty response curve".into()));
        }

        if let Some((i, s)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| !s.frequency.is_finite() || !s.magnitude_db.is_finite())
        {
            return Err(ResonanceError::InvalidInput(format!(
                "Non-finite sample at index {}: ({}, {})",
                i, s.frequency, s.magnitude_db
            )));
        }

        // Vec::sort_by is stable, ties keep input order
        samples.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

        let curve = Self { samples };
        let duplicates = curve.duplicate_frequency_count();
        if duplicates > 0 {
            log::warn!(
                "ResponseCurve: {} duplicate frequency sample(s) kept unmerged",
                duplicates
            );
        }

        Ok(curve)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed curve
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.frequency).collect()
    }

    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.magnitude_db).collect()
    }

    /// Lowest and highest sampled frequency
    pub fn frequency_range(&self) -> (f64, f64) {
        let first = self.samples[0].frequency;
        let last = self.samples[self.samples.len() - 1].frequency;
        (first, last)
    }

    /// Number of samples whose frequency equals their predecessor's
    pub fn duplicate_frequency_count(&self) -> usize {
        self.samples
            .windows(2)
            .filter(|w| w[0].frequency == w[1].frequency)
            .count()
    }

    /// Index of the sample closest to `freq` (first index on ties)
    pub fn nearest_index(&self, freq: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;

        for (i, s) in self.samples.iter().enumerate() {
            let dist = (s.frequency - freq).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }

        best
    }

    /// Magnitude at `freq` by piecewise-linear interpolation.
    ///
    /// Queries outside the sampled range return the boundary magnitude.
    pub fn magnitude_at(&self, freq: f64) -> f64 {
        let first = &self.samples[0];
        let last = &self.samples[self.samples.len() - 1];

        if freq < first.frequency {
            return first.magnitude_db;
        }
        if freq >= last.frequency {
            return last.magnitude_db;
        }

        // first <= freq < last, so 1 <= hi <= len - 1; an exact hit on a
        // duplicated frequency resolves to the last duplicate
        let hi = self.samples.partition_point(|s| s.frequency <= freq);
        let a = &self.samples[hi - 1];
        let b = &self.samples[hi];

        if a.frequency == freq {
            return a.magnitude_db;
        }

        let t = (freq - a.frequency) / (b.frequency - a.frequency);
        a.magnitude_db + t * (b.magnitude_db - a.magnitude_db)
    }
}
