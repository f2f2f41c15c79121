//! Resonance analysis: level at f0, crossings, bandwidth and Q

use crate::config::AnalysisConfig;
use crate::crossing::{find_crossing, Direction};
use crate::curve::ResponseCurve;
use crate::{ResonanceError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default passband edge: half power
pub const DEFAULT_OFFSET_DB: f64 = 3.0;

/// Where and how deep to look for the passband edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceQuery {
    /// Resonance frequency in Hz (need not match a sample)
    pub f0: f64,

    /// Drop below the level at `f0` that defines the edges (dB, positive)
    pub offset_db: f64,
}

impl ResonanceQuery {
    /// Query at `f0` with the -3 dB edge definition
    pub fn new(f0: f64) -> Self {
        Self {
            f0,
            offset_db: DEFAULT_OFFSET_DB,
        }
    }

    /// Query at `f0` using the offset from a config
    pub fn from_config(f0: f64, config: &AnalysisConfig) -> Self {
        Self {
            f0,
            offset_db: config.offset_db,
        }
    }

    /// Builder pattern: set threshold offset
    pub fn with_offset_db(mut self, offset_db: f64) -> Self {
        self.offset_db = offset_db;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.f0.is_finite() || self.f0 <= 0.0 {
            return Err(ResonanceError::InvalidInput(format!(
                "Resonance frequency must be positive and finite, got {}",
                self.f0
            )));
        }
        if !self.offset_db.is_finite() || self.offset_db <= 0.0 {
            return Err(ResonanceError::InvalidInput(format!(
                "Threshold offset must be positive and finite, got {} dB",
                self.offset_db
            )));
        }
        Ok(())
    }
}

/// Outcome of one resonance analysis.
///
/// `bandwidth` and `q` are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Resonance frequency the analysis was run at (Hz)
    pub f0: f64,

    /// Threshold offset used (dB)
    pub offset_db: f64,

    /// Interpolated magnitude at f0 (dB)
    pub reference_db: f64,

    /// reference_db - offset_db
    pub threshold_db: f64,

    /// Lower edge (Hz)
    pub left: Option<f64>,

    /// Upper edge (Hz)
    pub right: Option<f64>,

    /// right - left (Hz)
    pub bandwidth: Option<f64>,

    /// f0 / bandwidth
    pub q: Option<f64>,
}

/// Positions a renderer would mark on the response plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    pub f0: f64,
    pub threshold_db: f64,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl AnalysisResult {
    /// Whether both edges were found in order
    pub fn is_determined(&self) -> bool {
        self.bandwidth.is_some()
    }

    pub fn markers(&self) -> Markers {
        Markers {
            f0: self.f0,
            threshold_db: self.threshold_db,
            left: self.left,
            right: self.right,
        }
    }

    /// One-line human readable outcome
    pub fn summary(&self) -> String {
        match (self.bandwidth, self.q) {
            (Some(bw), Some(q)) => format!(
                "f0 = {:.1} Hz, BW(-{} dB) = {:.1} Hz, Q = {:.2}",
                self.f0, self.offset_db, bw, q
            ),
            _ => format!(
                "f0 = {:.1} Hz, could not find both -{} dB crossings for BW/Q",
                self.f0, self.offset_db
            ),
        }
    }
}

/// Bandwidth and Q from the two edges.
///
/// Requires both edges and `right > left`; a reversed or collapsed bracket
/// yields `None`.
pub fn bandwidth_and_q(f0: f64, left: Option<f64>, right: Option<f64>) -> Option<(f64, f64)> {
    let (left, right) = (left?, right?);
    if right <= left {
        return None;
    }

    let bandwidth = right - left;
    Some((bandwidth, f0 / bandwidth))
}

/// Runs queries against one immutable response curve
#[derive(Debug, Clone, Copy)]
pub struct ResonanceAnalyzer<'a> {
    curve: &'a ResponseCurve,
}

impl<'a> ResonanceAnalyzer<'a> {
    pub fn new(curve: &'a ResponseCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &ResponseCurve {
        self.curve
    }

    /// Analyze a single query
    pub fn analyze(&self, query: &ResonanceQuery) -> Result<AnalysisResult> {
        query.validate()?;

        let f0 = query.f0;
        let reference_db = self.curve.magnitude_at(f0);
        let threshold_db = reference_db - query.offset_db;

        let left = find_crossing(self.curve, threshold_db, f0, Direction::Decreasing);
        let right = find_crossing(self.curve, threshold_db, f0, Direction::Increasing);

        let (bandwidth, q) = match bandwidth_and_q(f0, left, right) {
            Some((bw, q)) => (Some(bw), Some(q)),
            None => (None, None),
        };

        log::debug!(
            "Resonance: f0={:.2}Hz nearest_idx={} ref={:.2}dB threshold={:.2}dB \
             left={:?} right={:?}",
            f0,
            self.curve.nearest_index(f0),
            reference_db,
            threshold_db,
            left,
            right
        );

        if bandwidth.is_none() {
            log::warn!(
                "Resonance: BW/Q undetermined at f0={:.2}Hz (left={:?}, right={:?})",
                f0,
                left,
                right
            );
        }

        Ok(AnalysisResult {
            f0,
            offset_db: query.offset_db,
            reference_db,
            threshold_db,
            left,
            right,
            bandwidth,
            q,
        })
    }
}

/// Analyze many independent queries over one curve in parallel
pub fn analyze_many(
    curve: &ResponseCurve,
    queries: &[ResonanceQuery],
) -> Result<Vec<AnalysisResult>> {
    let analyzer = ResonanceAnalyzer::new(curve);
    queries
        .par_iter()
        .map(|query| analyzer.analyze(query))
        .collect()
}
