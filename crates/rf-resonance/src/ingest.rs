//! Preparing parsed measurement columns for analysis

use crate::analysis::{AnalysisResult, ResonanceAnalyzer, ResonanceQuery};
use crate::columns::MagnitudeUnit;
use crate::config::AnalysisConfig;
use crate::curve::ResponseCurve;
use crate::units::linear_to_db;
use crate::{ResonanceError, Result};
use serde::{Deserialize, Serialize};

/// One trace ready for normalization: frequency and dB arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    pub name: String,
    pub frequencies: Vec<f64>,
    pub magnitudes_db: Vec<f64>,

    /// Rows discarded as unusable
    pub dropped: usize,
}

impl TraceData {
    /// Build from raw column values.
    ///
    /// Rows with a non-finite value, or a non-finite / non-positive frequency
    /// (when enabled in `config`), are dropped. Linear values are converted to
    /// dB with the configured floor and reference.
    pub fn from_columns(
        name: impl Into<String>,
        frequencies: &[f64],
        values: &[f64],
        unit: MagnitudeUnit,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let name = name.into();
        if frequencies.len() != values.len() {
            return Err(ResonanceError::InvalidInput(format!(
                "Trace '{}': {} frequencies vs {} values",
                name,
                frequencies.len(),
                values.len()
            )));
        }
        config.validate()?;

        let mut out_freq = Vec::with_capacity(frequencies.len());
        let mut out_mag = Vec::with_capacity(values.len());

        for (&f, &v) in frequencies.iter().zip(values.iter()) {
            if !f.is_finite() || !v.is_finite() {
                continue;
            }
            if config.drop_non_positive_freq && f <= 0.0 {
                continue;
            }

            let db = match unit {
                MagnitudeUnit::Decibel => v,
                MagnitudeUnit::Linear => linear_to_db(v, config.db_reference, config.db_floor),
            };
            out_freq.push(f);
            out_mag.push(db);
        }

        let dropped = frequencies.len() - out_freq.len();
        if dropped > 0 {
            log::debug!("Trace '{}': dropped {} unusable row(s)", name, dropped);
        }

        Ok(Self {
            name,
            frequencies: out_freq,
            magnitudes_db: out_mag,
            dropped,
        })
    }

    pub fn to_curve(&self) -> Result<ResponseCurve> {
        ResponseCurve::from_arrays(&self.frequencies, &self.magnitudes_db)
    }

    /// Analyze this trace at `f0` with the config's offset
    pub fn analyze(&self, f0: f64, config: &AnalysisConfig) -> Result<AnalysisResult> {
        let curve = self.to_curve()?;
        ResonanceAnalyzer::new(&curve).analyze(&ResonanceQuery::from_config(f0, config))
    }
}
