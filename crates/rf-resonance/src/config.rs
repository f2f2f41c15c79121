//! Configuration for resonance analysis and measurement ingestion

use crate::{ResonanceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for resonance analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Drop below the level at f0 that defines the passband edges (dB)
    pub offset_db: f64,

    /// Smallest linear amplitude converted to dB (avoids log of zero)
    pub db_floor: f64,

    /// Linear reference for 0 dB (1.0 = dBV for volt readings)
    pub db_reference: f64,

    /// Discard samples with non-positive frequency at ingestion
    pub drop_non_positive_freq: bool,

    /// Substring identifying the frequency column (case-insensitive)
    pub freq_column_hint: String,

    /// Substring identifying magnitude trace columns (case-insensitive)
    pub trace_column_hint: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            offset_db: 3.0,
            db_floor: 1e-12,   // -240 dB
            db_reference: 1.0, // dBV
            drop_non_positive_freq: true,
            freq_column_hint: "freq".into(),
            trace_column_hint: "trace".into(),
        }
    }
}

impl AnalysisConfig {
    /// Half-power (-3 dB) passband edges
    pub fn half_power() -> Self {
        Self::default()
    }

    /// -6 dB passband edges
    pub fn six_db() -> Self {
        Self {
            offset_db: 6.0,
            ..Default::default()
        }
    }

    /// -10 dB passband edges
    pub fn ten_db() -> Self {
        Self {
            offset_db: 10.0,
            ..Default::default()
        }
    }

    /// Builder pattern: set threshold offset
    pub fn with_offset_db(mut self, offset_db: f64) -> Self {
        self.offset_db = offset_db;
        self
    }

    /// Builder pattern: set linear floor for dB conversion
    pub fn with_db_floor(mut self, floor: f64) -> Self {
        self.db_floor = floor;
        self
    }

    /// Builder pattern: set trace column hint
    pub fn with_trace_hint(mut self, hint: impl Into<String>) -> Self {
        self.trace_column_hint = hint.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.offset_db.is_finite() || self.offset_db <= 0.0 {
            return Err(ResonanceError::ConfigError(format!(
                "offset_db must be positive, got {}",
                self.offset_db
            )));
        }
        if !self.db_floor.is_finite() || self.db_floor <= 0.0 {
            return Err(ResonanceError::ConfigError(format!(
                "db_floor must be positive, got {}",
                self.db_floor
            )));
        }
        if !self.db_reference.is_finite() || self.db_reference <= 0.0 {
            return Err(ResonanceError::ConfigError(format!(
                "db_reference must be positive, got {}",
                self.db_reference
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ResonanceError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ResonanceError::Serialization(e.to_string()))
    }

    /// Load a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
