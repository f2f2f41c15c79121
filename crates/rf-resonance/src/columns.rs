//! Column identification for tabular sweep exports
//!
//! Works on header names only; reading the table itself is up to the caller.

use crate::config::AnalysisConfig;
use crate::{ResonanceError, Result};
use serde::{Deserialize, Serialize};

/// How a trace column's values are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagnitudeUnit {
    /// Already in dB
    Decibel,
    /// Linear amplitude, needs conversion
    Linear,
}

impl MagnitudeUnit {
    /// `Decibel` when the column name mentions dB
    pub fn from_column_name(name: &str) -> Self {
        if name.to_lowercase().contains("db") {
            MagnitudeUnit::Decibel
        } else {
            MagnitudeUnit::Linear
        }
    }
}

/// A magnitude column picked for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceColumn {
    pub index: usize,
    pub name: String,
    pub unit: MagnitudeUnit,
}

/// Frequency and trace columns found in a header row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Trimmed header names
    pub headers: Vec<String>,
    pub freq_index: usize,
    pub traces: Vec<TraceColumn>,
}

impl ColumnLayout {
    /// Identify columns by case-insensitive substring match.
    ///
    /// The frequency column is the first header containing the frequency
    /// hint, else column 0. Traces are the other headers containing the trace
    /// hint; without a match, up to two other columns are used.
    pub fn detect<S: AsRef<str>>(headers: &[S], config: &AnalysisConfig) -> Result<Self> {
        if headers.is_empty() {
            return Err(ResonanceError::InvalidInput("No columns in header".into()));
        }

        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();
        let freq_hint = config.freq_column_hint.to_lowercase();
        let trace_hint = config.trace_column_hint.to_lowercase();

        let freq_index = headers
            .iter()
            .position(|h| h.to_lowercase().contains(&freq_hint))
            .unwrap_or(0);

        let others: Vec<usize> = (0..headers.len()).filter(|&i| i != freq_index).collect();

        let mut trace_indices: Vec<usize> = others
            .iter()
            .copied()
            .filter(|&i| headers[i].to_lowercase().contains(&trace_hint))
            .collect();

        if trace_indices.is_empty() {
            trace_indices = if others.is_empty() {
                vec![0]
            } else {
                others.iter().copied().take(2).collect()
            };
            log::debug!(
                "Columns: no '{}' column, falling back to {:?}",
                config.trace_column_hint,
                trace_indices
            );
        }

        let traces = trace_indices
            .into_iter()
            .map(|index| TraceColumn {
                index,
                name: headers[index].clone(),
                unit: MagnitudeUnit::from_column_name(&headers[index]),
            })
            .collect();

        Ok(Self {
            headers,
            freq_index,
            traces,
        })
    }

    pub fn freq_name(&self) -> &str {
        &self.headers[self.freq_index]
    }
}
