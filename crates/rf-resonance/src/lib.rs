//! # rf-resonance
//!
//! Resonance bandwidth and Q-factor extraction from swept magnitude responses.
//!
//! ## Features
//!
//! - **Normalization**: stable frequency sort of raw (frequency, dB) pairs
//! - **Level Resolution**: clamped linear interpolation of the level at `f0`
//! - **Crossing Search**: outward walk from `f0` to the first sub-threshold sample
//! - **Bandwidth / Q**: derived only when both crossings bracket `f0`
//! - **Ingestion Helpers**: column detection and linear → dB conversion
//! - **Report Generation**: text, JSON and Markdown summaries
//!
//! ## Example
//!
//! ```rust,ignore
//! use rf_resonance::{analyze, ResonanceQuery};
//!
//! let result = analyze(&freq, &mag_db, &ResonanceQuery::new(1160.0))?;
//!
//! match (result.bandwidth, result.q) {
//!     (Some(bw), Some(q)) => println!("BW = {bw:.1} Hz, Q = {q:.2}"),
//!     _ => println!("Could not find both -3 dB crossings around f0"),
//! }
//! ```

pub mod analysis;
pub mod columns;
pub mod config;
pub mod crossing;
pub mod curve;
pub mod ingest;
pub mod report;
pub mod units;

pub use analysis::{analyze_many, AnalysisResult, Markers, ResonanceAnalyzer, ResonanceQuery};
pub use columns::{ColumnLayout, MagnitudeUnit, TraceColumn};
pub use config::AnalysisConfig;
pub use crossing::{find_crossing, Direction};
pub use curve::{ResponseCurve, Sample};
pub use ingest::TraceData;
pub use report::{AnalysisReport, ReportFormat};

use thiserror::Error;

/// Errors that can occur during resonance analysis
#[derive(Error, Debug)]
pub enum ResonanceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ResonanceError>;

/// Normalize the raw arrays and analyze a single query
pub fn analyze(
    frequencies: &[f64],
    magnitudes_db: &[f64],
    query: &ResonanceQuery,
) -> Result<AnalysisResult> {
    let curve = ResponseCurve::from_arrays(frequencies, magnitudes_db)?;
    ResonanceAnalyzer::new(&curve).analyze(query)
}

/// Analyze around `f0` using the default -3 dB threshold
pub fn half_power_bandwidth(
    frequencies: &[f64],
    magnitudes_db: &[f64],
    f0: f64,
) -> Result<AnalysisResult> {
    analyze(frequencies, magnitudes_db, &ResonanceQuery::new(f0))
}
