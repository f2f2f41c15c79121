//! rf-resonance: bandwidth and Q of a swept magnitude response
//!
//! Usage:
//!   rf-resonance --f0 1160 --freq 1000,1100,1200 --mag=-6,0,-5
//!   rf-resonance --f0 1160 --linear --freq ... --mag ... --format json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rf_resonance::{AnalysisConfig, AnalysisReport, MagnitudeUnit, ReportFormat, TraceData};

#[derive(Parser)]
#[command(name = "rf-resonance", about = "Resonance bandwidth and Q from a swept response")]
struct Cli {
    /// Resonance frequency to analyze around (Hz)
    #[arg(long)]
    f0: f64,

    /// Drop below the level at f0 that defines the edges (dB)
    #[arg(long)]
    offset_db: Option<f64>,

    /// Comma-separated sweep frequencies (Hz)
    #[arg(long, value_delimiter = ',', required = true)]
    freq: Vec<f64>,

    /// Comma-separated magnitudes, dB unless --linear
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    mag: Vec<f64>,

    /// Magnitudes are linear amplitudes (converted with 20*log10)
    #[arg(long)]
    linear: bool,

    /// JSON analysis config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label used in the report
    #[arg(long, default_value = "trace")]
    label: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Markdown => ReportFormat::Markdown,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(offset_db) = cli.offset_db {
        config = config.with_offset_db(offset_db);
    }
    config.validate().context("Invalid analysis config")?;

    let unit = if cli.linear {
        MagnitudeUnit::Linear
    } else {
        MagnitudeUnit::Decibel
    };

    let trace = TraceData::from_columns(cli.label.as_str(), &cli.freq, &cli.mag, unit, &config)
        .context("Failed to prepare sweep data")?;
    log::info!(
        "Analyzing '{}': {} samples ({} dropped), f0={} Hz",
        trace.name,
        trace.frequencies.len(),
        trace.dropped,
        cli.f0
    );

    let result = trace
        .analyze(cli.f0, &config)
        .context("Resonance analysis failed")?;

    let mut report = AnalysisReport::new(format!("Resonance analysis around {} Hz", cli.f0));
    report.add_result(cli.label, result);

    print!("{}", report.generate(cli.format.into()));
    Ok(())
}
