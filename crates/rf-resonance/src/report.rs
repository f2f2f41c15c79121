//! Report generation for resonance analysis results

use crate::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text report
    Text,
    /// JSON report
    Json,
    /// Markdown report
    Markdown,
}

/// One labelled analysis (e.g. one trace of a measurement)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub result: AnalysisResult,
}

/// Collects analysis results for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Report title
    pub title: String,

    pub entries: Vec<ReportEntry>,

    /// Entries with both crossings found
    pub determined: usize,

    /// Entries where BW/Q could not be determined
    pub undetermined: usize,
}

impl AnalysisReport {
    /// Create a new report
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            determined: 0,
            undetermined: 0,
        }
    }

    /// Add a labelled result to the report
    pub fn add_result(&mut self, label: impl Into<String>, result: AnalysisResult) {
        if result.is_determined() {
            self.determined += 1;
        } else {
            self.undetermined += 1;
        }
        self.entries.push(ReportEntry {
            label: label.into(),
            result,
        });
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Generate report in specified format
    pub fn generate(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Markdown => self.to_markdown(),
        }
    }

    /// Save report to file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> std::io::Result<()> {
        let content = self.generate(format);
        let mut file = std::fs::File::create(path)?;
        file.write_all(content.as_bytes())
    }

    fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.title));
        output.push_str(&format!("{}\n\n", "=".repeat(self.title.chars().count())));

        for entry in &self.entries {
            let r = &entry.result;
            output.push_str(&format!("[{}]\n", entry.label));
            output.push_str(&format!(
                "Used f0 = {:.2} Hz, mag(f0) = {:.2} dB\n",
                r.f0, r.reference_db
            ));

            match (r.bandwidth, r.q) {
                (Some(bw), Some(q)) => {
                    output.push_str(&format!("Bandwidth (-{} dB): {:.2} Hz\n", r.offset_db, bw));
                    output.push_str(&format!("Q factor: {:.3}\n", q));
                }
                _ => {
                    output.push_str(&format!(
                        "Could not find both -{} dB crossings to compute BW/Q around f0.\n",
                        r.offset_db
                    ));
                }
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "Summary: {} analyses, {} determined, {} undetermined\n",
            self.total(),
            self.determined,
            self.undetermined
        ));

        output
    }

    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }

    fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));
        output.push_str(
            "| Trace | f0 (Hz) | Ref (dB) | Threshold (dB) | Left (Hz) | Right (Hz) | BW (Hz) | Q |\n",
        );
        output.push_str(
            "|-------|---------|----------|----------------|-----------|------------|---------|---|\n",
        );

        for entry in &self.entries {
            let r = &entry.result;
            output.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} | {} | {} | {} | {} |\n",
                entry.label,
                r.f0,
                r.reference_db,
                r.threshold_db,
                fmt_opt(r.left, 2),
                fmt_opt(r.right, 2),
                fmt_opt(r.bandwidth, 2),
                fmt_opt(r.q, 3)
            ));
        }

        output
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".into(),
    }
}
