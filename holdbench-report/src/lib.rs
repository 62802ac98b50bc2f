#![warn(missing_docs)]
//! HoldBench Report - Reporting
//!
//! Turns driver measurements into output:
//! - Console lines (the human-readable report)
//! - A structured [`Report`] with variant comparisons
//! - JSON (machine-readable)

mod json;
#[allow(missing_docs)]
mod report;
mod reporter;

pub use json::generate_json_report;
pub use report::{
    ComparisonEntry, MeasurementEntry, Report, ReportConfig, ReportMeta, ReportSummary,
    SectionKind, SectionResult, SystemInfo, compare_variants,
};
pub use reporter::{
    ConsoleReporter, ReportCollector, ReportError, Reporter, format_banner, format_measurement,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
