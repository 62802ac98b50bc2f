//! Reporters
//!
//! The driver hands every finished measurement to a [`Reporter`] together
//! with its label. [`ConsoleReporter`] streams the classic text lines;
//! [`ReportCollector`] keeps everything for a structured [`Report`].

use crate::report::{
    MeasurementEntry, Report, ReportMeta, ReportSummary, SectionKind, SectionResult,
    compare_variants,
};
use holdbench_core::Measurement;
use std::io::Write;
use thiserror::Error;

/// Width of the banner rules
const RULE_WIDTH: usize = 55;

/// Errors that can occur while reporting
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Measurement '{label}' recorded before any section was opened")]
    NoOpenSection { label: String },
}

/// Sink for benchmark results
pub trait Reporter {
    /// Open a new section; following records belong to it
    fn section(&mut self, kind: SectionKind, title: &str) -> Result<(), ReportError>;

    /// Record one finished measurement
    fn record(&mut self, label: &str, measurement: &Measurement) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn section(&mut self, kind: SectionKind, title: &str) -> Result<(), ReportError> {
        (**self).section(kind, title)
    }

    fn record(&mut self, label: &str, measurement: &Measurement) -> Result<(), ReportError> {
        (**self).record(label, measurement)
    }
}

/// Format a measurement line
///
/// ```
/// use std::time::Duration;
/// use holdbench_core::Measurement;
///
/// let m = Measurement {
///     elapsed: Duration::from_millis(250),
///     cycles: 0,
///     alloc_bytes: 0,
///     alloc_count: 0,
/// };
/// assert_eq!(
///     holdbench_report::format_measurement("regular constructor", &m),
///     "current computation elapsed time : 0.25 s for regular constructor"
/// );
/// ```
pub fn format_measurement(label: &str, measurement: &Measurement) -> String {
    format!(
        "current computation elapsed time : {} s for {}",
        measurement.seconds(),
        label
    )
}

/// Format a section banner, including its leading blank lines
pub fn format_banner(kind: SectionKind, title: &str) -> String {
    match kind {
        SectionKind::Variant => format!("\n\n{}\n{}\n", "-".repeat(RULE_WIDTH), title),
        SectionKind::Demonstration => format!("\n\n{}\n{}\n\n", "=".repeat(RULE_WIDTH), title),
    }
}

/// Streams banners and measurement lines to a writer as they arrive
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and return the writer
    pub fn finish(mut self) -> Result<W, ReportError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn section(&mut self, kind: SectionKind, title: &str) -> Result<(), ReportError> {
        self.writer.write_all(format_banner(kind, title).as_bytes())?;
        Ok(())
    }

    fn record(&mut self, label: &str, measurement: &Measurement) -> Result<(), ReportError> {
        writeln!(self.writer, "{}", format_measurement(label, measurement))?;
        // Lines show up while the next, possibly long, operation runs
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects sections and measurements into a [`Report`]
#[derive(Debug, Default)]
pub struct ReportCollector {
    sections: Vec<SectionResult>,
}

impl ReportCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections collected so far
    pub fn sections(&self) -> &[SectionResult] {
        &self.sections
    }

    /// Build the final report, pairing the two variant sections
    pub fn into_report(self, meta: ReportMeta, total_duration_ms: f64) -> Report {
        let summary = ReportSummary {
            sections: self.sections.len(),
            measurements: self.sections.iter().map(|s| s.entries.len()).sum(),
            total_duration_ms,
        };
        let comparisons = compare_variants(&self.sections);

        Report {
            meta,
            sections: self.sections,
            comparisons,
            summary,
        }
    }
}

impl Reporter for ReportCollector {
    fn section(&mut self, kind: SectionKind, title: &str) -> Result<(), ReportError> {
        self.sections.push(SectionResult {
            title: title.to_string(),
            kind,
            entries: Vec::new(),
        });
        Ok(())
    }

    fn record(&mut self, label: &str, measurement: &Measurement) -> Result<(), ReportError> {
        let section = self
            .sections
            .last_mut()
            .ok_or_else(|| ReportError::NoOpenSection {
                label: label.to_string(),
            })?;
        section.entries.push(MeasurementEntry::new(label, measurement));
        Ok(())
    }
}
