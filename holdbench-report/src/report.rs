//! Report Data Structures

use chrono::{DateTime, Utc};
use holdbench_core::Measurement;
use serde::{Deserialize, Serialize};

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub sections: Vec<SectionResult>,
    pub comparisons: Vec<ComparisonEntry>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Element count used for regular construction, copies and the first factory call
    pub regular_size: usize,
    /// Element count used for the consuming assignment
    pub large_size: usize,
    /// Element count used for the addressable-value demonstrations
    pub demo_size: usize,
    /// Bytes per element
    pub element_bytes: usize,
    pub track_allocations: bool,
    pub pinned_cpu: Option<usize>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// What a report section covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// The five-step sequence run against one holder variant
    Variant,
    /// Copy versus transfer out of an addressable value
    Demonstration,
}

/// All measurements recorded under one banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub title: String,
    pub kind: SectionKind,
    pub entries: Vec<MeasurementEntry>,
}

impl SectionResult {
    /// Find the entry recorded under `label`
    pub fn entry(&self, label: &str) -> Option<&MeasurementEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// One timed operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub label: String,
    pub elapsed_ns: u64,
    pub seconds: f64,
    // CPU cycles (0 without a cycle counter)
    pub cycles: u64,
    pub alloc_bytes: u64,
    pub alloc_count: u64,
}

impl MeasurementEntry {
    /// Capture a measurement under `label`
    pub fn new(label: &str, measurement: &Measurement) -> Self {
        Self {
            label: label.to_string(),
            elapsed_ns: measurement.nanos(),
            seconds: measurement.seconds(),
            cycles: measurement.cycles,
            alloc_bytes: measurement.alloc_bytes,
            alloc_count: measurement.alloc_count,
        }
    }
}

/// Same operation timed on the baseline and candidate variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub label: String,
    /// Baseline section title (the copy-only variant)
    pub baseline: String,
    /// Candidate section title (the copy+move variant)
    pub candidate: String,
    pub baseline_ns: u64,
    pub candidate_ns: u64,
    /// Speedup vs baseline (1.0 = same, >1.0 = faster, <1.0 = slower)
    pub speedup: f64,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub sections: usize,
    pub measurements: usize,
    pub total_duration_ms: f64,
}

/// Pair up entries of the first two variant sections by label.
///
/// The first variant section is the baseline. Labels missing from either side
/// are skipped.
pub fn compare_variants(sections: &[SectionResult]) -> Vec<ComparisonEntry> {
    let mut variants = sections.iter().filter(|s| s.kind == SectionKind::Variant);
    let (Some(baseline), Some(candidate)) = (variants.next(), variants.next()) else {
        return Vec::new();
    };

    baseline
        .entries
        .iter()
        .filter_map(|base| {
            let cand = candidate.entry(&base.label)?;
            Some(ComparisonEntry {
                label: base.label.clone(),
                baseline: baseline.title.clone(),
                candidate: candidate.title.clone(),
                baseline_ns: base.elapsed_ns,
                candidate_ns: cand.elapsed_ns,
                // Sub-nanosecond readings are clamped to 1 ns
                speedup: base.elapsed_ns.max(1) as f64 / cand.elapsed_ns.max(1) as f64,
            })
        })
        .collect()
}
