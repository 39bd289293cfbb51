//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the JSON report schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete comparison report: one row per benchmark configuration, one
/// cell per backend column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata
    pub meta: ReportMeta,
    /// Backend column labels, in cell order
    pub columns: Vec<String>,
    /// One row per enumerated configuration, in enumeration order
    pub rows: Vec<ReportRow>,
    /// Aggregate counts across all cells
    pub summary: ReportSummary,
}

impl Report {
    /// Empty report for the given backend columns.
    pub fn new(version: &str, columns: Vec<String>) -> Self {
        Self {
            meta: ReportMeta::new(version),
            columns,
            rows: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Append a row and fold its cells into the summary.
    pub fn push_row(&mut self, row: ReportRow) {
        self.summary.configs += 1;
        for cell in &row.cells {
            match cell {
                MetricCell::Value(_) => self.summary.collected += 1,
                MetricCell::NoMetric => self.summary.missing_metric += 1,
                MetricCell::MissingExecutable => self.summary.missing_executable += 1,
            }
        }
        self.rows.push(row);
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// JSON schema version
    pub schema_version: u32,
    /// Harness version that produced the report
    pub version: String,
    /// UTC time of report generation
    pub timestamp: DateTime<Utc>,
}

impl ReportMeta {
    /// Metadata stamped with the current time.
    pub fn new(version: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: version.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// One comparison row: a configuration label plus one cell per backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// Configuration file name
    pub config: String,
    /// Per-backend results, in column order
    pub cells: Vec<MetricCell>,
}

/// Result of one (backend, configuration) benchmark invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "kebab-case")]
pub enum MetricCell {
    /// The `avg` metric, as printed by the compositor
    Value(String),
    /// The run produced no parsable benchmark line
    NoMetric,
    /// The backend's executable could not be resolved
    MissingExecutable,
}

impl MetricCell {
    /// Cell text for the human table and CSV output.
    pub fn display(&self) -> &str {
        match self {
            MetricCell::Value(value) => value,
            MetricCell::NoMetric => "-",
            MetricCell::MissingExecutable => "<not found>",
        }
    }
}

/// Aggregate cell counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Configurations enumerated in this run
    pub configs: usize,
    /// Cells with a metric value
    pub collected: usize,
    /// Cells where the run produced no benchmark line
    pub missing_metric: usize,
    /// Cells skipped because the backend executable was missing
    pub missing_executable: usize,
}
