//! Data types used by the metric engine.

use serde::{Serialize, Serializer};
use std::fmt;

/// Numeric parameters of the graduation metrics.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Units required for the degree.
    pub required_units: u32,
    /// Institutional per-quarter unit target, used both as the pace for the
    /// quarters-until-graduation projection and as the on-track threshold.
    pub units_per_quarter: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            required_units: 180,
            units_per_quarter: 16,
        }
    }
}

/// A report cell that may hold a number, an explicit `N/A` marker, or an
/// `ERROR` marker. The markers are sentinels, never empty cells and never
/// zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Num(f64),
    NotApplicable,
    Error,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Num(v) => serializer.serialize_f64(*v),
            Cell::NotApplicable => serializer.serialize_str("N/A"),
            Cell::Error => serializer.serialize_str("ERROR"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Num(v) => write!(f, "{v}"),
            Cell::NotApplicable => write!(f, "N/A"),
            Cell::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of the break-detection metric for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakMetric {
    /// "Yes", "No", or "ERROR" when the student's timestamps cannot be
    /// ordered.
    pub had_break: String,
    pub gpa_before: Cell,
    pub gpa_after: Cell,
    pub gpa_change: Cell,
}

impl BreakMetric {
    pub fn no_break() -> Self {
        BreakMetric {
            had_break: "No".into(),
            gpa_before: Cell::NotApplicable,
            gpa_after: Cell::NotApplicable,
            gpa_change: Cell::NotApplicable,
        }
    }

    pub fn error() -> Self {
        BreakMetric {
            had_break: "ERROR".into(),
            gpa_before: Cell::Error,
            gpa_after: Cell::Error,
            gpa_change: Cell::Error,
        }
    }
}

/// One fully assembled report row, serialized with the report column names.
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "Average GPA")]
    pub average_gpa: Cell,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "GPA Trend")]
    pub trend: String,
    #[serde(rename = "GPA Variance")]
    pub variance: f64,
    #[serde(rename = "Quarters Until Graduation")]
    pub quarters_until_graduation: i64,
    #[serde(rename = "Graduation on Track?")]
    pub on_track: String,
    #[serde(rename = "Had Break")]
    pub had_break: String,
    #[serde(rename = "GPA Pre-Break")]
    pub gpa_pre_break: Cell,
    #[serde(rename = "GPA Post-Break")]
    pub gpa_post_break: Cell,
    #[serde(rename = "GPA Change")]
    pub gpa_change: Cell,
}
