//! Typed roster model for student quarterly records.
//!
//! A roster holds one [`StudentRecord`] per student, each with a fixed set of
//! quarter slots. Quarter timestamps use the `YYYYMM` convention where the
//! month digits are a quarter code, not a calendar month.

use serde::Serialize;
use std::fmt;

/// Number of quarter slots per student row in the input table.
pub const QUARTER_SLOTS: usize = 5;

/// A quarter of the academic year. The ordering is cyclic:
/// Winter → Spring → Fall → Winter of the next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QuarterCode {
    Winter,
    Spring,
    Fall,
}

impl QuarterCode {
    /// Parses the two-digit code from a `YYYYMM` timestamp.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(QuarterCode::Winter),
            "03" => Some(QuarterCode::Spring),
            "08" => Some(QuarterCode::Fall),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            QuarterCode::Winter => "01",
            QuarterCode::Spring => "03",
            QuarterCode::Fall => "08",
        }
    }

    /// Short label used in CLI flags and chart keys (WQ/SQ/FQ).
    pub fn label(&self) -> &'static str {
        match self {
            QuarterCode::Winter => "WQ",
            QuarterCode::Spring => "SQ",
            QuarterCode::Fall => "FQ",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "WQ" => Some(QuarterCode::Winter),
            "SQ" => Some(QuarterCode::Spring),
            "FQ" => Some(QuarterCode::Fall),
            _ => None,
        }
    }
}

/// One academic term: a year plus a quarter code, parsed from a `YYYYMM`
/// timestamp. Orders chronologically (the derive works because the quarter
/// codes 01/03/08 are declared in within-year order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Term {
    pub year: u16,
    pub quarter: QuarterCode,
}

impl Term {
    /// Parses a `YYYYMM` timestamp. Accepts a pandas float rendering
    /// (`"202401.0"`) by stripping the trailing `.0`.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.trim();
        let digits = digits.strip_suffix(".0").unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: u16 = digits[..4].parse().ok()?;
        let quarter = QuarterCode::from_code(&digits[4..])?;
        Some(Term { year, quarter })
    }

    /// Whether `next` is the quarter immediately after `self` in the cyclic
    /// order. Fall wraps to Winter of the following year; any other
    /// transition is a break in enrollment.
    pub fn is_consecutive(&self, next: &Term) -> bool {
        match (self.quarter, next.quarter) {
            (QuarterCode::Winter, QuarterCode::Spring)
            | (QuarterCode::Spring, QuarterCode::Fall) => next.year == self.year,
            (QuarterCode::Fall, QuarterCode::Winter) => next.year == self.year + 1,
            _ => false,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.quarter.label())
    }
}

/// One quarter slot of a student row. A slot is materialized when any of its
/// cells is non-empty; each field stays individually optional so a partially
/// filled slot never fabricates zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuarterSnapshot {
    /// Raw timestamp cell, kept for error reporting.
    pub raw_timestamp: Option<String>,
    /// Parsed term; `None` when the timestamp is absent or malformed.
    pub term: Option<Term>,
    pub overall_gpa: Option<f64>,
    pub cs_gpa: Option<f64>,
    pub total_units: Option<u32>,
    pub cs_units: Option<u32>,
}

impl QuarterSnapshot {
    /// A timestamp cell that is present but does not parse to a known term.
    pub fn has_malformed_timestamp(&self) -> bool {
        self.raw_timestamp.is_some() && self.term.is_none()
    }
}

/// One student row: a stable identifier plus up to [`QUARTER_SLOTS`] quarter
/// snapshots in stored slot order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub student_id: String,
    pub quarters: [Option<QuarterSnapshot>; QUARTER_SLOTS],
}

impl StudentRecord {
    /// Present snapshots in stored slot order.
    pub fn present(&self) -> impl Iterator<Item = &QuarterSnapshot> {
        self.quarters.iter().filter_map(|q| q.as_ref())
    }

    /// Present overall GPA observations in stored slot order.
    pub fn overall_gpas(&self) -> Vec<f64> {
        self.present().filter_map(|q| q.overall_gpa).collect()
    }

    /// Present total-unit observations in stored slot order.
    pub fn total_units(&self) -> Vec<u32> {
        self.present().filter_map(|q| q.total_units).collect()
    }

    /// Snapshots that carry both a valid term and an overall GPA, sorted
    /// chronologically. Returns `None` when any present snapshot with a GPA
    /// has a malformed timestamp, since chronological order is then
    /// undefined for that student.
    pub fn chronological_gpa_snapshots(&self) -> Option<Vec<&QuarterSnapshot>> {
        let mut snaps = Vec::new();
        for snap in self.present() {
            if snap.overall_gpa.is_none() {
                continue;
            }
            if snap.has_malformed_timestamp() {
                return None;
            }
            if snap.term.is_some() {
                snaps.push(snap);
            }
        }
        snaps.sort_by_key(|s| s.term);
        Some(snaps)
    }
}
