//! Flattened data series for the chart-rendering collaborator.
//!
//! Charts live outside this crate; it only needs flat observation arrays,
//! optionally filtered to one quarter type, plus per-term cohort averages
//! for the GPA-over-time line.

use serde::Serialize;

use crate::metrics::utility::mean;
use crate::roster::{QuarterCode, QuarterSnapshot, StudentRecord, Term};
use std::collections::BTreeMap;

/// Which observation column to flatten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    OverallGpa,
    CsGpa,
    TotalUnits,
    CsUnits,
}

impl SeriesKind {
    fn pick(&self, snap: &QuarterSnapshot) -> Option<f64> {
        match self {
            SeriesKind::OverallGpa => snap.overall_gpa,
            SeriesKind::CsGpa => snap.cs_gpa,
            SeriesKind::TotalUnits => snap.total_units.map(f64::from),
            SeriesKind::CsUnits => snap.cs_units.map(f64::from),
        }
    }
}

fn quarter_matches(snap: &QuarterSnapshot, quarter: Option<QuarterCode>) -> bool {
    match quarter {
        None => true,
        // Filtering needs a parsed term; malformed or absent timestamps
        // never match a quarter filter.
        Some(q) => snap.term.is_some_and(|t| t.quarter == q),
    }
}

/// Flattens one observation column across the roster, in roster order.
/// With a quarter filter, only snapshots of that quarter type contribute.
pub fn series(
    roster: &[StudentRecord],
    kind: SeriesKind,
    quarter: Option<QuarterCode>,
) -> Vec<f64> {
    roster
        .iter()
        .flat_map(|s| s.present())
        .filter(|snap| quarter_matches(snap, quarter))
        .filter_map(|snap| kind.pick(snap))
        .collect()
}

/// Paired `(units, gpa)` points for the scatter charts. Points pair within a
/// snapshot, so a quarter missing either value contributes nothing.
pub fn units_vs_gpa(
    roster: &[StudentRecord],
    units: SeriesKind,
    quarter: Option<QuarterCode>,
) -> Vec<(f64, f64)> {
    roster
        .iter()
        .flat_map(|s| s.present())
        .filter(|snap| quarter_matches(snap, quarter))
        .filter_map(|snap| units.pick(snap).zip(snap.overall_gpa))
        .collect()
}

/// One point of the GPA-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermAverage {
    /// Chart-axis key, e.g. `2024WQ`.
    pub term: String,
    pub average_gpa: f64,
}

/// Mean overall GPA per distinct term, chronologically sorted. Snapshots
/// without a valid term are skipped.
pub fn average_gpa_by_term(roster: &[StudentRecord]) -> Vec<TermAverage> {
    let mut by_term: BTreeMap<Term, Vec<f64>> = BTreeMap::new();

    for snap in roster.iter().flat_map(|s| s.present()) {
        if let (Some(term), Some(gpa)) = (snap.term, snap.overall_gpa) {
            by_term.entry(term).or_default().push(gpa);
        }
    }

    by_term
        .into_iter()
        .map(|(term, gpas)| TermAverage {
            term: term.to_string(),
            average_gpa: mean(&gpas),
        })
        .collect()
}

/// Mean of a flattened series, for the cohort reference line on the GPA
/// chart.
pub fn series_mean(roster: &[StudentRecord], kind: SeriesKind, quarter: Option<QuarterCode>) -> f64 {
    mean(&series(roster, kind, quarter))
}
