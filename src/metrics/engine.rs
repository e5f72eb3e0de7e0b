//! The metric engine: six independent per-student metrics over one roster.
//!
//! The cohort average is computed once per run and passed into the band
//! metric by value; nothing here holds state between calls. Errors stay
//! per-student and per-metric: a malformed row degrades that student's
//! affected cells to markers and never aborts the run.

use tracing::{info, warn};

use crate::metrics::band::band;
use crate::metrics::types::{AnalysisConfig, BreakMetric, Cell, StudentReport};
use crate::metrics::utility::{mean, round2, variance};
use crate::roster::{StudentRecord, Term};

/// Mean of every present overall-GPA observation across the whole roster,
/// flattened first so unevenly filled quarters carry their true weight.
pub fn cohort_average_gpa(roster: &[StudentRecord]) -> f64 {
    let gpas: Vec<f64> = roster.iter().flat_map(|s| s.overall_gpas()).collect();
    mean(&gpas)
}

/// A student's own mean GPA, rounded to two decimals. `None` for a student
/// with no GPA observations.
pub fn average_gpa(student: &StudentRecord) -> Option<f64> {
    let gpas = student.overall_gpas();
    if gpas.is_empty() {
        None
    } else {
        Some(round2(mean(&gpas)))
    }
}

/// Classifies GPA movement across quarters: strictly rising everywhere is
/// `Increasing`, strictly falling everywhere is `Decreasing`, anything else
/// (including fewer than two observations) is `Both`.
pub fn gpa_trend(student: &StudentRecord) -> String {
    let gpas = match student.chronological_gpa_snapshots() {
        Some(snaps) => snaps.iter().filter_map(|s| s.overall_gpa).collect(),
        None => {
            warn!(
                student_id = %student.student_id,
                "Malformed timestamp, classifying trend in stored slot order"
            );
            student.overall_gpas()
        }
    };

    let diffs: Vec<f64> = gpas.windows(2).map(|w| w[1] - w[0]).collect();
    if diffs.is_empty() {
        "Both".into()
    } else if diffs.iter().all(|d| *d > 0.0) {
        "Increasing".into()
    } else if diffs.iter().all(|d| *d < 0.0) {
        "Decreasing".into()
    } else {
        "Both".into()
    }
}

/// Population variance of the student's GPA observations, two decimals.
pub fn gpa_variance(student: &StudentRecord) -> f64 {
    round2(variance(&student.overall_gpas()))
}

/// Quarters left until the unit requirement is met, at the institutional
/// per-quarter pace. No floor clamp: a student past the requirement reports
/// zero or a negative count.
pub fn quarters_until_graduation(student: &StudentRecord, cfg: &AnalysisConfig) -> i64 {
    let sum_units: u32 = student.total_units().iter().sum();
    let remaining = cfg.required_units as f64 - sum_units as f64;
    (remaining / cfg.units_per_quarter as f64).ceil() as i64
}

/// Whether the student's average unit load meets the per-quarter target.
/// A student with no enrolled quarters has no average load and reports
/// `Not Applicable` instead of dividing by zero.
pub fn on_track(student: &StudentRecord, cfg: &AnalysisConfig) -> String {
    let units = student.total_units();
    if units.is_empty() {
        return "Not Applicable".into();
    }
    let avg = units.iter().sum::<u32>() as f64 / units.len() as f64;
    if avg >= cfg.units_per_quarter as f64 {
        "On Track".into()
    } else {
        "Not On Track".into()
    }
}

/// Scans chronologically adjacent enrolled quarters for the first violation
/// of the cyclic quarter sequence and reports the GPA on each side of it.
/// Only the first break is reported. A student whose timestamps cannot be
/// ordered gets `ERROR` markers.
pub fn detect_break(student: &StudentRecord) -> BreakMetric {
    let Some(snaps) = student.chronological_gpa_snapshots() else {
        warn!(student_id = %student.student_id, "Malformed timestamp, break detection failed");
        return BreakMetric::error();
    };

    let observations: Vec<(Term, f64)> = snaps
        .iter()
        .filter_map(|s| s.term.zip(s.overall_gpa))
        .collect();

    for pair in observations.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        if !before.0.is_consecutive(&after.0) {
            return BreakMetric {
                had_break: "Yes".into(),
                gpa_before: Cell::Num(before.1),
                gpa_after: Cell::Num(after.1),
                gpa_change: Cell::Num(round2(after.1 - before.1)),
            };
        }
    }

    BreakMetric::no_break()
}

/// Assembles one report row from the six metrics.
pub fn analyze_student(
    student: &StudentRecord,
    cohort_avg: f64,
    cfg: &AnalysisConfig,
) -> StudentReport {
    let (average_gpa, group) = match average_gpa(student) {
        Some(avg) => (Cell::Num(avg), band(avg, cohort_avg)),
        None => (Cell::NotApplicable, "N/A".to_string()),
    };
    let breaks = detect_break(student);

    StudentReport {
        student_id: student.student_id.clone(),
        average_gpa,
        group,
        trend: gpa_trend(student),
        variance: gpa_variance(student),
        quarters_until_graduation: quarters_until_graduation(student, cfg),
        on_track: on_track(student, cfg),
        had_break: breaks.had_break,
        gpa_pre_break: breaks.gpa_before,
        gpa_post_break: breaks.gpa_after,
        gpa_change: breaks.gpa_change,
    }
}

/// Runs the whole roster: one cohort average, then one row per student in
/// input order.
pub fn analyze_roster(roster: &[StudentRecord], cfg: &AnalysisConfig) -> Vec<StudentReport> {
    let cohort_avg = cohort_average_gpa(roster);
    info!(
        cohort_avg = round2(cohort_avg),
        students = roster.len(),
        "Cohort average computed"
    );

    roster
        .iter()
        .map(|student| analyze_student(student, cohort_avg, cfg))
        .collect()
}
