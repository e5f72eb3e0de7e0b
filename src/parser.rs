//! CSV parser for the student record roster.
//!
//! The input table carries one row per student with a fixed block of five
//! quarter slots. Every column is declared up front, so there is no runtime
//! column-name formatting; the header row is validated against the declared
//! column list and an input missing a column fails with that column named
//! in the error.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::roster::{QUARTER_SLOTS, QuarterSnapshot, StudentRecord, Term};

/// One row of the input CSV, column names as produced by the record exporter.
/// Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawStudentRow {
    #[serde(rename = "StudentID")]
    student_id: String,

    #[serde(rename = "Q1_Timestamp")]
    q1_timestamp: Option<String>,
    #[serde(rename = "Q1_Overall_GPA")]
    q1_overall_gpa: Option<f64>,
    #[serde(rename = "Q1_CS_GPA")]
    q1_cs_gpa: Option<f64>,
    #[serde(rename = "Q1_Total_Units")]
    q1_total_units: Option<f64>,
    #[serde(rename = "Q1_CS_Units")]
    q1_cs_units: Option<f64>,

    #[serde(rename = "Q2_Timestamp")]
    q2_timestamp: Option<String>,
    #[serde(rename = "Q2_Overall_GPA")]
    q2_overall_gpa: Option<f64>,
    #[serde(rename = "Q2_CS_GPA")]
    q2_cs_gpa: Option<f64>,
    #[serde(rename = "Q2_Total_Units")]
    q2_total_units: Option<f64>,
    #[serde(rename = "Q2_CS_Units")]
    q2_cs_units: Option<f64>,

    #[serde(rename = "Q3_Timestamp")]
    q3_timestamp: Option<String>,
    #[serde(rename = "Q3_Overall_GPA")]
    q3_overall_gpa: Option<f64>,
    #[serde(rename = "Q3_CS_GPA")]
    q3_cs_gpa: Option<f64>,
    #[serde(rename = "Q3_Total_Units")]
    q3_total_units: Option<f64>,
    #[serde(rename = "Q3_CS_Units")]
    q3_cs_units: Option<f64>,

    #[serde(rename = "Q4_Timestamp")]
    q4_timestamp: Option<String>,
    #[serde(rename = "Q4_Overall_GPA")]
    q4_overall_gpa: Option<f64>,
    #[serde(rename = "Q4_CS_GPA")]
    q4_cs_gpa: Option<f64>,
    #[serde(rename = "Q4_Total_Units")]
    q4_total_units: Option<f64>,
    #[serde(rename = "Q4_CS_Units")]
    q4_cs_units: Option<f64>,

    #[serde(rename = "Q5_Timestamp")]
    q5_timestamp: Option<String>,
    #[serde(rename = "Q5_Overall_GPA")]
    q5_overall_gpa: Option<f64>,
    #[serde(rename = "Q5_CS_GPA")]
    q5_cs_gpa: Option<f64>,
    #[serde(rename = "Q5_Total_Units")]
    q5_total_units: Option<f64>,
    #[serde(rename = "Q5_CS_Units")]
    q5_cs_units: Option<f64>,
}

/// Every column the input table must carry. Header-based deserialization
/// fills an absent `Option` column with `None` instead of erroring, so the
/// header row is checked against this list up front.
const EXPECTED_COLUMNS: [&str; 26] = [
    "StudentID",
    "Q1_Timestamp",
    "Q1_Overall_GPA",
    "Q1_CS_GPA",
    "Q1_Total_Units",
    "Q1_CS_Units",
    "Q2_Timestamp",
    "Q2_Overall_GPA",
    "Q2_CS_GPA",
    "Q2_Total_Units",
    "Q2_CS_Units",
    "Q3_Timestamp",
    "Q3_Overall_GPA",
    "Q3_CS_GPA",
    "Q3_Total_Units",
    "Q3_CS_Units",
    "Q4_Timestamp",
    "Q4_Overall_GPA",
    "Q4_CS_GPA",
    "Q4_Total_Units",
    "Q4_CS_Units",
    "Q5_Timestamp",
    "Q5_Overall_GPA",
    "Q5_CS_GPA",
    "Q5_Total_Units",
    "Q5_CS_Units",
];

type RawSlot = (Option<String>, Option<f64>, Option<f64>, Option<f64>, Option<f64>);

impl RawStudentRow {
    fn slots(self) -> (String, [RawSlot; QUARTER_SLOTS]) {
        (
            self.student_id,
            [
                (
                    self.q1_timestamp,
                    self.q1_overall_gpa,
                    self.q1_cs_gpa,
                    self.q1_total_units,
                    self.q1_cs_units,
                ),
                (
                    self.q2_timestamp,
                    self.q2_overall_gpa,
                    self.q2_cs_gpa,
                    self.q2_total_units,
                    self.q2_cs_units,
                ),
                (
                    self.q3_timestamp,
                    self.q3_overall_gpa,
                    self.q3_cs_gpa,
                    self.q3_total_units,
                    self.q3_cs_units,
                ),
                (
                    self.q4_timestamp,
                    self.q4_overall_gpa,
                    self.q4_cs_gpa,
                    self.q4_total_units,
                    self.q4_cs_units,
                ),
                (
                    self.q5_timestamp,
                    self.q5_overall_gpa,
                    self.q5_cs_gpa,
                    self.q5_total_units,
                    self.q5_cs_units,
                ),
            ],
        )
    }
}

/// Unit counts arrive float-formatted when the exporter went through a
/// dataframe (`"15.0"`). A negative count is invalid data and treated as
/// absent rather than clamped to a fabricated zero.
fn to_units(value: Option<f64>) -> Option<u32> {
    value.filter(|v| *v >= 0.0).map(|v| v.round() as u32)
}

fn build_snapshot(slot: RawSlot) -> Option<QuarterSnapshot> {
    let (timestamp, overall_gpa, cs_gpa, total_units, cs_units) = slot;

    let empty = timestamp.is_none()
        && overall_gpa.is_none()
        && cs_gpa.is_none()
        && total_units.is_none()
        && cs_units.is_none();
    if empty {
        return None;
    }

    let term = timestamp.as_deref().and_then(Term::parse);
    Some(QuarterSnapshot {
        raw_timestamp: timestamp,
        term,
        overall_gpa,
        cs_gpa,
        total_units: to_units(total_units),
        cs_units: to_units(cs_units),
    })
}

fn build_record(row: RawStudentRow) -> StudentRecord {
    let (student_id, slots) = row.slots();
    StudentRecord {
        student_id,
        quarters: slots.map(build_snapshot),
    }
}

/// Reads a roster from CSV bytes.
///
/// # Errors
///
/// Returns an error if the header row is missing a declared column or a cell
/// cannot be deserialized into its declared type. Malformed timestamps are
/// not an error here; they surface later as per-student error markers.
pub fn parse_roster<R: std::io::Read>(reader: R) -> Result<Vec<StudentRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header row")?;
    for column in EXPECTED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("input is missing required column {column:?}");
        }
    }

    let mut roster = Vec::new();

    for result in rdr.deserialize() {
        let row: RawStudentRow = result.context("failed to deserialize student row")?;
        roster.push(build_record(row));
    }

    debug!(students = roster.len(), "Roster parsed");
    Ok(roster)
}

/// Loads a roster from a CSV file on disk.
pub fn load_roster(path: &Path) -> Result<Vec<StudentRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let roster = parse_roster(file)?;
    info!(path = %path.display(), students = roster.len(), "Roster loaded");
    Ok(roster)
}
