//! Output formatting and persistence for the analysis report.
//!
//! Supports pretty-printing, JSON serialization, and CSV report writing.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::metrics::types::StudentReport;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(reports: &[StudentReport]) {
    debug!("{:#?}", reports);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(reports: &[StudentReport]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

/// Writes the full report as a CSV file with headers, one row per student in
/// input order. Overwrites any previous report at the same path.
pub fn write_report(path: &Path, reports: &[StudentReport]) -> Result<()> {
    debug!(path = %path.display(), rows = reports.len(), "Writing report CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for report in reports {
        writer.serialize(report)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = reports.len(), "Report written");
    Ok(())
}

/// Writes any serializable chart-data payload as pretty JSON for the
/// plotting collaborator.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "Chart data written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::Cell;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_report(id: &str) -> StudentReport {
        StudentReport {
            student_id: id.to_string(),
            average_gpa: Cell::Num(3.25),
            group: "Average".to_string(),
            trend: "Both".to_string(),
            variance: 0.12,
            quarters_until_graduation: 7,
            on_track: "On Track".to_string(),
            had_break: "No".to_string(),
            gpa_pre_break: Cell::NotApplicable,
            gpa_post_break: Cell::NotApplicable,
            gpa_change: Cell::NotApplicable,
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&[sample_report("1")]);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&[sample_report("1")]).unwrap();
    }

    #[test]
    fn test_write_report_headers_and_rows() {
        let path = temp_path("student_record_rater_test_report.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_report(&path, &[sample_report("1"), sample_report("2")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("StudentID,Average GPA,Group,GPA Trend,GPA Variance"));
        assert!(lines[1].contains("N/A"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_report_overwrites_previous_run() {
        let path = temp_path("student_record_rater_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_report(&path, &[sample_report("1"), sample_report("2")]).unwrap();
        write_report(&path, &[sample_report("3")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("3,"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_round_trips_values() {
        let path = temp_path("student_record_rater_test_series.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &vec![3.0, 3.5, 2.0]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let values: Vec<f64> = serde_json::from_str(&content).unwrap();
        assert_eq!(values, vec![3.0, 3.5, 2.0]);

        fs::remove_file(&path).unwrap();
    }
}
