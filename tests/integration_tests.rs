use student_record_rater::metrics::engine::analyze_roster;
use student_record_rater::metrics::types::{AnalysisConfig, Cell};
use student_record_rater::output::write_report;
use student_record_rater::parser::parse_roster;
use student_record_rater::plotdata::{SeriesKind, average_gpa_by_term, series};

const FIXTURE: &str = include_str!("fixtures/sample_records.csv");

#[test]
fn test_full_pipeline() {
    let roster = parse_roster(FIXTURE.as_bytes()).expect("Failed to parse roster");
    assert_eq!(roster.len(), 5);

    let reports = analyze_roster(&roster, &AnalysisConfig::default());
    assert_eq!(reports.len(), 5);
    let ids: Vec<&str> = reports.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

    // Student 1: consecutive Winter→Spring→Fall run, GPA up then down.
    let s1 = &reports[0];
    assert_eq!(s1.average_gpa, Cell::Num(2.83));
    assert_eq!(s1.trend, "Both");
    assert_eq!(s1.variance, 0.39);
    assert_eq!(s1.had_break, "No");
    assert_eq!(s1.gpa_change, Cell::NotApplicable);

    // Student 2: Winter→Fall skips Spring, so the first pair is a break.
    let s2 = &reports[1];
    assert_eq!(s2.had_break, "Yes");
    assert_eq!(s2.gpa_pre_break, Cell::Num(3.0));
    assert_eq!(s2.gpa_post_break, Cell::Num(2.5));
    assert_eq!(s2.gpa_change, Cell::Num(-0.5));

    // Student 3: no enrolled quarters at all; every metric stays defined.
    let s3 = &reports[2];
    assert_eq!(s3.average_gpa, Cell::NotApplicable);
    assert_eq!(s3.group, "N/A");
    assert_eq!(s3.on_track, "Not Applicable");
    assert_eq!(s3.quarters_until_graduation, 12);

    // Student 4: malformed timestamp fails break detection only.
    let s4 = &reports[3];
    assert_eq!(s4.had_break, "ERROR");
    assert_eq!(s4.gpa_pre_break, Cell::Error);
    assert_eq!(s4.average_gpa, Cell::Num(3.7));
    assert_eq!(s4.on_track, "On Track");

    // Student 5: 180 units over four heavy quarters, strictly rising GPA.
    let s5 = &reports[4];
    assert_eq!(s5.quarters_until_graduation, 0);
    assert_eq!(s5.trend, "Increasing");
    assert_eq!(s5.on_track, "On Track");
    assert_eq!(s5.had_break, "No");
}

#[test]
fn test_report_csv_has_one_row_per_student() {
    let roster = parse_roster(FIXTURE.as_bytes()).expect("Failed to parse roster");
    let reports = analyze_roster(&roster, &AnalysisConfig::default());

    let path = std::env::temp_dir().join("student_record_rater_integration_report.csv");
    let _ = std::fs::remove_file(&path);

    write_report(&path, &reports).expect("Failed to write report");

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6); // header + 5 students

    assert!(lines[0].contains("Quarters Until Graduation"));
    assert!(lines[0].contains("Graduation on Track?"));

    // The zero-quarter student's row carries explicit markers, not blanks.
    let s3_row = lines.iter().find(|l| l.starts_with("3,")).unwrap();
    assert!(s3_row.contains("N/A"));
    assert!(s3_row.contains("Not Applicable"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_chart_series_over_fixture() {
    let roster = parse_roster(FIXTURE.as_bytes()).expect("Failed to parse roster");

    // Eleven present GPA observations across the roster.
    let gpas = series(&roster, SeriesKind::OverallGpa, None);
    assert_eq!(gpas.len(), 11);

    // Terms come out chronologically; the malformed stamp contributes none.
    let averages = average_gpa_by_term(&roster);
    let terms: Vec<&str> = averages.iter().map(|a| a.term.as_str()).collect();
    assert_eq!(
        terms,
        vec!["2023WQ", "2023SQ", "2023FQ", "2024WQ", "2024SQ", "2024FQ"]
    );
}
