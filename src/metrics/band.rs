/// Classifies a student's mean GPA relative to the cohort mean.
///
/// | Range                                   | Band          |
/// |-----------------------------------------|---------------|
/// | > cohort + 0.1                          | Above Average |
/// | within [cohort - 0.1, cohort + 0.1]     | Average       |
/// | < cohort - 0.1                          | Below Average |
///
/// The boundary belongs to `Average`, so the three bands partition the line
/// with no gap or overlap.
pub fn band(student_avg: f64, cohort_avg: f64) -> String {
    if student_avg > cohort_avg + 0.1 {
        "Above Average".into()
    } else if student_avg < cohort_avg - 0.1 {
        "Below Average".into()
    } else {
        "Average".into()
    }
}
