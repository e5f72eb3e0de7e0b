/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population variance (divide by N, not N-1).
/// Returns 0.0 for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Rounds to two decimal places, the precision of every GPA figure in the
/// report.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_simple() {
        assert_eq!(mean(&[3.0, 3.5, 2.0]), 8.5 / 3.0);
    }

    #[test]
    fn test_variance_of_zero_or_one_values() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.7]), 0.0);
    }

    #[test]
    fn test_variance_is_population_variance() {
        // Sample variance of [2, 4] would be 2; population variance is 1.
        assert_eq!(variance(&[2.0, 4.0]), 1.0);
    }

    #[test]
    fn test_variance_never_negative() {
        assert!(variance(&[3.0, 3.0, 3.0]) >= 0.0);
        assert!(variance(&[0.0, 4.0, 2.0, 3.3]) >= 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.8333333), 2.83);
        assert_eq!(round2(0.38888), 0.39);
        assert_eq!(round2(-0.5), -0.5);
    }
}
