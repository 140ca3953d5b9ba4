//! Descriptive statistics over paid amounts.

/// Arithmetic mean; `0.0` for an empty slice.
///
/// Accumulates offsets from the first value, so a constant slice yields
/// that constant exactly.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let offset: f64 = values.iter().map(|v| v - first).sum();
    first + offset / values.len() as f64
}

/// Population standard deviation (divides by N); `0.0` for an empty slice.
///
/// `mean_override` lets a caller that already holds the mean skip
/// recomputing it.
pub fn std_dev(values: &[f64], mean_override: Option<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean_override.unwrap_or_else(|| mean(values));
    let sq_diff: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sq_diff / values.len() as f64).sqrt()
}

/// Largest value, `0.0` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[100.0, 100.0, 100.0, 100.0, 1000.0]), 280.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_mean_constant_is_exact() {
        assert_eq!(mean(&[0.1, 0.1, 0.1]), 0.1);
    }

    #[test]
    fn test_std_dev_population() {
        let values = [100.0, 100.0, 100.0, 100.0, 1000.0];
        assert_eq!(std_dev(&values, None), 360.0);
        assert_eq!(std_dev(&values, Some(280.0)), 360.0);
    }

    #[test]
    fn test_std_dev_single_and_constant_are_zero() {
        assert_eq!(std_dev(&[42.0], None), 0.0);
        assert_eq!(std_dev(&[0.1, 0.1, 0.1, 0.1], None), 0.0);
        assert_eq!(std_dev(&[], None), 0.0);
    }

    #[test]
    fn test_std_dev_against_supplied_mean() {
        // deviations of 1 from a supplied mean of 0
        assert_eq!(std_dev(&[1.0, 1.0], Some(0.0)), 1.0);
    }

    #[test]
    fn test_max() {
        assert_eq!(max(&[]), 0.0);
        assert_eq!(max(&[3.0, 9.5, 1.0]), 9.5);
    }
}
