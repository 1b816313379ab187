//! Statistics Calculator Module
//! Error metrics for regression predictions.

use statrs::statistics::Statistics;

/// Handles metric calculations over paired actual/predicted values.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Coefficient of determination.
    ///
    /// A constant target scores 1.0 when predicted exactly and 0.0 otherwise,
    /// so the result is always finite. NaN for empty input.
    pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
        if actual.is_empty() || actual.len() != predicted.len() {
            return f64::NAN;
        }

        let mean = actual.iter().mean();
        let ss_res: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - ss_res / ss_tot
    }

    /// Mean of absolute residuals. NaN for empty input.
    pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
        if actual.is_empty() || actual.len() != predicted.len() {
            return f64::NAN;
        }

        actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).abs())
            .mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = [1.0, 2.0, 3.0];
        assert!((StatsCalculator::r2_score(&y, &y) - 1.0).abs() < 1e-12);
        assert_eq!(StatsCalculator::mean_absolute_error(&y, &y), 0.0);
    }

    #[test]
    fn mean_predictor_scores_zero() {
        let y = [1.0, 2.0, 3.0];
        let p = [2.0, 2.0, 2.0];
        assert!(StatsCalculator::r2_score(&y, &p).abs() < 1e-12);
        assert!((StatsCalculator::mean_absolute_error(&y, &p) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_target() {
        assert_eq!(StatsCalculator::r2_score(&[4.0, 4.0], &[4.0, 4.0]), 1.0);
        assert_eq!(StatsCalculator::r2_score(&[4.0, 4.0], &[3.0, 5.0]), 0.0);
    }

    #[test]
    fn empty_is_nan() {
        assert!(StatsCalculator::r2_score(&[], &[]).is_nan());
        assert!(StatsCalculator::mean_absolute_error(&[], &[]).is_nan());
    }
}
