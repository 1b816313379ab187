//! Linear Regression Module
//! Ordinary least squares with intercept, plus a seeded train/test split.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RegressionError {
    #[error("Need at least {needed} samples to fit, got {got}")]
    TooFewSamples { needed: usize, got: usize },
    #[error("Feature rows have inconsistent widths")]
    RaggedFeatures,
    #[error("Feature matrix is singular; features are collinear or constant")]
    Singular,
}

/// Fitted linear model: y = intercept + sum(coef_i * x_i).
#[derive(Debug, Clone)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegression {
    /// Fit by solving the normal equations (X'X) b = X'y.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self, RegressionError> {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        if x.iter().any(|row| row.len() != n_features) || x.len() != y.len() {
            return Err(RegressionError::RaggedFeatures);
        }
        let p = n_features + 1;
        if x.len() < p {
            return Err(RegressionError::TooFewSamples {
                needed: p,
                got: x.len(),
            });
        }

        // Solve on standardized features; coefficients map back to raw units below.
        let mut means = Vec::with_capacity(n_features);
        let mut scales = Vec::with_capacity(n_features);
        for j in 0..n_features {
            let column: Vec<f64> = x.iter().map(|row| row[j]).collect();
            let mean = column.iter().mean();
            let scale = column.iter().population_std_dev();
            if !scale.is_finite() || scale <= f64::EPSILON * mean.abs().max(1.0) {
                return Err(RegressionError::Singular);
            }
            means.push(mean);
            scales.push(scale);
        }

        // Augmented system [Z'Z | Z'y] with a leading intercept column.
        let mut system = vec![vec![0.0; p + 1]; p];
        for (row, &target) in x.iter().zip(y) {
            let design: Vec<f64> = std::iter::once(1.0)
                .chain(
                    row.iter()
                        .zip(means.iter().zip(&scales))
                        .map(|(v, (m, s))| (v - m) / s),
                )
                .collect();
            for i in 0..p {
                for j in 0..p {
                    system[i][j] += design[i] * design[j];
                }
                system[i][p] += design[i] * target;
            }
        }

        let solution = Self::solve(system)?;
        let coefficients: Vec<f64> = solution[1..]
            .iter()
            .zip(&scales)
            .map(|(b, s)| b / s)
            .collect();
        let intercept = solution[0]
            - coefficients
                .iter()
                .zip(&means)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    /// Gaussian elimination with partial pivoting on an augmented matrix.
    fn solve(mut m: Vec<Vec<f64>>) -> Result<Vec<f64>, RegressionError> {
        let n = m.len();
        let scale = m
            .iter()
            .flat_map(|row| row[..n].iter())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let tolerance = scale.max(1.0) * 1e-12;

        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&a, &b| m[a][k].abs().total_cmp(&m[b][k].abs()))
                .unwrap_or(k);
            if m[pivot][k].abs() <= tolerance {
                return Err(RegressionError::Singular);
            }
            m.swap(k, pivot);

            for r in (k + 1)..n {
                let factor = m[r][k] / m[k][k];
                if factor == 0.0 {
                    continue;
                }
                for c in k..=n {
                    m[r][c] -= factor * m[k][c];
                }
            }
        }

        let mut solution = vec![0.0; n];
        for k in (0..n).rev() {
            let tail: f64 = ((k + 1)..n).map(|c| m[k][c] * solution[c]).sum();
            solution[k] = (m[k][n] - tail) / m[k][k];
        }
        Ok(solution)
    }

    pub fn predict_one(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<f64> {
        x.iter().map(|row| self.predict_one(row)).collect()
    }
}

/// Row indices of a shuffled split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a fixed seed and hold out `ceil(n * test_fraction)`
/// rows (at least one) for testing.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> TrainTestSplit {
    let n_test = ((n as f64 * test_fraction).ceil() as usize).clamp(1, n.max(1)).min(n);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    TrainTestSplit {
        train,
        test: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_relation() {
        // y = 3 + 2a - 0.5b
        let x: Vec<Vec<f64>> = vec![
            vec![1.0, 4.0],
            vec![2.0, 1.0],
            vec![3.0, 7.0],
            vec![4.0, 2.0],
            vec![5.0, 9.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 3.0 + 2.0 * r[0] - 0.5 * r[1]).collect();

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert!((model.intercept - 3.0).abs() < 1e-9);
        assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 0.5).abs() < 1e-9);
        assert!((model.predict_one(&[10.0, 0.0]) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn fits_features_of_mixed_magnitude() {
        // Ton-miles in the millions next to a distance band in 1..=5.
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![f64::from(i % 5 + 1), 2.0e6 + f64::from(i) * 1.0e5])
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 1.0 + 2.0 * r[0] + 0.001 * r[1]).collect();

        let model = LinearRegression::fit(&x, &y).unwrap();
        assert!((model.coefficients[0] - 2.0).abs() < 1e-6);
        assert!((model.coefficients[1] - 0.001).abs() < 1e-9);
        assert!((model.intercept - 1.0).abs() < 1e-4);
        let predicted = model.predict(&x);
        for (p, a) in predicted.iter().zip(&y) {
            assert!((p - a).abs() < 1e-6 * a.abs());
        }
    }

    #[test]
    fn constant_feature_is_singular() {
        let x = vec![vec![1.0, 7.0], vec![2.0, 7.0], vec![3.0, 7.0], vec![4.0, 7.0]];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            LinearRegression::fit(&x, &y).unwrap_err(),
            RegressionError::Singular
        );
    }

    #[test]
    fn collinear_features_are_singular() {
        let x = vec![vec![1.0, 2.0], vec![2.0, 4.0], vec![3.0, 6.0], vec![4.0, 8.0]];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            LinearRegression::fit(&x, &y).unwrap_err(),
            RegressionError::Singular
        );
    }

    #[test]
    fn too_few_samples() {
        let x = vec![vec![1.0, 2.0]];
        let y = vec![1.0];
        assert_eq!(
            LinearRegression::fit(&x, &y).unwrap_err(),
            RegressionError::TooFewSamples { needed: 3, got: 1 }
        );
    }

    #[test]
    fn split_is_seeded_and_complete() {
        let a = train_test_split(10, 0.2, 42);
        let b = train_test_split(10, 0.2, 42);
        assert_eq!(a, b);
        assert_eq!(a.test.len(), 2);
        assert_eq!(a.train.len(), 8);

        let mut all: Vec<usize> = a.train.iter().chain(&a.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn split_rounds_test_size_up() {
        let split = train_test_split(11, 0.2, 7);
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }
}
