//! # Return Statistics
//!
//! $$
//! \mu_i = \mathbb E[r_i],\qquad \Sigma_{ij}=\operatorname{Cov}(r_i,r_j)
//! $$
//!
//! Mean-return vector and covariance matrix derived from return series.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::QuboError;
use crate::error::Result;

/// Convert close prices to daily percentage-change returns.
///
/// Pairs containing a non-positive price are skipped.
pub fn pct_change_series(closes: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    if closes[i - 1] > 0.0 && closes[i] > 0.0 {
      out.push(closes[i] / closes[i - 1] - 1.0);
    }
  }
  out
}

/// Align multiple return series to their common tail length.
pub fn align_series(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let min_len = all_returns.iter().map(|r| r.len()).min().unwrap_or(0);
  all_returns
    .iter()
    .map(|r| r[r.len().saturating_sub(min_len)..].to_vec())
    .collect()
}

/// Mean returns and covariance for an ordered asset universe.
///
/// Symmetry and positive-semidefiniteness of the covariance are assumed,
/// not enforced; degenerate upstream statistics pass through unchanged.
#[derive(Clone, Debug)]
pub struct ReturnStatistics {
  mean_returns: Array1<f64>,
  covariance: Array2<f64>,
}

impl ReturnStatistics {
  /// Wrap precomputed statistics, validating shape consistency.
  pub fn from_parts(mean_returns: Array1<f64>, covariance: Array2<f64>) -> Result<Self> {
    let n = mean_returns.len();
    if covariance.nrows() != n || covariance.ncols() != n {
      return Err(QuboError::DimensionMismatch {
        expected: format!("{n}x{n} covariance"),
        got: format!("{}x{}", covariance.nrows(), covariance.ncols()),
      });
    }
    Ok(Self {
      mean_returns,
      covariance,
    })
  }

  /// Empirical statistics from per-asset return series.
  ///
  /// Series are aligned to their common tail; the covariance uses the
  /// unbiased `t - 1` denominator.
  pub fn from_return_series(series: &[Vec<f64>]) -> Result<Self> {
    let n = series.len();
    if n == 0 {
      return Err(QuboError::InvalidParameter(
        "at least one return series is required".to_string(),
      ));
    }

    let aligned = align_series(series);
    let t = aligned[0].len();
    if t < 2 {
      return Err(QuboError::InvalidParameter(format!(
        "need at least 2 aligned observations per series, got {t}"
      )));
    }

    let mut mean_returns = Array1::zeros(n);
    for (i, r) in aligned.iter().enumerate() {
      mean_returns[i] = r.iter().sum::<f64>() / t as f64;
    }

    let mut covariance = Array2::zeros((n, n));
    for i in 0..n {
      for j in i..n {
        let mut acc = 0.0;
        for s in 0..t {
          acc += (aligned[i][s] - mean_returns[i]) * (aligned[j][s] - mean_returns[j]);
        }
        let c = acc / (t - 1) as f64;
        covariance[(i, j)] = c;
        covariance[(j, i)] = c;
      }
    }

    Ok(Self {
      mean_returns,
      covariance,
    })
  }

  /// Number of assets covered.
  pub fn num_assets(&self) -> usize {
    self.mean_returns.len()
  }

  /// Mean-return vector.
  pub fn mean_returns(&self) -> &Array1<f64> {
    &self.mean_returns
  }

  /// Covariance matrix.
  pub fn covariance(&self) -> &Array2<f64> {
    &self.covariance
  }
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use ndarray::arr2;

  use super::*;

  #[test]
  fn pct_change_skips_non_positive_prices() {
    let closes = vec![100.0, 110.0, 0.0, 120.0, 126.0];
    let returns = pct_change_series(&closes);

    assert_eq!(returns.len(), 2);
    assert!((returns[0] - 0.1).abs() < 1e-12);
    assert!((returns[1] - 0.05).abs() < 1e-12);
  }

  #[test]
  fn align_truncates_to_common_tail() {
    let series = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
    let aligned = align_series(&series);

    assert_eq!(aligned[0], vec![2.0, 3.0]);
    assert_eq!(aligned[1], vec![4.0, 5.0]);
  }

  #[test]
  fn statistics_match_hand_computation() {
    let series = vec![vec![0.01, 0.03], vec![0.02, 0.06]];
    let stats = ReturnStatistics::from_return_series(&series).unwrap();

    assert_eq!(stats.num_assets(), 2);
    assert!((stats.mean_returns()[0] - 0.02).abs() < 1e-12);
    assert!((stats.mean_returns()[1] - 0.04).abs() < 1e-12);
    // Deviations (-0.01, 0.01) and (-0.02, 0.02) over t - 1 = 1.
    assert!((stats.covariance()[(0, 0)] - 0.0002).abs() < 1e-12);
    assert!((stats.covariance()[(1, 1)] - 0.0008).abs() < 1e-12);
    assert!((stats.covariance()[(0, 1)] - 0.0004).abs() < 1e-12);
    assert!((stats.covariance()[(1, 0)] - 0.0004).abs() < 1e-12);
  }

  #[test]
  fn from_parts_rejects_shape_mismatch() {
    let mu = arr1(&[0.01, 0.02, 0.03]);
    let cov = arr2(&[[0.04, 0.01], [0.01, 0.09]]);

    let result = ReturnStatistics::from_parts(mu, cov);
    assert!(matches!(result, Err(QuboError::DimensionMismatch { .. })));
  }

  #[test]
  fn single_observation_is_rejected() {
    let series = vec![vec![0.01], vec![0.02]];
    let result = ReturnStatistics::from_return_series(&series);
    assert!(matches!(result, Err(QuboError::InvalidParameter(_))));
  }
}
