//! # QUBO Builder
//!
//! $$
//! Q(x)=\lambda\sum_{i,j}\Sigma_{ij}x_ix_j-\sum_i\mu_ix_i
//! $$
//!
//! Deterministic translation of mean-variance statistics into a binary
//! quadratic objective with an exact-cardinality side constraint.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::QuboError;
use crate::error::Result;
use crate::stats::ReturnStatistics;

/// Binary quadratic objective over `n` decision variables.
///
/// Coefficients are stored once per unordered index pair: `n` diagonal
/// (linear) terms plus `n(n-1)/2` upper-triangle (pairwise) terms, zeros
/// included, for exactly `n(n+1)/2` entries. The off-diagonal coefficient
/// for `{i,j}` already folds both ordered covariance contributions into a
/// single `2λΣ_ij` value; consumers apply each unordered pair exactly once.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct QuboModel {
  num_variables: usize,
  diagonal: Vec<f64>,
  upper: Vec<f64>,
}

impl QuboModel {
  /// Build the mean-variance QUBO from validated return statistics.
  pub fn build(stats: &ReturnStatistics, lambda_risk: f64) -> Result<Self> {
    Self::from_moments(stats.mean_returns(), stats.covariance(), lambda_risk)
  }

  /// Build the mean-variance QUBO from raw moment inputs.
  ///
  /// Diagonal entry `i` is `λΣ_ii - μ_i`; the unordered pair `{i,j}` gets
  /// `2λΣ_ij`. Pure function of its inputs; all outputs are finite when the
  /// inputs are.
  pub fn from_moments(
    mean_returns: &Array1<f64>,
    covariance: &Array2<f64>,
    lambda_risk: f64,
  ) -> Result<Self> {
    let n = mean_returns.len();
    if n < 1 {
      return Err(QuboError::InvalidParameter(
        "at least one asset is required".to_string(),
      ));
    }
    if !lambda_risk.is_finite() || lambda_risk <= 0.0 {
      return Err(QuboError::InvalidParameter(format!(
        "risk-aversion weight must be positive and finite, got {lambda_risk}"
      )));
    }
    if covariance.nrows() != n || covariance.ncols() != n {
      return Err(QuboError::DimensionMismatch {
        expected: format!("{n}x{n} covariance"),
        got: format!("{}x{}", covariance.nrows(), covariance.ncols()),
      });
    }

    let mut diagonal = Vec::with_capacity(n);
    for i in 0..n {
      diagonal.push(lambda_risk * covariance[(i, i)] - mean_returns[i]);
    }

    let mut upper = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
      for j in (i + 1)..n {
        upper.push(2.0 * lambda_risk * covariance[(i, j)]);
      }
    }

    Ok(Self {
      num_variables: n,
      diagonal,
      upper,
    })
  }

  /// Number of decision variables.
  pub fn num_variables(&self) -> usize {
    self.num_variables
  }

  /// Number of stored coefficients, `n(n+1)/2`.
  pub fn num_coefficients(&self) -> usize {
    self.num_variables * (self.num_variables + 1) / 2
  }

  /// Linear coefficient of variable `i`. Panics if `i` is out of range.
  pub fn linear(&self, i: usize) -> f64 {
    self.diagonal[i]
  }

  /// Coefficient of the unordered pair `{i,j}`; `i == j` answers the linear
  /// term. Panics if either index is out of range.
  pub fn quadratic(&self, i: usize, j: usize) -> f64 {
    if i == j {
      return self.diagonal[i];
    }
    let (a, b) = if i < j { (i, j) } else { (j, i) };
    self.upper[self.pair_index(a, b)]
  }

  /// Objective value of a binary assignment.
  pub fn evaluate(&self, selection: &[bool]) -> Result<f64> {
    let n = self.num_variables;
    if selection.len() != n {
      return Err(QuboError::DimensionMismatch {
        expected: format!("{n} decision variables"),
        got: format!("{}", selection.len()),
      });
    }

    let mut value = 0.0;
    for i in 0..n {
      if !selection[i] {
        continue;
      }
      value += self.diagonal[i];
      for j in (i + 1)..n {
        if selection[j] {
          value += self.upper[self.pair_index(i, j)];
        }
      }
    }
    Ok(value)
  }

  /// Iterate all stored coefficients as `(i, j, value)` with `i <= j`.
  pub fn coefficients(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
    let n = self.num_variables;
    let diagonal = self.diagonal.iter().enumerate().map(|(i, &v)| (i, i, v));
    let pairs =
      (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.quadratic(i, j))));
    diagonal.chain(pairs)
  }

  fn pair_index(&self, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < self.num_variables);
    i * self.num_variables - i * (i + 1) / 2 + j - i - 1
  }
}

/// Equality constraint `Σ_i x_i = k` over `n` binary variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardinalityConstraint {
  num_variables: usize,
  target: usize,
}

impl CardinalityConstraint {
  /// Require exactly `target` of `num_variables` variables to be set.
  pub fn new(target: usize, num_variables: usize) -> Result<Self> {
    if num_variables < 1 {
      return Err(QuboError::InvalidParameter(
        "at least one decision variable is required".to_string(),
      ));
    }
    if target < 1 || target > num_variables {
      return Err(QuboError::InvalidParameter(format!(
        "cardinality target must lie in [1, {num_variables}], got {target}"
      )));
    }
    Ok(Self {
      num_variables,
      target,
    })
  }

  /// Constraint target `k`.
  pub fn target(&self) -> usize {
    self.target
  }

  /// Number of decision variables covered.
  pub fn num_variables(&self) -> usize {
    self.num_variables
  }

  /// Unit coefficient per decision variable.
  pub fn coefficients(&self) -> Vec<f64> {
    vec![1.0; self.num_variables]
  }

  /// True when a binary assignment satisfies the constraint.
  pub fn is_satisfied(&self, selection: &[bool]) -> bool {
    selection.len() == self.num_variables
      && selection.iter().filter(|&&bit| bit).count() == self.target
  }
}
