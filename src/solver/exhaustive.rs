//! # Exhaustive Solver
//!
//! Exact minimizer by enumeration of all `C(n, k)` feasible subsets.

use itertools::Itertools;

use super::BinaryQuadraticSolver;
use super::check_problem;
use crate::error::QuboError;
use crate::error::Result;
use crate::qubo::CardinalityConstraint;
use crate::qubo::QuboModel;
use crate::types::SelectionResult;

/// Brute-force solver; exact but exponential, guarded by a subset budget.
#[derive(Clone, Debug)]
pub struct ExhaustiveSolver {
  /// Maximum number of feasible subsets the solver will enumerate.
  pub max_subsets: u64,
}

impl Default for ExhaustiveSolver {
  fn default() -> Self {
    Self {
      max_subsets: 1 << 24,
    }
  }
}

fn subset_count(n: usize, k: usize) -> u128 {
  let k = k.min(n - k);
  let mut acc: u128 = 1;
  for i in 0..k {
    match acc.checked_mul((n - i) as u128) {
      Some(v) => acc = v / (i as u128 + 1),
      None => return u128::MAX,
    }
  }
  acc
}

impl BinaryQuadraticSolver for ExhaustiveSolver {
  fn solve(
    &self,
    model: &QuboModel,
    constraint: &CardinalityConstraint,
  ) -> Result<SelectionResult> {
    check_problem(model, constraint)?;

    let n = model.num_variables();
    let k = constraint.target();
    let count = subset_count(n, k);
    if count > u128::from(self.max_subsets) {
      return Err(QuboError::InvalidParameter(format!(
        "{count} feasible subsets exceed the enumeration budget of {}",
        self.max_subsets
      )));
    }

    let mut best: Option<SelectionResult> = None;
    for subset in (0..n).combinations(k) {
      let mut selection = vec![false; n];
      for &i in &subset {
        selection[i] = true;
      }
      let objective = model.evaluate(&selection)?;

      if best.as_ref().map_or(true, |b| objective < b.objective) {
        best = Some(SelectionResult {
          selection,
          objective,
        });
      }
    }

    // k is in [1, n], so at least one subset was enumerated.
    best.ok_or_else(|| QuboError::InvalidParameter("no feasible subset enumerated".to_string()))
  }
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use ndarray::arr2;

  use super::*;

  fn three_asset_problem() -> (QuboModel, CardinalityConstraint) {
    // Asset 1 carries the best return; assets 0 and 2 are nearly
    // uncorrelated, asset pair (1, 2) is strongly coupled.
    let mu = arr1(&[0.02, 0.10, 0.03]);
    let cov = arr2(&[[0.01, 0.0, 0.002], [0.0, 0.04, 0.03], [0.002, 0.03, 0.02]]);
    let model = QuboModel::from_moments(&mu, &cov, 1.0).unwrap();
    let constraint = CardinalityConstraint::new(2, 3).unwrap();
    (model, constraint)
  }

  #[test]
  fn finds_the_exact_minimizer() {
    let (model, constraint) = three_asset_problem();
    let result = ExhaustiveSolver::default().solve(&model, &constraint).unwrap();

    // {0,1}: 0.01-0.02 + 0.04-0.10 + 0 = -0.07
    // {0,2}: 0.01-0.02 + 0.02-0.03 + 0.004 = -0.016
    // {1,2}: 0.04-0.10 + 0.02-0.03 + 0.06 = -0.01
    assert_eq!(result.selection, vec![true, true, false]);
    assert!((result.objective - (-0.07)).abs() < 1e-12);
    assert!(constraint.is_satisfied(&result.selection));
  }

  #[test]
  fn subset_budget_is_enforced() {
    let (model, constraint) = three_asset_problem();
    let solver = ExhaustiveSolver { max_subsets: 2 };

    let result = solver.solve(&model, &constraint);
    assert!(matches!(result, Err(QuboError::InvalidParameter(_))));
  }

  #[test]
  fn subset_count_matches_binomials() {
    assert_eq!(subset_count(3, 2), 3);
    assert_eq!(subset_count(5, 1), 5);
    assert_eq!(subset_count(10, 5), 252);
    assert_eq!(subset_count(4, 4), 1);
  }
}
