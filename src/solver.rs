//! # Binary Quadratic Solvers
//!
//! $$
//! x^\* = \arg\min_{x\in\{0,1\}^n,\ \sum_i x_i=k} Q(x)
//! $$
//!
//! Pluggable solver seam: an exact enumerator, a simulated annealer, or an
//! external (classical or quantum) optimizer all consume the same model and
//! constraint.

pub mod annealing;
pub mod exhaustive;

pub use annealing::AnnealingConfig;
pub use annealing::AnnealingSolver;
pub use exhaustive::ExhaustiveSolver;

use crate::error::QuboError;
use crate::error::Result;
use crate::qubo::CardinalityConstraint;
use crate::qubo::QuboModel;
use crate::types::SelectionResult;

/// Contract for anything able to minimize a QUBO under a cardinality
/// constraint.
pub trait BinaryQuadraticSolver {
  /// Minimize `model` subject to `constraint`, returning the best selection
  /// found together with its objective value.
  fn solve(
    &self,
    model: &QuboModel,
    constraint: &CardinalityConstraint,
  ) -> Result<SelectionResult>;
}

pub(crate) fn check_problem(model: &QuboModel, constraint: &CardinalityConstraint) -> Result<()> {
  if model.num_variables() != constraint.num_variables() {
    return Err(QuboError::DimensionMismatch {
      expected: format!("{} decision variables", model.num_variables()),
      got: format!("{}", constraint.num_variables()),
    });
  }
  Ok(())
}
