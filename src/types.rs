//! # Selection Types
//!
//! Shared enums and result containers for binary portfolio selection.

/// Supported binary quadratic solver backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverMethod {
  /// Exact enumeration of all feasible subsets.
  Exhaustive,
  /// Simulated annealing over exact-cardinality subsets.
  Annealing,
}

impl SolverMethod {
  /// Parse a string into a [`SolverMethod`].
  pub fn from_str(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "anneal" | "annealing" | "sa" => Self::Annealing,
      _ => Self::Exhaustive,
    }
  }
}

/// Output of a binary quadratic solver run.
#[derive(Clone, Debug, Default)]
pub struct SelectionResult {
  /// Binary decision vector, one entry per asset position.
  pub selection: Vec<bool>,
  /// Objective value of the returned selection.
  pub objective: f64,
}

/// Engine-level report for a solved selection problem.
#[derive(Clone, Debug, Default)]
pub struct SelectionReport {
  /// Tickers chosen by the solver, in universe order.
  pub selected_tickers: Vec<String>,
  /// Binary decision vector, one entry per asset position.
  pub selection: Vec<bool>,
  /// Objective value of the selection.
  pub objective: f64,
  /// Sum of mean returns over the selected assets.
  pub expected_return: f64,
  /// Sum of covariance entries over all selected pairs.
  pub variance: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn solver_method_parses_aliases() {
    assert_eq!(SolverMethod::from_str("sa"), SolverMethod::Annealing);
    assert_eq!(SolverMethod::from_str("Annealing"), SolverMethod::Annealing);
    assert_eq!(SolverMethod::from_str("exhaustive"), SolverMethod::Exhaustive);
    assert_eq!(SolverMethod::from_str("anything-else"), SolverMethod::Exhaustive);
  }
}
