//! # Selection Engine
//!
//! $$
//! x^\* = \operatorname{Solve}\!\left(\operatorname{Qubo}(\mu,\Sigma,\lambda),\ \textstyle\sum_i x_i=k\right)
//! $$
//!
//! High-level orchestration: build the QUBO, attach the cardinality
//! constraint, route to the configured solver and report the selection.

use tracing::info;

use crate::error::QuboError;
use crate::error::Result;
use crate::qubo::CardinalityConstraint;
use crate::qubo::QuboModel;
use crate::solver::AnnealingConfig;
use crate::solver::AnnealingSolver;
use crate::solver::BinaryQuadraticSolver;
use crate::solver::ExhaustiveSolver;
use crate::stats::ReturnStatistics;
use crate::types::SelectionReport;
use crate::types::SelectionResult;
use crate::types::SolverMethod;
use crate::universe::AssetUniverse;

/// Runtime configuration for [`SelectionEngine`].
#[derive(Clone, Debug)]
pub struct SelectionConfig {
  /// Risk-aversion weight applied to the covariance term.
  pub lambda_risk: f64,
  /// Exact number of assets to select.
  pub cardinality: usize,
  /// Solver backend used by [`SelectionEngine::select`].
  pub solver: SolverMethod,
  /// Annealing parameters, used when `solver` is [`SolverMethod::Annealing`].
  pub annealing: AnnealingConfig,
}

impl Default for SelectionConfig {
  fn default() -> Self {
    Self {
      lambda_risk: 0.5,
      cardinality: 1,
      solver: SolverMethod::Exhaustive,
      annealing: AnnealingConfig::default(),
    }
  }
}

/// Single entry-point engine for QUBO portfolio selection.
#[derive(Clone, Debug)]
pub struct SelectionEngine {
  config: SelectionConfig,
}

impl SelectionEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: SelectionConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &SelectionConfig {
    &self.config
  }

  /// Select `cardinality` assets from `universe` under the mean-variance
  /// objective.
  pub fn select(
    &self,
    universe: &AssetUniverse,
    stats: &ReturnStatistics,
  ) -> Result<SelectionReport> {
    if universe.len() != stats.num_assets() {
      return Err(QuboError::DimensionMismatch {
        expected: format!("statistics for {} assets", universe.len()),
        got: format!("statistics for {} assets", stats.num_assets()),
      });
    }

    let model = QuboModel::build(stats, self.config.lambda_risk)?;
    let constraint = CardinalityConstraint::new(self.config.cardinality, universe.len())?;

    info!(
      assets = universe.len(),
      cardinality = constraint.target(),
      solver = ?self.config.solver,
      "routing selection problem"
    );

    let result = match self.config.solver {
      SolverMethod::Exhaustive => ExhaustiveSolver::default().solve(&model, &constraint)?,
      SolverMethod::Annealing => {
        AnnealingSolver::new(self.config.annealing.clone()).solve(&model, &constraint)?
      }
    };

    let report = build_report(universe, stats, result);
    info!(
      objective = report.objective,
      selected = report.selected_tickers.len(),
      "selection finished"
    );
    Ok(report)
  }
}

fn build_report(
  universe: &AssetUniverse,
  stats: &ReturnStatistics,
  result: SelectionResult,
) -> SelectionReport {
  let mu = stats.mean_returns();
  let cov = stats.covariance();

  let mut selected_tickers = Vec::new();
  let mut expected_return = 0.0;
  let mut variance = 0.0;

  for (i, &active) in result.selection.iter().enumerate() {
    if !active {
      continue;
    }
    expected_return += mu[i];
    if let Some(ticker) = universe.ticker(i) {
      selected_tickers.push(ticker.to_string());
    }
    for (j, &active_j) in result.selection.iter().enumerate() {
      if active_j {
        variance += cov[(i, j)];
      }
    }
  }

  SelectionReport {
    selected_tickers,
    selection: result.selection,
    objective: result.objective,
    expected_return,
    variance,
  }
}
