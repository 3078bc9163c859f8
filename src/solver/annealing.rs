//! # Annealing Solver
//!
//! $$
//! P(\text{accept}) = \min\!\left(1, e^{-\Delta E/T}\right)
//! $$
//!
//! Simulated annealing restricted to exact-cardinality selections: each
//! proposal swaps one selected asset with one unselected asset, so every
//! visited state satisfies the constraint by construction.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::BinaryQuadraticSolver;
use super::check_problem;
use crate::error::QuboError;
use crate::error::Result;
use crate::qubo::CardinalityConstraint;
use crate::qubo::QuboModel;
use crate::types::SelectionResult;

/// Runtime configuration for [`AnnealingSolver`].
#[derive(Clone, Debug)]
pub struct AnnealingConfig {
  /// Starting temperature of the geometric cooling schedule.
  pub initial_temperature: f64,
  /// Temperature reached on the final sweep.
  pub final_temperature: f64,
  /// Number of sweeps; each sweep proposes `n` swaps.
  pub sweeps: usize,
  /// Independent restarts; the best selection across restarts wins.
  pub restarts: usize,
  /// Seed for reproducible runs; `None` draws from the OS.
  pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
  fn default() -> Self {
    Self {
      initial_temperature: 10.0,
      final_temperature: 1e-3,
      sweeps: 1_000,
      restarts: 4,
      seed: None,
    }
  }
}

/// Metropolis annealer over exact-cardinality selections.
#[derive(Clone, Debug, Default)]
pub struct AnnealingSolver {
  config: AnnealingConfig,
}

impl AnnealingSolver {
  /// Construct a solver with explicit configuration.
  pub fn new(config: AnnealingConfig) -> Self {
    Self { config }
  }

  /// Borrow solver configuration.
  pub fn config(&self) -> &AnnealingConfig {
    &self.config
  }

  fn validate_config(&self) -> Result<()> {
    let cfg = &self.config;
    if !cfg.final_temperature.is_finite() || cfg.final_temperature <= 0.0 {
      return Err(QuboError::InvalidParameter(format!(
        "final temperature must be positive and finite, got {}",
        cfg.final_temperature
      )));
    }
    if !cfg.initial_temperature.is_finite() || cfg.initial_temperature < cfg.final_temperature {
      return Err(QuboError::InvalidParameter(format!(
        "initial temperature must be finite and >= final temperature, got {}",
        cfg.initial_temperature
      )));
    }
    if cfg.sweeps == 0 || cfg.restarts == 0 {
      return Err(QuboError::InvalidParameter(
        "sweeps and restarts must both be at least 1".to_string(),
      ));
    }
    Ok(())
  }

  fn anneal_once(
    &self,
    model: &QuboModel,
    k: usize,
    rng: &mut StdRng,
  ) -> Result<SelectionResult> {
    let n = model.num_variables();
    let cfg = &self.config;

    // Random initial exact-k subset via partial Fisher-Yates.
    let mut order: Vec<usize> = (0..n).collect();
    for i in 0..k {
      let j = rng.gen_range(i..n);
      order.swap(i, j);
    }
    let mut selected: Vec<usize> = order[..k].to_vec();
    let mut unselected: Vec<usize> = order[k..].to_vec();

    let mut selection = vec![false; n];
    for &i in &selected {
      selection[i] = true;
    }

    let mut current = model.evaluate(&selection)?;
    let mut best = current;
    let mut best_selection = selection.clone();

    let cooling = if cfg.sweeps > 1 {
      (cfg.final_temperature / cfg.initial_temperature).powf(1.0 / (cfg.sweeps as f64 - 1.0))
    } else {
      1.0
    };
    let mut temperature = cfg.initial_temperature;

    for _ in 0..cfg.sweeps {
      for _ in 0..n {
        if unselected.is_empty() {
          // k == n: a single feasible state exists.
          break;
        }

        let si = rng.gen_range(0..selected.len());
        let ui = rng.gen_range(0..unselected.len());
        let removed = selected[si];
        let added = unselected[ui];

        let delta = swap_delta(model, &selection, removed, added);
        let accept = delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp();
        if !accept {
          continue;
        }

        selection[removed] = false;
        selection[added] = true;
        selected[si] = added;
        unselected[ui] = removed;
        current += delta;

        if current < best {
          best = current;
          best_selection.copy_from_slice(&selection);
        }
      }
      temperature = (temperature * cooling).max(cfg.final_temperature);
    }

    // Incremental deltas drift; recompute the exact objective.
    let objective = model.evaluate(&best_selection)?;
    Ok(SelectionResult {
      selection: best_selection,
      objective,
    })
  }
}

/// Objective change from deselecting `removed` and selecting `added`.
fn swap_delta(model: &QuboModel, selection: &[bool], removed: usize, added: usize) -> f64 {
  let mut delta = model.linear(added) - model.linear(removed);
  for (j, &active) in selection.iter().enumerate() {
    if !active || j == removed {
      continue;
    }
    delta += model.quadratic(added, j) - model.quadratic(removed, j);
  }
  delta
}

impl BinaryQuadraticSolver for AnnealingSolver {
  fn solve(
    &self,
    model: &QuboModel,
    constraint: &CardinalityConstraint,
  ) -> Result<SelectionResult> {
    check_problem(model, constraint)?;
    self.validate_config()?;

    let mut rng = match self.config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    let mut best: Option<SelectionResult> = None;
    for restart in 0..self.config.restarts {
      let result = self.anneal_once(model, constraint.target(), &mut rng)?;
      debug!(restart, objective = result.objective, "annealing restart finished");

      if best.as_ref().map_or(true, |b| result.objective < b.objective) {
        best = Some(result);
      }
    }

    best.ok_or_else(|| QuboError::InvalidParameter("no annealing restart produced a selection".to_string()))
  }
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use ndarray::Array2;

  use super::*;

  fn seeded_config(seed: u64) -> AnnealingConfig {
    AnnealingConfig {
      initial_temperature: 1.0,
      final_temperature: 1e-3,
      sweeps: 500,
      restarts: 2,
      seed: Some(seed),
    }
  }

  fn dominant_pair_problem() -> (QuboModel, CardinalityConstraint) {
    // Assets 0 and 1 dominate on return; covariance is diagonal, so the
    // optimum {0, 1} is separated from every other pair by at least 0.49.
    let mu = arr1(&[0.5, 0.5, 0.0, 0.0]);
    let cov = Array2::from_diag(&arr1(&[0.01, 0.01, 0.01, 0.01]));
    let model = QuboModel::from_moments(&mu, &cov, 1.0).unwrap();
    let constraint = CardinalityConstraint::new(2, 4).unwrap();
    (model, constraint)
  }

  #[test]
  fn seeded_run_finds_the_dominant_pair() {
    let (model, constraint) = dominant_pair_problem();
    let solver = AnnealingSolver::new(seeded_config(7));

    let result = solver.solve(&model, &constraint).unwrap();
    assert!(constraint.is_satisfied(&result.selection));
    assert_eq!(result.selection, vec![true, true, false, false]);
    assert!((result.objective - (-0.98)).abs() < 1e-9);
  }

  #[test]
  fn swap_delta_matches_full_reevaluation() {
    let (model, _) = dominant_pair_problem();
    let selection = [true, false, true, false];

    let delta = swap_delta(&model, &selection, 2, 1);
    let before = model.evaluate(&selection).unwrap();
    let after = model.evaluate(&[true, true, false, false]).unwrap();
    assert!((delta - (after - before)).abs() < 1e-12);
  }

  #[test]
  fn full_cardinality_returns_the_only_feasible_state() {
    let mu = arr1(&[0.01, 0.02]);
    let cov = Array2::from_diag(&arr1(&[0.04, 0.09]));
    let model = QuboModel::from_moments(&mu, &cov, 1.0).unwrap();
    let constraint = CardinalityConstraint::new(2, 2).unwrap();

    let result = AnnealingSolver::new(seeded_config(1)).solve(&model, &constraint).unwrap();
    assert_eq!(result.selection, vec![true, true]);
  }

  #[test]
  fn degenerate_temperatures_are_rejected() {
    let (model, constraint) = dominant_pair_problem();
    let solver = AnnealingSolver::new(AnnealingConfig {
      initial_temperature: 0.5,
      final_temperature: 1.0,
      ..AnnealingConfig::default()
    });

    let result = solver.solve(&model, &constraint);
    assert!(matches!(result, Err(QuboError::InvalidParameter(_))));
  }
}
