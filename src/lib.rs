//! # quboselect
//!
//! $$
//! \min_{x\in\{0,1\}^n}\ \lambda\,x^\top\Sigma x-\mu^\top x
//! \quad\text{s.t.}\quad \textstyle\sum_i x_i=k
//! $$
//!
//! Binary portfolio selection under a mean-variance objective: builds the
//! QUBO for a set of asset return statistics and solves it through a
//! pluggable binary quadratic solver.

pub mod engine;
pub mod error;
pub mod qubo;
pub mod solver;
pub mod stats;
pub mod types;
pub mod universe;

pub use engine::SelectionConfig;
pub use engine::SelectionEngine;
pub use error::QuboError;
pub use error::Result;
pub use qubo::CardinalityConstraint;
pub use qubo::QuboModel;
pub use solver::AnnealingConfig;
pub use solver::AnnealingSolver;
pub use solver::BinaryQuadraticSolver;
pub use solver::ExhaustiveSolver;
pub use stats::ReturnStatistics;
pub use types::SelectionReport;
pub use types::SelectionResult;
pub use types::SolverMethod;
