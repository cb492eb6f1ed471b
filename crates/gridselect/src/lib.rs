//! gridselect - Budgeted grid cell selection
//!
//! Chooses cells of a benefit grid to maximize total benefit while keeping
//! total cost within a budget, by solving a semidefinite relaxation of the
//! 0/1 problem and rounding its scores.
//!
//! # Example
//!
//! ```rust
//! use gridselect::prelude::*;
//!
//! let benefits = Grid::from_rows(vec![vec![0.9, 0.2]]).unwrap();
//! let costs = Grid::from_rows(vec![vec![50.0, 50.0]]).unwrap();
//!
//! let summary = gridselect::solve(&benefits, &costs, 50.0).unwrap();
//! assert_eq!(summary.status(), SolverStatus::Optimal);
//!
//! let outcome = summary.outcome().unwrap();
//! assert_eq!(outcome.selected_count, 1);
//! assert!((outcome.total_cost - 50.0).abs() < 1e-6);
//! ```

// Data model
pub use gridselect_core::{
    Grid, NonBinaryPosition, Result, SelectionError, SelectionOutcome, SolutionSummary,
    SolverStatus,
};

// Relaxation programs and backends
pub use gridselect_core::{
    AffineForm, BackendOutput, Constraint, EntryTerm, ObjectiveSense, Relation,
    RelaxationBackend, RelaxationProgram,
};

// Configuration
pub use gridselect_config::{ConfigError, SelectionConfig, TieBreak};

// Engine
pub use gridselect_solver::{ReducedLpBackend, RelaxationSelector};

#[cfg(feature = "console")]
pub mod console;

/// Solves one selection problem with the default configuration and the
/// reduced-LP backend.
///
/// # Errors
///
/// Returns [`SelectionError::ShapeMismatch`], [`SelectionError::InvalidBudget`]
/// or a cell-value error before any solving happens. Backend failures are
/// reported through [`SolutionSummary::status`].
pub fn solve(benefits: &Grid<f64>, costs: &Grid<f64>, budget: f64) -> Result<SolutionSummary> {
    #[cfg(feature = "console")]
    console::init();

    RelaxationSelector::with_defaults().solve(benefits, costs, budget)
}

pub mod prelude {
    pub use super::{Grid, SelectionError, SelectionOutcome, SolutionSummary, SolverStatus};
    pub use super::{RelaxationBackend, RelaxationSelector, SelectionConfig, TieBreak};
}
