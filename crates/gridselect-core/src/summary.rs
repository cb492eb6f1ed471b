//! Result records returned by a solve.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};
use crate::grid::Grid;
use crate::status::SolverStatus;

/// A cell whose relaxed score did not settle near 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBinaryPosition {
    pub row: usize,
    pub col: usize,
    pub score: f64,
    pub benefit: f64,
    pub cost: f64,
}

/// Everything derived from a relaxation matrix.
///
/// `total_benefit` and `total_cost` weight each cell by its fractional
/// score. `rounded_benefit` and `rounded_cost` weight by the binary
/// decision instead, so only they describe what the rounded selection
/// actually spends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub selected_count: usize,
    pub total_benefit: f64,
    pub total_cost: f64,
    /// `total_cost / budget * 100`.
    pub budget_utilization: f64,
    pub rounded_benefit: f64,
    pub rounded_cost: f64,
    /// `X[0, 1..=N]` before normalization, row-major.
    pub raw_scores: Vec<f64>,
    pub scores: Grid<f64>,
    pub decisions: Grid<u8>,
    pub non_binary: Vec<NonBinaryPosition>,
}

impl SelectionOutcome {
    /// Whether the rounded decision stays within `budget + tolerance`.
    pub fn rounded_within_budget(&self, budget: f64, tolerance: f64) -> bool {
        self.rounded_cost <= budget + tolerance
    }

    /// Whether the relaxation came back integral everywhere.
    pub fn is_integral(&self) -> bool {
        self.non_binary.is_empty()
    }

    /// Iterates the `(row, col)` of every selected cell.
    pub fn selected_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.decisions
            .indexed()
            .filter(|(_, _, d)| **d == 1)
            .map(|(r, c, _)| (r, c))
    }
}

/// Immutable result of one solve.
///
/// # Example
///
/// ```
/// use gridselect_core::{SelectionError, SolutionSummary, SolverStatus};
///
/// let summary = SolutionSummary::new(SolverStatus::Infeasible, None, 10.0, None);
/// assert_eq!(summary.status(), SolverStatus::Infeasible);
/// assert_eq!(
///     summary.outcome().unwrap_err(),
///     SelectionError::NoSolutionAvailable { status: SolverStatus::Infeasible }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSummary {
    status: SolverStatus,
    objective_value: Option<f64>,
    budget: f64,
    outcome: Option<SelectionOutcome>,
}

impl SolutionSummary {
    pub fn new(
        status: SolverStatus,
        objective_value: Option<f64>,
        budget: f64,
        outcome: Option<SelectionOutcome>,
    ) -> Self {
        Self {
            status,
            objective_value,
            budget,
            outcome,
        }
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Returns the derived selection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoSolutionAvailable`] when the backend
    /// produced no matrix.
    pub fn outcome(&self) -> Result<&SelectionOutcome> {
        self.outcome
            .as_ref()
            .ok_or(SelectionError::NoSolutionAvailable {
                status: self.status,
            })
    }

    pub fn into_outcome(self) -> Result<SelectionOutcome> {
        let status = self.status;
        self.outcome
            .ok_or(SelectionError::NoSolutionAvailable { status })
    }
}
