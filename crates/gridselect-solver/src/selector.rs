//! Orchestration of one selection solve.
//!
//! Logging levels:
//! - **INFO**: Solve start/end with problem scale and outcome
//! - **DEBUG**: Formulation and backend results
//! - **WARN**: Non-optimal statuses and timeouts

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use gridselect_config::SelectionConfig;
use gridselect_core::{Grid, RelaxationBackend, Result, SolutionSummary, SolverStatus};
use tracing::{debug, info, warn};

use crate::assemble::assemble;
use crate::backend::ReducedLpBackend;
use crate::formulate::formulate;
use crate::runner::run_backend;
use crate::validate::validate;

/// Selects grid cells under a budget through a semidefinite relaxation.
///
/// Holds only immutable configuration and a shared backend, so one selector
/// can serve concurrent callers.
///
/// # Example
///
/// ```
/// use gridselect_core::{Grid, SolverStatus};
/// use gridselect_solver::RelaxationSelector;
///
/// let benefits = Grid::from_rows(vec![vec![0.9, 0.2]]).unwrap();
/// let costs = Grid::from_rows(vec![vec![50.0, 50.0]]).unwrap();
///
/// let selector = RelaxationSelector::with_defaults();
/// let summary = selector.solve(&benefits, &costs, 50.0).unwrap();
///
/// assert_eq!(summary.status(), SolverStatus::Optimal);
/// let outcome = summary.outcome().unwrap();
/// assert_eq!(outcome.decisions.as_slice(), &[1, 0]);
/// assert_eq!(outcome.selected_count, 1);
/// ```
#[derive(Clone)]
pub struct RelaxationSelector {
    config: SelectionConfig,
    backend: Arc<dyn RelaxationBackend>,
}

impl fmt::Debug for RelaxationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaxationSelector")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl RelaxationSelector {
    /// Creates a selector after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`gridselect_core::SelectionError::InvalidConfig`] when a
    /// config value is out of range.
    pub fn new(config: SelectionConfig, backend: Arc<dyn RelaxationBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Default configuration with the reduced-LP backend.
    pub fn with_defaults() -> Self {
        let config = SelectionConfig::default();
        let backend = ReducedLpBackend::new().with_tolerance(config.backend.tolerance);
        Self {
            config,
            backend: Arc::new(backend),
        }
    }

    /// Validated `config` with the reduced-LP backend at its tolerance.
    pub fn from_config(config: SelectionConfig) -> Result<Self> {
        let backend = ReducedLpBackend::new().with_tolerance(config.backend.tolerance);
        Self::new(config, Arc::new(backend))
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Solves one selection problem.
    ///
    /// Backend statuses other than optimal are returned inside the summary,
    /// not as errors.
    ///
    /// # Errors
    ///
    /// Input validation errors, before the backend is called, and
    /// [`gridselect_core::SelectionError::GramShapeMismatch`] when the
    /// backend returns a matrix of the wrong size.
    pub fn solve(
        &self,
        benefits: &Grid<f64>,
        costs: &Grid<f64>,
        budget: f64,
    ) -> Result<SolutionSummary> {
        validate(benefits, costs, budget)?;

        let start = Instant::now();
        let (rows, cols) = benefits.shape();
        info!(
            event = "solve_start",
            rows,
            cols,
            cells = benefits.len(),
            budget,
            backend = self.backend.name(),
        );

        let program = formulate(benefits.as_slice(), costs.as_slice(), budget);
        debug!(
            event = "formulated",
            dimension = program.dimension(),
            constraints = program.constraints().len(),
        );

        let limit = self.config.time_limit();
        let output = run_backend(&self.backend, program, limit);
        debug!(
            event = "backend_end",
            status = %output.status,
            objective = ?output.objective,
            has_matrix = output.gram.is_some(),
        );

        match output.status {
            SolverStatus::Optimal => {}
            SolverStatus::TimedOut => warn!(
                event = "timeout",
                limit_ms = limit.map(|l| l.as_millis() as u64),
                "backend exceeded the time limit"
            ),
            status => warn!(
                event = "non_optimal",
                %status,
                message = output.message.as_deref().unwrap_or(""),
                "backend did not reach optimality"
            ),
        }

        let summary = assemble(output, benefits, costs, budget, &self.config)?;

        let outcome = summary.outcome().ok();
        info!(
            event = "solve_end",
            status = %summary.status(),
            selected = outcome.map(|o| o.selected_count),
            total_benefit = outcome.map(|o| o.total_benefit),
            total_cost = outcome.map(|o| o.total_cost),
            non_binary = outcome.map(|o| o.non_binary.len()),
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(summary)
    }
}
