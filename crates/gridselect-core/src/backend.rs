use crate::grid::Grid;
use crate::program::RelaxationProgram;
use crate::status::SolverStatus;

/// What a backend hands back for one program.
///
/// `gram` may be absent for any status other than optimal; callers must
/// branch on it rather than assume a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendOutput {
    pub status: SolverStatus,
    pub objective: Option<f64>,
    pub gram: Option<Grid<f64>>,
    /// Backend-specific detail for non-optimal outcomes.
    pub message: Option<String>,
}

impl BackendOutput {
    /// An optimal outcome with its matrix.
    pub fn optimal(gram: Grid<f64>, objective: f64) -> Self {
        Self {
            status: SolverStatus::Optimal,
            objective: Some(objective),
            gram: Some(gram),
            message: None,
        }
    }

    /// An outcome without a matrix.
    pub fn without_solution(status: SolverStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective: None,
            gram: None,
            message: Some(message.into()),
        }
    }
}

/// Common interface for relaxation backends.
pub trait RelaxationBackend: Send + Sync {
    /// Solve one relaxation program.
    ///
    /// Every failure is reported through [`BackendOutput::status`]; this
    /// method does not panic on unsupported or infeasible programs.
    fn solve(&self, program: &RelaxationProgram) -> BackendOutput;

    /// Get the backend name for logging/debugging
    fn name(&self) -> &str;
}
