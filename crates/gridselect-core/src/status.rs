//! Terminal status of a relaxation solve.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status reported by a relaxation backend, or by the runner when the
/// backend did not finish in time.
///
/// Every status is a legitimate outcome. Only [`SolverStatus::Optimal`] and
/// [`SolverStatus::Inaccurate`] normally come with a relaxation matrix.
///
/// # Example
///
/// ```
/// use gridselect_core::SolverStatus;
///
/// assert_eq!(SolverStatus::Optimal.as_str(), "optimal");
/// assert_eq!(SolverStatus::TimedOut.to_string(), "timeout");
/// assert!(!SolverStatus::Inaccurate.is_terminal_failure());
/// assert!(SolverStatus::Infeasible.is_terminal_failure());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverStatus {
    /// Solved to the requested accuracy.
    Optimal,
    /// No point satisfies the constraints.
    Infeasible,
    /// A solution was produced but misses the accuracy target.
    Inaccurate,
    /// The objective can grow without limit.
    Unbounded,
    /// The backend failed or could not handle the program.
    Error,
    /// The caller's time limit expired before the backend returned.
    #[serde(rename = "timeout")]
    TimedOut,
}

impl SolverStatus {
    /// Returns the status as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Inaccurate => "inaccurate",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Error => "error",
            SolverStatus::TimedOut => "timeout",
        }
    }

    /// Returns `true` for the optimal status.
    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }

    /// Returns `true` when no usable matrix can be expected.
    pub fn is_terminal_failure(self) -> bool {
        !matches!(self, SolverStatus::Optimal | SolverStatus::Inaccurate)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
