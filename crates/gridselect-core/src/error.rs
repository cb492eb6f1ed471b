//! Error types for gridselect

use thiserror::Error;

use crate::status::SolverStatus;

/// Main error type for gridselect operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Benefit and cost grids have different shapes
    #[error("Benefits shape {benefits:?} must match costs shape {costs:?}")]
    ShapeMismatch {
        benefits: (usize, usize),
        costs: (usize, usize),
    },

    /// Two grids combined cell by cell have different shapes
    #[error("Grid shapes {left:?} and {right:?} differ")]
    GridShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Budget is zero, negative or not finite
    #[error("Budget must be a positive finite number, got {0}")]
    InvalidBudget(f64),

    /// Grid has no cells to select from
    #[error("Grid has no cells")]
    EmptyGrid,

    /// A benefit or cost entry is NaN or infinite
    #[error("{matrix} value at ({row}, {col}) is not finite")]
    NonFiniteValue {
        matrix: &'static str,
        row: usize,
        col: usize,
    },

    /// A benefit lies outside [0, 1]
    #[error("Benefit {value} at ({row}, {col}) is outside [0, 1]")]
    BenefitOutOfRange { row: usize, col: usize, value: f64 },

    /// A cost is below zero
    #[error("Cost {value} at ({row}, {col}) is negative")]
    NegativeCost { row: usize, col: usize, value: f64 },

    /// Rows passed to a grid constructor differ in length
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Flat data does not fill the requested grid shape
    #[error("Data of length {found} cannot fill a {rows}x{cols} grid")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        found: usize,
    },

    /// Backend returned a matrix of the wrong dimension
    #[error("Relaxation matrix is {found:?}, expected {expected}x{expected}")]
    GramShapeMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Backend finished without a usable relaxation matrix
    #[error("No solution available (solver status: {status})")]
    NoSolutionAvailable { status: SolverStatus },

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for gridselect operations
pub type Result<T> = std::result::Result<T, SelectionError>;
