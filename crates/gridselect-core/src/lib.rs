//! gridselect Core - core types and traits for relaxation-based selection
//!
//! This crate provides the fundamental abstractions for gridselect:
//! - `Grid` for benefit, cost, score and decision matrices
//! - `RelaxationProgram` builder for the convex program
//! - `RelaxationBackend` trait implemented by numerical backends
//! - Result records and error types

pub mod backend;
pub mod error;
pub mod grid;
pub mod program;
pub mod status;
pub mod summary;

pub use backend::{BackendOutput, RelaxationBackend};
pub use error::{Result, SelectionError};
pub use grid::Grid;
pub use program::{AffineForm, Constraint, EntryTerm, ObjectiveSense, Relation, RelaxationProgram};
pub use status::SolverStatus;
pub use summary::{NonBinaryPosition, SelectionOutcome, SolutionSummary};
