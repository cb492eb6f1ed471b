//! gridselect selection engine
//!
//! This crate turns benefit and cost grids into a semidefinite relaxation,
//! hands it to a [`RelaxationBackend`](gridselect_core::RelaxationBackend)
//! and derives a rounded selection from the returned matrix:
//! - Input validation
//! - Problem formulation
//! - The reduced-LP backend
//! - Score extraction, rounding and diagnostics
//! - Time-limited backend runs

pub mod assemble;
pub mod backend;
pub mod extract;
pub mod formulate;
pub mod rounding;
pub mod runner;
pub mod selector;
pub mod validate;

pub use assemble::{assemble, derive_outcome};
pub use backend::{lift, ReducedLpBackend};
pub use extract::{extract_scores, truncate, ExtractedScores};
pub use formulate::{formulate, BUDGET_CONSTRAINT};
pub use rounding::{decide, non_binary_positions, round_scores};
pub use runner::run_backend;
pub use selector::RelaxationSelector;
pub use validate::validate;
