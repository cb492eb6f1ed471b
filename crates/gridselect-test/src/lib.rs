//! Shared test fixtures for gridselect crates.
//!
//! This crate provides grid helpers, known selection problems and backend
//! test doubles. It depends only on `gridselect-core` so the solver crate
//! can use it as a dev-dependency.
//!
//! - [`grids`] - Grid and Gram matrix construction helpers
//! - [`scenario`] - Small selection problems with known answers
//! - [`backend`] - Scripted, counting and stalling backends
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! gridselect-test = { workspace = true }
//! ```

pub mod backend;
pub mod grids;
pub mod scenario;

pub use backend::{CountingBackend, ScriptedBackend, StallingBackend};
pub use grids::{gram_for_row, grid, row_grid};
pub use scenario::Scenario;
