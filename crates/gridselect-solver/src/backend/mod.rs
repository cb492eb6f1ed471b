//! Relaxation backends shipped with the engine.

mod reduced_lp;

pub use reduced_lp::{lift, ReducedLpBackend};
