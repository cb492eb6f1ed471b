//! Semidefinite relaxation of the 0/1 selection problem.
//!
//! Each decision `x_i ∈ {0, 1}` is rewritten as `y_i = 2 x_i - 1 ∈ {-1, +1}`
//! and `y_i` is represented by the inner product `⟨v_0, v_i⟩` of unit
//! vectors. `X` is the Gram matrix of `v_0..v_N`: requiring `X ⪰ 0` with a
//! unit diagonal is exactly the condition for such vectors to exist. The
//! relaxation drops `y_i ∈ {-1, +1}` but keeps that geometry, so
//! `x_i = (1 + X[0, i]) / 2` and both the objective and the budget become
//! linear in the first row of `X`.

use gridselect_core::{AffineForm, Relation, RelaxationProgram};

/// Name of the budget constraint in formulated programs.
pub const BUDGET_CONSTRAINT: &str = "budget";

/// Builds the relaxation for flattened (row-major) benefits and costs.
///
/// The program has dimension `N + 1` where `N = benefits.len()`:
///
/// - maximize `Σ 0.5 (1 + X[0, i]) b_i`
/// - subject to `Σ 0.5 (1 + X[0, i]) w_i <= budget`
/// - `X ⪰ 0`
/// - `X[k, k] = 1` for `k = 0..=N`
///
/// Inputs are assumed validated; `benefits` and `costs` have equal length.
pub fn formulate(benefits: &[f64], costs: &[f64], budget: f64) -> RelaxationProgram {
    debug_assert_eq!(benefits.len(), costs.len());

    let n = benefits.len();
    let mut program = RelaxationProgram::maximize(n + 1);

    // 0.5 (1 + X[0, i]) b_i = 0.5 b_i + 0.5 b_i X[0, i]
    for (i, &benefit) in benefits.iter().enumerate() {
        program
            .add_objective_term(0, i + 1, 0.5 * benefit)
            .add_objective_constant(0.5 * benefit);
    }

    let mut spend = AffineForm::with_capacity(n);
    for (i, &cost) in costs.iter().enumerate() {
        spend.add_term(0, i + 1, 0.5 * cost).add_constant(0.5 * cost);
    }
    program.add_constraint(BUDGET_CONSTRAINT, spend, Relation::LessEqual, budget);

    program.require_psd().fix_diagonal(1.0);
    program
}
