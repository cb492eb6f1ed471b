//! Packaging of backend output into a [`SolutionSummary`].

use gridselect_config::SelectionConfig;
use gridselect_core::{BackendOutput, Grid, Result, SelectionOutcome, SolutionSummary};

use crate::extract::extract_scores;
use crate::rounding::{non_binary_positions, round_scores};

/// Derives scores, decisions and totals from a Gram matrix.
///
/// # Errors
///
/// Propagates [`gridselect_core::SelectionError::GramShapeMismatch`] from
/// extraction, and [`gridselect_core::SelectionError::GridShapeMismatch`]
/// when `costs` does not match the shape of `benefits`.
pub fn derive_outcome(
    gram: &Grid<f64>,
    benefits: &Grid<f64>,
    costs: &Grid<f64>,
    budget: f64,
    config: &SelectionConfig,
) -> Result<SelectionOutcome> {
    let extracted = extract_scores(gram, benefits.shape(), config.extraction.precision)?;
    let scores = extracted.scores;
    let decisions = round_scores(&scores, &config.rounding);
    let non_binary = non_binary_positions(&scores, benefits, costs, &config.diagnostics);

    let total_benefit = scores.weighted_sum(benefits)?;
    let total_cost = scores.weighted_sum(costs)?;

    let selected = decisions.map(|&d| f64::from(d));
    let rounded_benefit = selected.weighted_sum(benefits)?;
    let rounded_cost = selected.weighted_sum(costs)?;

    Ok(SelectionOutcome {
        selected_count: decisions.as_slice().iter().map(|&d| usize::from(d)).sum(),
        total_benefit,
        total_cost,
        budget_utilization: total_cost / budget * 100.0,
        rounded_benefit,
        rounded_cost,
        raw_scores: extracted.raw,
        scores,
        decisions,
        non_binary,
    })
}

/// Builds the summary for one backend result.
///
/// The outcome is present exactly when the backend returned a matrix,
/// whatever its status.
pub fn assemble(
    output: BackendOutput,
    benefits: &Grid<f64>,
    costs: &Grid<f64>,
    budget: f64,
    config: &SelectionConfig,
) -> Result<SolutionSummary> {
    let outcome = match &output.gram {
        Some(gram) => Some(derive_outcome(gram, benefits, costs, budget, config)?),
        None => None,
    };

    Ok(SolutionSummary::new(
        output.status,
        output.objective,
        budget,
        outcome,
    ))
}
