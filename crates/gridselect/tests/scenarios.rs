//! End-to-end selection scenarios.

use std::sync::Arc;

use gridselect::prelude::*;
use gridselect::{BackendOutput, ReducedLpBackend};
use gridselect_test::{gram_for_row, CountingBackend, Scenario, ScriptedBackend};

const EPS: f64 = 1e-6;

#[test]
fn test_single_winner() {
    let s = Scenario::single_winner();
    let summary = gridselect::solve(&s.benefits, &s.costs, s.budget).unwrap();

    assert_eq!(summary.status(), SolverStatus::Optimal);
    let outcome = summary.outcome().unwrap();
    assert_eq!(outcome.decisions.as_slice(), &[1, 0]);
    assert_eq!(outcome.selected_count, 1);
    assert!((outcome.total_cost - 50.0).abs() < EPS);
    assert!((outcome.total_benefit - 0.9).abs() < EPS);
    assert!((outcome.budget_utilization - 100.0).abs() < 1e-4);
    assert!(outcome.is_integral());
    assert_eq!(outcome.selected_cells().collect::<Vec<_>>(), vec![(0, 0)]);
    assert!((summary.objective_value().unwrap() - 0.9).abs() < EPS);
}

#[test]
fn test_zero_budget_is_rejected_before_solving() {
    let s = Scenario::single_winner();
    let counting = Arc::new(CountingBackend::new(ReducedLpBackend::new()));
    let selector = RelaxationSelector::new(SelectionConfig::default(), counting.clone()).unwrap();

    let result = selector.solve(&s.benefits, &s.costs, 0.0);

    assert_eq!(result.unwrap_err(), SelectionError::InvalidBudget(0.0));
    assert_eq!(counting.calls(), 0);
}

#[test]
fn test_shape_mismatch_is_rejected_before_solving() {
    let benefits = Grid::filled(2, 2, 0.5);
    let costs = Grid::filled(2, 3, 1.0);
    let counting = Arc::new(CountingBackend::new(ReducedLpBackend::new()));
    let selector = RelaxationSelector::new(SelectionConfig::default(), counting.clone()).unwrap();

    let result = selector.solve(&benefits, &costs, 10.0);

    assert_eq!(
        result.unwrap_err(),
        SelectionError::ShapeMismatch {
            benefits: (2, 2),
            costs: (2, 3)
        }
    );
    assert_eq!(counting.calls(), 0);
}

#[test]
fn test_everything_affordable() {
    let s = Scenario::everything_affordable();
    let summary = gridselect::solve(&s.benefits, &s.costs, s.budget).unwrap();

    let outcome = summary.outcome().unwrap();
    assert_eq!(outcome.decisions.as_slice(), &[1, 1, 1, 1]);
    assert_eq!(outcome.selected_count, 4);
    assert!((outcome.total_cost - s.total_cost()).abs() < EPS);
    assert!((outcome.rounded_cost - s.total_cost()).abs() < EPS);
    assert!((outcome.budget_utilization - 50.0).abs() < 1e-4);
}

#[test]
fn test_budget_exactly_covers_every_cell() {
    let mut s = Scenario::everything_affordable();
    s.budget = s.total_cost();

    let summary = gridselect::solve(&s.benefits, &s.costs, s.budget).unwrap();

    assert_eq!(summary.status(), SolverStatus::Optimal);
    let outcome = summary.outcome().unwrap();
    assert_eq!(outcome.decisions.as_slice(), &[1, 1, 1, 1]);
    assert!(outcome.total_cost <= s.budget + EPS);
    assert!((outcome.total_cost - s.total_cost()).abs() < EPS);
    assert!((outcome.budget_utilization - 100.0).abs() < 1e-4);
    assert!(outcome.rounded_within_budget(s.budget, EPS));
}

#[test]
fn test_fractional_cell_is_reported() {
    let s = Scenario::fractional();
    let summary = gridselect::solve(&s.benefits, &s.costs, s.budget).unwrap();

    let outcome = summary.outcome().unwrap();
    assert_eq!(outcome.scores.as_slice(), &[1.0, 0.5]);
    // 0.5 is not strictly above the cutoff
    assert_eq!(outcome.decisions.as_slice(), &[1, 0]);
    assert_eq!(outcome.non_binary.len(), 1);
    assert_eq!((outcome.non_binary[0].row, outcome.non_binary[0].col), (0, 1));
    assert_eq!(outcome.non_binary[0].cost, 20.0);
    assert!((outcome.total_cost - 20.0).abs() < EPS);
    assert!((outcome.rounded_cost - 10.0).abs() < EPS);
    assert!(outcome.rounded_within_budget(s.budget, EPS));
}

#[test]
fn test_include_tie_break_selects_half_cell() {
    let s = Scenario::fractional();
    // the relaxation of this scenario: cell (0, 0) whole, cell (0, 1) at 0.5
    let backend = Arc::new(ScriptedBackend::new(BackendOutput::optimal(
        gram_for_row(&[1.0, 0.0]),
        1.1,
    )));
    let config = SelectionConfig::new().with_tie_break(TieBreak::Include);
    let selector = RelaxationSelector::new(config, backend).unwrap();

    let summary = selector.solve(&s.benefits, &s.costs, s.budget).unwrap();

    let outcome = summary.outcome().unwrap();
    assert_eq!(outcome.decisions.as_slice(), &[1, 1]);
    assert!(!outcome.rounded_within_budget(s.budget, EPS));
}
