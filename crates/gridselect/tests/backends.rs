//! Selector behavior with non-default backends.

use std::sync::Arc;
use std::time::Duration;

use gridselect::prelude::*;
use gridselect::BackendOutput;
use gridselect_test::{gram_for_row, row_grid, ScriptedBackend, StallingBackend};

#[test]
fn test_non_optimal_status_without_matrix() {
    for status in [
        SolverStatus::Infeasible,
        SolverStatus::Unbounded,
        SolverStatus::Error,
        SolverStatus::Inaccurate,
    ] {
        let backend = Arc::new(ScriptedBackend::failing(status));
        let selector = RelaxationSelector::new(SelectionConfig::default(), backend).unwrap();

        let grid = row_grid(&[0.5, 0.5]);
        let summary = selector.solve(&grid, &grid, 1.0).unwrap();

        assert_eq!(summary.status(), status);
        assert!(!summary.is_optimal());
        assert_eq!(
            summary.outcome().unwrap_err(),
            SelectionError::NoSolutionAvailable { status }
        );
    }
}

#[test]
fn test_timeout() {
    let config = SelectionConfig::new().with_termination_millis(50);
    let backend = Arc::new(StallingBackend::new(Duration::from_millis(1_000)));
    let selector = RelaxationSelector::new(config, backend).unwrap();

    let grid = row_grid(&[0.5]);
    let summary = selector.solve(&grid, &grid, 1.0).unwrap();

    assert_eq!(summary.status(), SolverStatus::TimedOut);
    assert_eq!(summary.objective_value(), None);
    assert!(matches!(
        summary.outcome(),
        Err(SelectionError::NoSolutionAvailable {
            status: SolverStatus::TimedOut
        })
    ));
}

#[test]
fn test_generous_time_limit_still_solves() {
    let config = SelectionConfig::new().with_termination_seconds(30);
    let selector = RelaxationSelector::from_config(config).unwrap();

    let benefits = row_grid(&[0.9, 0.2]);
    let costs = row_grid(&[50.0, 50.0]);
    let summary = selector.solve(&benefits, &costs, 50.0).unwrap();

    assert_eq!(summary.status(), SolverStatus::Optimal);
    assert_eq!(summary.outcome().unwrap().decisions.as_slice(), &[1, 0]);
}

#[test]
fn test_wrong_matrix_size_is_an_error() {
    let backend = Arc::new(ScriptedBackend::new(BackendOutput::optimal(
        gram_for_row(&[1.0]),
        1.0,
    )));
    let selector = RelaxationSelector::new(SelectionConfig::default(), backend).unwrap();

    let grid = row_grid(&[0.5, 0.5]);
    let result = selector.solve(&grid, &grid, 1.0);

    assert_eq!(
        result.unwrap_err(),
        SelectionError::GramShapeMismatch {
            expected: 3,
            found: (2, 2)
        }
    );
}

#[test]
fn test_precision_from_config() {
    // y = 0.33333 gives (1 + y) / 2 = 0.666665
    let backend = Arc::new(ScriptedBackend::new(BackendOutput::optimal(
        gram_for_row(&[0.33333]),
        0.0,
    )));
    let config = SelectionConfig::new().with_precision(2);
    let selector = RelaxationSelector::new(config, backend).unwrap();

    let grid = row_grid(&[0.5]);
    let outcome = selector.solve(&grid, &grid, 1.0).unwrap().into_outcome().unwrap();

    assert_eq!(outcome.scores.as_slice(), &[0.66]);
    assert_eq!(outcome.raw_scores, vec![0.33333]);
}
