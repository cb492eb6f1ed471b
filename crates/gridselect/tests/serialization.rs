//! Wire shape of solve results.

use gridselect::prelude::*;
use gridselect_test::Scenario;
use serde_json::Value;

#[test]
fn test_summary_json() {
    let s = Scenario::single_winner();
    let summary = gridselect::solve(&s.benefits, &s.costs, s.budget).unwrap();

    let json: Value = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["status"], "optimal");
    assert_eq!(json["budget"], 50.0);
    assert_eq!(json["outcome"]["selected_count"], 1);
    assert_eq!(json["outcome"]["decisions"], serde_json::json!([[1, 0]]));
    assert_eq!(json["outcome"]["scores"], serde_json::json!([[1.0, 0.0]]));

    let back: SolutionSummary = serde_json::from_value(json).unwrap();
    assert_eq!(back, summary);
}

#[test]
fn test_timeout_status_string() {
    let json = serde_json::to_string(&SolverStatus::TimedOut).unwrap();
    assert_eq!(json, "\"timeout\"");
}
