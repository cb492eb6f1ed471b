//! Selection problems with known answers.
//!
//! # Example
//!
//! ```
//! use gridselect_test::Scenario;
//!
//! let s = Scenario::single_winner();
//! assert_eq!(s.benefits.shape(), s.costs.shape());
//! assert_eq!(s.expected_decisions, Some(vec![1, 0]));
//! ```

use gridselect_core::Grid;

use crate::grids::grid;

/// A selection problem and, when it is integral, its rounded answer.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub benefits: Grid<f64>,
    pub costs: Grid<f64>,
    pub budget: f64,
    /// Row-major decisions when the relaxation is known to be integral.
    pub expected_decisions: Option<Vec<u8>>,
}

impl Scenario {
    /// Two cells of equal cost, budget for one: the better one wins.
    pub fn single_winner() -> Self {
        Self {
            benefits: grid(vec![vec![0.9, 0.2]]),
            costs: grid(vec![vec![50.0, 50.0]]),
            budget: 50.0,
            expected_decisions: Some(vec![1, 0]),
        }
    }

    /// Budget covers every cell.
    pub fn everything_affordable() -> Self {
        Self {
            benefits: grid(vec![vec![0.3, 0.8], vec![0.5, 0.1]]),
            costs: grid(vec![vec![10.0, 20.0], vec![5.0, 15.0]]),
            budget: 100.0,
            expected_decisions: Some(vec![1, 1, 1, 1]),
        }
    }

    /// Greedy-by-ratio leaves one cell half selected.
    ///
    /// The relaxation picks cell (0, 0) whole and cell (0, 1) at 0.5.
    pub fn fractional() -> Self {
        Self {
            benefits: grid(vec![vec![0.8, 0.6]]),
            costs: grid(vec![vec![10.0, 20.0]]),
            budget: 20.0,
            expected_decisions: None,
        }
    }

    /// A 3x3 field with mixed ratios.
    pub fn field() -> Self {
        Self {
            benefits: grid(vec![
                vec![0.9, 0.1, 0.4],
                vec![0.3, 0.7, 0.2],
                vec![0.6, 0.5, 0.8],
            ]),
            costs: grid(vec![
                vec![30.0, 5.0, 12.0],
                vec![8.0, 25.0, 40.0],
                vec![18.0, 10.0, 22.0],
            ]),
            budget: 60.0,
            expected_decisions: None,
        }
    }

    /// Sum of all costs.
    pub fn total_cost(&self) -> f64 {
        self.costs.sum()
    }
}
