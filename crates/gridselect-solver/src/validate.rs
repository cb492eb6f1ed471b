//! Input preconditions, checked before any numerical work.

use gridselect_core::{Grid, Result, SelectionError};

/// Validates benefit and cost grids and the budget.
///
/// Checks run in this order: shapes, budget, emptiness, then every cell
/// (benefits before costs, row-major).
///
/// # Errors
///
/// - [`SelectionError::ShapeMismatch`] when the grids differ in shape
/// - [`SelectionError::InvalidBudget`] when `budget` is not a positive finite number
/// - [`SelectionError::EmptyGrid`] when there are no cells
/// - [`SelectionError::NonFiniteValue`], [`SelectionError::BenefitOutOfRange`]
///   or [`SelectionError::NegativeCost`] for bad cell values
pub fn validate(benefits: &Grid<f64>, costs: &Grid<f64>, budget: f64) -> Result<()> {
    if benefits.shape() != costs.shape() {
        return Err(SelectionError::ShapeMismatch {
            benefits: benefits.shape(),
            costs: costs.shape(),
        });
    }

    if !(budget > 0.0 && budget.is_finite()) {
        return Err(SelectionError::InvalidBudget(budget));
    }

    if benefits.is_empty() {
        return Err(SelectionError::EmptyGrid);
    }

    for (row, col, &value) in benefits.indexed() {
        if !value.is_finite() {
            return Err(SelectionError::NonFiniteValue {
                matrix: "benefits",
                row,
                col,
            });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(SelectionError::BenefitOutOfRange { row, col, value });
        }
    }

    for (row, col, &value) in costs.indexed() {
        if !value.is_finite() {
            return Err(SelectionError::NonFiniteValue {
                matrix: "costs",
                row,
                col,
            });
        }
        if value < 0.0 {
            return Err(SelectionError::NegativeCost { row, col, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<f64>>) -> Grid<f64> {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_valid_inputs() {
        let benefits = grid(vec![vec![0.0, 1.0], vec![0.5, 0.25]]);
        let costs = grid(vec![vec![0.0, 3.0], vec![10.0, 1.5]]);
        assert!(validate(&benefits, &costs, 4.0).is_ok());
    }

    #[test]
    fn test_shape_mismatch() {
        let benefits = Grid::filled(2, 2, 0.5);
        let costs = Grid::filled(2, 3, 1.0);
        assert_eq!(
            validate(&benefits, &costs, 10.0),
            Err(SelectionError::ShapeMismatch {
                benefits: (2, 2),
                costs: (2, 3)
            })
        );
    }

    #[test]
    fn test_shape_checked_before_budget() {
        let benefits = Grid::filled(1, 2, 0.5);
        let costs = Grid::filled(2, 1, 1.0);
        assert!(matches!(
            validate(&benefits, &costs, 0.0),
            Err(SelectionError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_budget() {
        let benefits = Grid::filled(1, 2, 0.5);
        let costs = Grid::filled(1, 2, 1.0);
        for budget in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate(&benefits, &costs, budget),
                Err(SelectionError::InvalidBudget(_))
            ));
        }
    }

    #[test]
    fn test_empty_grid() {
        let empty: Grid<f64> = Grid::from_rows(Vec::new()).unwrap();
        assert_eq!(validate(&empty, &empty, 1.0), Err(SelectionError::EmptyGrid));
    }

    #[test]
    fn test_cell_values() {
        let costs = Grid::filled(1, 2, 1.0);

        let nan = grid(vec![vec![0.5, f64::NAN]]);
        assert_eq!(
            validate(&nan, &costs, 1.0),
            Err(SelectionError::NonFiniteValue {
                matrix: "benefits",
                row: 0,
                col: 1
            })
        );

        let too_big = grid(vec![vec![1.5, 0.5]]);
        assert!(matches!(
            validate(&too_big, &costs, 1.0),
            Err(SelectionError::BenefitOutOfRange { row: 0, col: 0, .. })
        ));

        let benefits = Grid::filled(1, 2, 0.5);
        let negative = grid(vec![vec![1.0, -0.1]]);
        assert!(matches!(
            validate(&benefits, &negative, 1.0),
            Err(SelectionError::NegativeCost { row: 0, col: 1, .. })
        ));
    }
}
