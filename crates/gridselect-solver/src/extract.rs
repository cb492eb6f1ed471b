//! Score extraction from a relaxation matrix.

use gridselect_core::{Grid, Result, SelectionError};

/// Relative error one multiplication by the decimal scale can introduce.
const SCALING_ULPS: f64 = 4.0 * f64::EPSILON;

/// Truncates `value` toward zero, keeping `precision` decimals.
///
/// Scaling by `10^precision` can itself round a representable decimal a
/// few ulps below an integer (`0.29 * 100 = 28.999...96`); only that
/// error is snapped back. Anything further below, such as solver noise
/// of `1e-9`, is truncated, so a score never lands on a decimal it does
/// not reach.
///
/// # Examples
///
/// ```
/// use gridselect_solver::truncate;
///
/// assert_eq!(truncate(0.987_6, 3), 0.987);
/// assert_eq!(truncate(-0.987_6, 3), -0.987);
/// assert_eq!(truncate(0.29, 2), 0.29);
/// ```
pub fn truncate(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;
    let nearest = scaled.round();
    let kept = if (scaled - nearest).abs() <= SCALING_ULPS * scaled.abs() {
        nearest
    } else {
        scaled.trunc()
    };
    kept / scale
}

/// Scores read from the first row of a Gram matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedScores {
    /// `X[0, 1..=N]`, row-major over the grid.
    pub raw: Vec<f64>,
    /// `truncate((X[0, i] + 1) / 2)` reshaped to the grid.
    pub scores: Grid<f64>,
}

/// Reads selection scores for a `rows x cols` grid out of `gram`.
///
/// # Errors
///
/// Returns [`SelectionError::GramShapeMismatch`] unless `gram` is
/// `(rows * cols + 1)` square.
pub fn extract_scores(
    gram: &Grid<f64>,
    shape: (usize, usize),
    precision: u32,
) -> Result<ExtractedScores> {
    let (rows, cols) = shape;
    let expected = rows * cols + 1;
    if gram.shape() != (expected, expected) {
        return Err(SelectionError::GramShapeMismatch {
            expected,
            found: gram.shape(),
        });
    }

    let first_row = gram.row(0).unwrap_or(&[]);
    let raw: Vec<f64> = first_row.iter().skip(1).copied().collect();
    let normalized = raw
        .iter()
        .map(|&s| truncate((s + 1.0) / 2.0, precision))
        .collect();

    Ok(ExtractedScores {
        raw,
        scores: Grid::from_vec(rows, cols, normalized)?,
    })
}
