//! Grid construction helpers.

use gridselect_core::Grid;

/// Builds a grid from nested rows.
///
/// # Panics
///
/// Panics on ragged rows.
pub fn grid(rows: Vec<Vec<f64>>) -> Grid<f64> {
    Grid::from_rows(rows).expect("fixture rows must have equal length")
}

/// Builds a single-row grid.
pub fn row_grid(values: &[f64]) -> Grid<f64> {
    grid(vec![values.to_vec()])
}

/// Gram matrix whose first row is `[1, y...]`, lifted with a unit diagonal.
///
/// # Example
///
/// ```
/// use gridselect_test::gram_for_row;
///
/// let gram = gram_for_row(&[1.0, -1.0]);
/// assert_eq!(gram.shape(), (3, 3));
/// assert_eq!(gram.row(0), Some(&[1.0, 1.0, -1.0][..]));
/// assert_eq!(gram.row(1), Some(&[1.0, 1.0, -1.0][..]));
/// ```
pub fn gram_for_row(y: &[f64]) -> Grid<f64> {
    let v: Vec<f64> = std::iter::once(1.0).chain(y.iter().copied()).collect();
    let n = v.len();
    let data = (0..n * n)
        .map(|k| {
            let (i, j) = (k / n, k % n);
            if i == j {
                1.0
            } else {
                v[i] * v[j]
            }
        })
        .collect();
    Grid::from_vec(n, n, data).expect("square data has n * n entries")
}
