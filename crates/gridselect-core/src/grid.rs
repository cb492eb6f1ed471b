//! Dense row-major grid used for benefit, cost, score and decision matrices.
//!
//! Row-major order is the flattening contract of the whole crate: the
//! formulator flattens with [`Grid::as_slice`] and the extractor reshapes
//! with [`Grid::from_vec`], so cell `(r, c)` always maps to index
//! `r * cols + c`.

use std::fmt;
use std::ops::Index;

use num_traits::Float;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SelectionError};

/// A rectangular `rows x cols` matrix stored in row-major order.
///
/// # Example
///
/// ```
/// use gridselect_core::Grid;
///
/// let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(grid.shape(), (2, 2));
/// assert_eq!(grid[(1, 0)], 3.0);
/// assert_eq!(grid.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(grid.sum(), 10.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::LengthMismatch`] when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(SelectionError::LengthMismatch {
                rows,
                cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a grid from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::RaggedRows`] when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(SelectionError::RaggedRows {
                    row: index,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the cell at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterates rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// Iterates cells as `(row, col, value)` in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, value)| (i / cols, i % cols, value))
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Applies `f` to every cell, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T: Float> Grid<T> {
    /// Sum of all cells.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &v| acc + v)
    }

    /// Element-wise product summed over all cells (`Σ self ⊙ other`).
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::GridShapeMismatch`] when the shapes differ.
    pub fn weighted_sum(&self, other: &Grid<T>) -> Result<T> {
        if self.shape() != other.shape() {
            return Err(SelectionError::GridShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

// Serialized as nested rows so transport layers emit plain matrices.
impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(D::Error::custom)
    }
}
