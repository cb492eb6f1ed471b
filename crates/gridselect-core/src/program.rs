//! Relaxation program builder.
//!
//! A [`RelaxationProgram`] accumulates the objective and constraints of a
//! convex program over one symmetric matrix variable `X`. Backends receive
//! the finished program by reference and never see how it was built.
//!
//! Entry terms are stored on the upper triangle: a term on `(i, j)` with
//! `i > j` is rewritten to `(j, i)`.

use crate::grid::Grid;

/// Direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Maximize,
    Minimize,
}

/// Comparison between an affine form and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `form <= rhs`
    LessEqual,
    /// `form == rhs`
    Equal,
}

/// `coefficient * X[row, col]` with `row <= col`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryTerm {
    pub row: usize,
    pub col: usize,
    pub coefficient: f64,
}

impl EntryTerm {
    pub fn new(row: usize, col: usize, coefficient: f64) -> Self {
        let (row, col) = if row <= col { (row, col) } else { (col, row) };
        Self {
            row,
            col,
            coefficient,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }
}

/// `Σ coefficient * X[row, col] + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffineForm {
    terms: Vec<EntryTerm>,
    constant: f64,
}

impl AffineForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            constant: 0.0,
        }
    }

    /// Adds `coefficient * X[row, col]`.
    pub fn add_term(&mut self, row: usize, col: usize, coefficient: f64) -> &mut Self {
        self.terms.push(EntryTerm::new(row, col, coefficient));
        self
    }

    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    pub fn terms(&self) -> &[EntryTerm] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Evaluates the form at a candidate matrix.
    ///
    /// Terms referring to entries outside `matrix` contribute nothing.
    pub fn evaluate(&self, matrix: &Grid<f64>) -> f64 {
        self.terms.iter().fold(self.constant, |acc, term| {
            acc + term.coefficient * matrix.get(term.row, term.col).copied().unwrap_or(0.0)
        })
    }
}

/// A named linear constraint on entries of `X`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub form: AffineForm,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    /// How far `matrix` violates this constraint; `0.0` when satisfied.
    pub fn violation(&self, matrix: &Grid<f64>) -> f64 {
        let lhs = self.form.evaluate(matrix);
        match self.relation {
            Relation::LessEqual => (lhs - self.rhs).max(0.0),
            Relation::Equal => (lhs - self.rhs).abs(),
        }
    }
}

/// Convex program over a symmetric `dimension x dimension` matrix `X`.
///
/// # Example
///
/// ```
/// use gridselect_core::{AffineForm, Grid, Relation, RelaxationProgram};
///
/// let mut program = RelaxationProgram::maximize(3);
/// program.add_objective_term(0, 1, 0.5).add_objective_constant(0.5);
///
/// let mut budget = AffineForm::new();
/// budget.add_term(1, 0, 2.0);
/// program.add_constraint("budget", budget, Relation::LessEqual, 1.0);
/// program.require_psd().fix_diagonal(1.0);
///
/// assert_eq!(program.dimension(), 3);
/// assert_eq!(program.constraints().len(), 4);
/// assert!(program.is_psd());
///
/// let identity = Grid::from_vec(3, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(program.objective().evaluate(&identity), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationProgram {
    dimension: usize,
    sense: ObjectiveSense,
    objective: AffineForm,
    constraints: Vec<Constraint>,
    psd: bool,
}

impl RelaxationProgram {
    /// Creates an empty program with a maximization objective.
    pub fn maximize(dimension: usize) -> Self {
        Self::new(dimension, ObjectiveSense::Maximize)
    }

    pub fn new(dimension: usize, sense: ObjectiveSense) -> Self {
        Self {
            dimension,
            sense,
            objective: AffineForm::new(),
            constraints: Vec::new(),
            psd: false,
        }
    }

    /// Adds `coefficient * X[row, col]` to the objective.
    pub fn add_objective_term(&mut self, row: usize, col: usize, coefficient: f64) -> &mut Self {
        self.objective.add_term(row, col, coefficient);
        self
    }

    pub fn add_objective_constant(&mut self, value: f64) -> &mut Self {
        self.objective.add_constant(value);
        self
    }

    /// Adds `form <relation> rhs`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        form: AffineForm,
        relation: Relation,
        rhs: f64,
    ) -> &mut Self {
        self.constraints.push(Constraint {
            name: name.into(),
            form,
            relation,
            rhs,
        });
        self
    }

    /// Requires `X ⪰ 0`.
    pub fn require_psd(&mut self) -> &mut Self {
        self.psd = true;
        self
    }

    /// Adds `X[k, k] == value` for every `k`, named `unit_diagonal[k]`.
    pub fn fix_diagonal(&mut self, value: f64) -> &mut Self {
        for k in 0..self.dimension {
            let mut form = AffineForm::with_capacity(1);
            form.add_term(k, k, 1.0);
            self.add_constraint(format!("unit_diagonal[{k}]"), form, Relation::Equal, value);
        }
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn objective(&self) -> &AffineForm {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_psd(&self) -> bool {
        self.psd
    }

    /// Largest violation of any constraint at `matrix`.
    pub fn max_violation(&self, matrix: &Grid<f64>) -> f64 {
        self.constraints
            .iter()
            .map(|c| c.violation(matrix))
            .fold(0.0, f64::max)
    }
}
