//! First-row reduction of unit-diagonal relaxations to a linear program.
//!
//! When the objective and every non-diagonal constraint only read `X[0, i]`,
//! the feasible set of `X ⪰ 0, diag(X) = 1` projected onto the first row is
//! exactly the box `[-1, 1]^N`: any `y` in the box lifts to
//!
//! ```text
//! X = [[1, yᵀ], [y, y yᵀ + diag(1 - y²)]]
//! ```
//!
//! which is PSD as a rank-one term plus a nonnegative diagonal. The program
//! is therefore solved exactly as an LP over `y` and lifted back.

use std::panic::{catch_unwind, AssertUnwindSafe};

use good_lp::{
    minilp, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use gridselect_config::DEFAULT_TOLERANCE;
use gridselect_core::{
    AffineForm, BackendOutput, Constraint, Grid, ObjectiveSense, Relation, RelaxationBackend,
    RelaxationProgram, SolverStatus,
};
use tracing::{debug, trace};

/// Diagonal values within this distance of 1 count as unit.
const UNIT_DIAGONAL_SLACK: f64 = 1e-12;

/// Exact backend for first-row relaxations, solved with `minilp`.
///
/// # Example
///
/// ```
/// use gridselect_core::{AffineForm, Relation, RelaxationBackend, RelaxationProgram, SolverStatus};
/// use gridselect_solver::ReducedLpBackend;
///
/// // maximize X[0, 1] subject to X[0, 1] <= 0.25
/// let mut program = RelaxationProgram::maximize(2);
/// program.add_objective_term(0, 1, 1.0);
/// let mut cap = AffineForm::new();
/// cap.add_term(0, 1, 1.0);
/// program.add_constraint("cap", cap, Relation::LessEqual, 0.25);
/// program.require_psd().fix_diagonal(1.0);
///
/// let output = ReducedLpBackend::new().solve(&program);
/// assert_eq!(output.status, SolverStatus::Optimal);
/// assert!((output.objective.unwrap() - 0.25).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedLpBackend {
    tolerance: f64,
}

impl Default for ReducedLpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ReducedLpBackend {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the largest constraint residual accepted as optimal.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl RelaxationBackend for ReducedLpBackend {
    fn solve(&self, program: &RelaxationProgram) -> BackendOutput {
        let reduced = match ReducedProgram::from_program(program) {
            Ok(reduced) => reduced,
            Err(message) => {
                debug!(event = "unsupported_program", %message);
                return BackendOutput::without_solution(SolverStatus::Error, message);
            }
        };
        trace!(
            event = "reduced",
            variables = reduced.objective.len(),
            rows = reduced.rows.len(),
            skipped = reduced.constant_rows_checked,
        );

        if let Some(name) = &reduced.violated_constant_row {
            return BackendOutput::without_solution(
                SolverStatus::Infeasible,
                format!("constraint {name} cannot hold for any matrix"),
            );
        }

        let y = match reduced.solve_lp() {
            Ok(y) => y,
            Err(output) => return output,
        };
        trace!(event = "lp_solved", ?y);

        let gram = match lift(&y) {
            Ok(gram) => gram,
            Err(err) => {
                return BackendOutput::without_solution(SolverStatus::Error, err.to_string())
            }
        };
        let objective = program.objective().evaluate(&gram);
        let residual = program.max_violation(&gram);

        if residual > self.tolerance {
            debug!(event = "residual_exceeded", residual, tolerance = self.tolerance);
            return BackendOutput {
                status: SolverStatus::Inaccurate,
                objective: Some(objective),
                gram: Some(gram),
                message: Some(format!(
                    "constraint residual {residual:e} exceeds tolerance {:e}",
                    self.tolerance
                )),
            };
        }

        BackendOutput::optimal(gram, objective)
    }

    fn name(&self) -> &str {
        "reduced-lp (minilp)"
    }
}

/// One linear row over `y`: `coefficients · y + constant <relation> rhs`.
#[derive(Debug, Clone)]
struct ReducedRow {
    coefficients: Vec<f64>,
    constant: f64,
    relation: Relation,
    rhs: f64,
}

/// A relaxation program rewritten over the first-row variables `y`.
#[derive(Debug, Clone)]
struct ReducedProgram {
    sense: ObjectiveSense,
    objective: Vec<f64>,
    rows: Vec<ReducedRow>,
    constant_rows_checked: usize,
    violated_constant_row: Option<String>,
}

impl ReducedProgram {
    fn from_program(program: &RelaxationProgram) -> Result<Self, String> {
        if !program.is_psd() {
            return Err("program does not require X to be PSD".to_string());
        }
        let dimension = program.dimension();
        if dimension == 0 {
            return Err("program has dimension 0".to_string());
        }
        let n = dimension - 1;

        let mut unit = vec![false; dimension];
        let mut linear = Vec::new();
        for constraint in program.constraints() {
            match diagonal_fixing(constraint)? {
                Some(k) if k < dimension => unit[k] = true,
                Some(k) => {
                    return Err(format!(
                        "constraint {} fixes X[{k}, {k}] outside dimension {dimension}",
                        constraint.name
                    ))
                }
                None => linear.push(constraint),
            }
        }
        if let Some(k) = unit.iter().position(|&fixed| !fixed) {
            return Err(format!("X[{k}, {k}] is not fixed to 1"));
        }

        let (objective, _) = reduce_form(program.objective(), n, "objective")?;

        let mut rows = Vec::with_capacity(linear.len());
        let mut constant_rows_checked = 0;
        let mut violated_constant_row = None;
        for constraint in linear {
            let (coefficients, constant) = reduce_form(&constraint.form, n, &constraint.name)?;
            let row = ReducedRow {
                coefficients,
                constant,
                relation: constraint.relation,
                rhs: constraint.rhs,
            };
            if row.coefficients.iter().all(|&c| c == 0.0) {
                constant_rows_checked += 1;
                if !row.holds_at_constant() && violated_constant_row.is_none() {
                    violated_constant_row = Some(constraint.name.clone());
                }
                continue;
            }
            rows.push(row);
        }

        Ok(Self {
            sense: program.sense(),
            objective,
            rows,
            constant_rows_checked,
            violated_constant_row,
        })
    }

    fn solve_lp(&self) -> Result<Vec<f64>, BackendOutput> {
        if self.objective.is_empty() {
            return Ok(Vec::new());
        }

        let mut vars = ProblemVariables::new();
        let y: Vec<Variable> = vars.add_vector(variable().clamp(-1.0, 1.0), self.objective.len());

        let objective = linear_expression(&self.objective, &y);
        let unsolved = match self.sense {
            ObjectiveSense::Maximize => vars.maximise(objective),
            ObjectiveSense::Minimize => vars.minimise(objective),
        };
        let mut model = unsolved.using(minilp);
        for row in &self.rows {
            let lhs = linear_expression(&row.coefficients, &y);
            let bound = row.rhs - row.constant;
            let constraint = match row.relation {
                Relation::LessEqual => lhs.leq(bound),
                Relation::Equal => lhs.eq(bound),
            };
            model.add_constraint(constraint);
        }

        let solved = catch_unwind(AssertUnwindSafe(|| model.solve())).map_err(|_| {
            BackendOutput::without_solution(SolverStatus::Error, "minilp panicked while solving")
        })?;

        match solved {
            Ok(solution) => Ok(y.iter().map(|&v| solution.value(v)).collect()),
            Err(err) => Err(BackendOutput::without_solution(status_of(&err), err.to_string())),
        }
    }
}

impl ReducedRow {
    fn holds_at_constant(&self) -> bool {
        match self.relation {
            Relation::LessEqual => self.constant <= self.rhs,
            Relation::Equal => self.constant == self.rhs,
        }
    }
}

/// Index `k` when `constraint` is `c * X[k, k] + d == rhs` with a unit solution.
fn diagonal_fixing(constraint: &Constraint) -> Result<Option<usize>, String> {
    let terms = constraint.form.terms();
    if constraint.relation != Relation::Equal || terms.len() != 1 || !terms[0].is_diagonal() {
        return Ok(None);
    }

    let term = terms[0];
    if term.coefficient == 0.0 {
        return Ok(None);
    }
    let value = (constraint.rhs - constraint.form.constant()) / term.coefficient;
    if (value - 1.0).abs() > UNIT_DIAGONAL_SLACK {
        return Err(format!(
            "constraint {} fixes X[{k}, {k}] to {value}; only unit diagonals are supported",
            constraint.name,
            k = term.row
        ));
    }
    Ok(Some(term.row))
}

/// Rewrites `form` over `y = X[0, 1..=n]`, folding unit diagonal entries
/// into the constant.
fn reduce_form(form: &AffineForm, n: usize, name: &str) -> Result<(Vec<f64>, f64), String> {
    let mut coefficients = vec![0.0; n];
    let mut constant = form.constant();

    for term in form.terms() {
        if term.col > n {
            return Err(format!(
                "{name} reads X[{}, {}] outside dimension {}",
                term.row,
                term.col,
                n + 1
            ));
        }
        if term.is_diagonal() {
            constant += term.coefficient;
        } else if term.row == 0 {
            coefficients[term.col - 1] += term.coefficient;
        } else {
            return Err(format!(
                "{name} couples X[{}, {}]; only first-row entries are supported",
                term.row, term.col
            ));
        }
    }

    Ok((coefficients, constant))
}

fn linear_expression(coefficients: &[f64], y: &[Variable]) -> Expression {
    let mut expr = Expression::with_capacity(coefficients.len());
    for (&c, &v) in coefficients.iter().zip(y) {
        if c != 0.0 {
            expr.add_mul(c, v);
        }
    }
    expr
}

fn status_of(err: &ResolutionError) -> SolverStatus {
    match err {
        ResolutionError::Infeasible => SolverStatus::Infeasible,
        ResolutionError::Unbounded => SolverStatus::Unbounded,
        _ => SolverStatus::Error,
    }
}

/// Lifts a first row `y` to `[[1, yᵀ], [y, y yᵀ + diag(1 - y²)]]`.
///
/// Entries are clamped to `[-1, 1]` first so simplex round-off cannot
/// produce a negative diagonal correction.
pub fn lift(y: &[f64]) -> gridselect_core::Result<Grid<f64>> {
    let v: Vec<f64> = std::iter::once(1.0)
        .chain(y.iter().map(|s| s.clamp(-1.0, 1.0)))
        .collect();
    let dimension = v.len();
    let mut data = Vec::with_capacity(dimension * dimension);
    for i in 0..dimension {
        for j in 0..dimension {
            data.push(if i == j { 1.0 } else { v[i] * v[j] });
        }
    }
    Grid::from_vec(dimension, dimension, data)
}
