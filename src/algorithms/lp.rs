//! Linear program formulation and solver backends.
//!
//! The optimizer talks to solvers exclusively through
//! [`LinearProgramSolver`], which keeps the optimization logic
//! solver-agnostic and lets tests inject failing stubs to drive the
//! fallback ladder. Two backends are provided: a simplex solver (microlp)
//! and an interior-point solver (Clarabel), both pure Rust.

use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
};
use thiserror::Error;

/// A linear program in standard form: minimize `objective · x` subject to
/// `coefficients · x ≥ minimum` for every constraint, with `x ≥ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Cost per variable.
    pub objective: Vec<f64>,
    /// Lower-bound constraints over the variables.
    pub constraints: Vec<LpConstraint>,
}

/// One `coefficients · x ≥ minimum` row.
#[derive(Debug, Clone, PartialEq)]
pub struct LpConstraint {
    /// One coefficient per variable, in problem order.
    pub coefficients: Vec<f64>,
    /// Right-hand side the weighted sum must reach.
    pub minimum: f64,
}

impl LpProblem {
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    /// The same program with every right-hand side scaled by `factor`.
    pub fn relaxed(&self, factor: f64) -> Self {
        Self {
            objective: self.objective.clone(),
            constraints: self
                .constraints
                .iter()
                .map(|constraint| LpConstraint {
                    coefficients: constraint.coefficients.clone(),
                    minimum: constraint.minimum * factor,
                })
                .collect(),
        }
    }
}

/// Solution of a linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// One value per variable, in problem order.
    pub values: Vec<f64>,
    /// Objective value at the solution.
    pub objective_value: f64,
}

/// Why a solve produced no usable solution.
///
/// Consumed by the optimizer's fallback ladder; never surfaced to engine
/// callers, because the terminal greedy rung cannot fail.
#[derive(Debug, Error)]
pub enum SolverFailure {
    #[error("linear program is infeasible")]
    Infeasible,
    #[error("linear program is unbounded")]
    Unbounded,
    #[error("solver failed: {0}")]
    Numerical(String),
}

impl From<ResolutionError> for SolverFailure {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::Infeasible => SolverFailure::Infeasible,
            ResolutionError::Unbounded => SolverFailure::Unbounded,
            other => SolverFailure::Numerical(other.to_string()),
        }
    }
}

/// A linear-programming backend.
pub trait LinearProgramSolver: Send + Sync {
    /// Short backend name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Solve the program, returning variable values in problem order.
    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, SolverFailure>;
}

/// Simplex backend, the primary solver.
pub struct SimplexSolver;

impl LinearProgramSolver for SimplexSolver {
    fn name(&self) -> &'static str {
        "simplex"
    }

    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, SolverFailure> {
        let (vars, xs) = declare_variables(problem);
        let mut model = vars
            .minimise(linear_expression(&problem.objective, &xs))
            .using(good_lp::microlp);
        for constraint in &problem.constraints {
            model = model.with(
                linear_expression(&constraint.coefficients, &xs).geq(constraint.minimum),
            );
        }
        let solution = model.solve()?;
        Ok(collect_solution(problem, &solution, &xs))
    }
}

/// Interior-point backend, used when the simplex solve fails.
pub struct InteriorPointSolver;

impl LinearProgramSolver for InteriorPointSolver {
    fn name(&self) -> &'static str {
        "interior-point"
    }

    fn solve(&self, problem: &LpProblem) -> Result<LpSolution, SolverFailure> {
        let (vars, xs) = declare_variables(problem);
        let mut model = vars
            .minimise(linear_expression(&problem.objective, &xs))
            .using(good_lp::clarabel);
        for constraint in &problem.constraints {
            model = model.with(
                linear_expression(&constraint.coefficients, &xs).geq(constraint.minimum),
            );
        }
        let solution = model.solve()?;
        Ok(collect_solution(problem, &solution, &xs))
    }
}

fn declare_variables(problem: &LpProblem) -> (ProblemVariables, Vec<Variable>) {
    let mut vars = ProblemVariables::new();
    let xs = problem
        .objective
        .iter()
        .map(|_| vars.add(variable().min(0.0)))
        .collect();
    (vars, xs)
}

fn linear_expression(coefficients: &[f64], xs: &[Variable]) -> Expression {
    coefficients
        .iter()
        .zip(xs)
        .map(|(coefficient, x)| *coefficient * *x)
        .sum()
}

fn collect_solution<S: Solution>(
    problem: &LpProblem,
    solution: &S,
    xs: &[Variable],
) -> LpSolution {
    let values: Vec<f64> = xs.iter().map(|x| solution.value(*x)).collect();
    let objective_value = problem
        .objective
        .iter()
        .zip(&values)
        .map(|(coefficient, value)| coefficient * value)
        .sum();
    LpSolution {
        values,
        objective_value,
    }
}
