//! Numeric building blocks shared by the service layer.

pub mod lp;

pub use lp::{
    InteriorPointSolver, LinearProgramSolver, LpConstraint, LpProblem, LpSolution, SimplexSolver,
    SolverFailure,
};
