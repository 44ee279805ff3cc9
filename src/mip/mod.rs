//! Mixed-integer linear modeling layer.
//!
//! Provides a solver-agnostic model for linear optimization problems with
//! binary, integer, and continuous variables.
//!
//! # Key Components
//!
//! - **Variables**: [`Variable`], [`VarType`], [`VarId`] handles
//! - **Constraints**: [`Constraint`] over a [`LinearExpr`]
//! - **Model**: [`MipModel`]: container for variables, constraints, objective
//! - **Solver**: [`MipSolver`] trait: interface for optimization engines
//!
//! # Design
//!
//! This module defines the modeling layer only. It does NOT include a
//! branch-and-bound engine. The [`MipSolver`] trait allows plugging in
//! external solvers; [`EnumerationSolver`] is a brute-force oracle for
//! checking tiny formulations.
//!
//! # References
//!
//! Wolsey (1998), "Integer Programming"

mod model;
mod solver;
mod variables;

pub use model::{
    Constraint, ConstraintSense, LinearExpr, MipModel, ModelError, Objective, VarCounts,
};
pub use solver::{EnumerationSolver, MipSolution, MipSolver, SolverConfig, SolverStatus};
pub use variables::{VarId, VarType, Variable};
