//! Solver interface and a reference enumeration solver.

use super::model::MipModel;
use super::variables::VarId;
use std::time::Instant;
use tracing::debug;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Model uses features the solver cannot handle.
    Unsupported,
    /// Solver exceeded its time or work limit without a solution.
    Timeout,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Solution from a MIP solver.
#[derive(Debug, Clone)]
pub struct MipSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if any).
    pub objective_value: Option<f64>,
    /// Variable values, indexed by [`VarId::index`].
    pub values: Vec<f64>,
    /// Number of candidate assignments examined.
    pub assignments_checked: u64,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl MipSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            assignments_checked: 0,
            solve_time_ms: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value of a variable in the solution.
    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: i64,
    /// Maximum number of candidate assignments to examine.
    pub max_assignments: u64,
    /// Absolute tolerance for constraint and integrality checks.
    pub feasibility_tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            max_assignments: 10_000_000,
            feasibility_tol: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Sets the time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: i64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the maximum number of assignments to examine.
    pub fn with_max_assignments(mut self, n: u64) -> Self {
        self.max_assignments = n;
        self
    }

    /// Sets the feasibility tolerance.
    pub fn with_feasibility_tol(mut self, tol: f64) -> Self {
        self.feasibility_tol = tol;
        self
    }
}

/// Trait for MIP solver implementations.
///
/// Implementors wrap an optimization engine (an external MIP solver
/// binding or a test double). Model builders in this crate never call a
/// solver themselves; they hand a [`MipModel`] to whichever engine the
/// caller chooses, or serialize it with [`crate::format`].
pub trait MipSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &MipModel, config: &SolverConfig) -> MipSolution;
}

/// Exhaustive solver for tiny pure-integer models.
///
/// Walks every assignment in the box defined by the variable bounds and
/// keeps the best feasible one. This is a reference oracle for checking
/// formulations, not a branch-and-bound engine.
///
/// # Limitations
///
/// - Every variable must be binary or integer with finite bounds;
///   anything else yields [`SolverStatus::Unsupported`]
/// - Work grows with the product of all domain sizes
pub struct EnumerationSolver;

impl EnumerationSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnumerationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MipSolver for EnumerationSolver {
    fn solve(&self, model: &MipModel, config: &SolverConfig) -> MipSolution {
        if model.validate().is_err() {
            return MipSolution::empty(SolverStatus::ModelInvalid);
        }

        let start_time = Instant::now();

        // Integral domain [lo, hi] per variable
        let mut lo = Vec::with_capacity(model.variable_count());
        let mut hi = Vec::with_capacity(model.variable_count());
        for var in &model.variables {
            if !var.vtype.is_integral() || !var.is_bounded() {
                return MipSolution::empty(SolverStatus::Unsupported);
            }
            let (l, h) = (var.lower.ceil() as i64, var.upper.floor() as i64);
            if h < l {
                return MipSolution::empty(SolverStatus::Infeasible);
            }
            lo.push(l);
            hi.push(h);
        }

        let mut current = lo.clone();
        let mut values: Vec<f64> = current.iter().map(|&x| x as f64).collect();
        let mut best: Option<(f64, Vec<f64>)> = None;
        let mut checked = 0u64;
        let mut exhausted = false;

        loop {
            if checked >= config.max_assignments
                || (checked % 1024 == 0
                    && start_time.elapsed().as_millis() as i64 > config.time_limit_ms)
            {
                break;
            }

            for (slot, &x) in values.iter_mut().zip(&current) {
                *slot = x as f64;
            }
            checked += 1;

            let feasible = model
                .constraints
                .iter()
                .all(|c| c.is_satisfied(&values, config.feasibility_tol));
            if feasible {
                let obj = model.objective_value(&values).unwrap_or(0.0);
                let better = match (&best, &model.objective) {
                    (None, _) => true,
                    (Some((incumbent, _)), Some(objective)) => objective.improves(obj, *incumbent),
                    (Some(_), None) => false,
                };
                if better {
                    best = Some((obj, values.clone()));
                }
                if model.objective.is_none() {
                    exhausted = true;
                    break;
                }
            }

            // Advance the odometer; finishing the last digit ends the walk
            let mut i = 0;
            loop {
                if i == current.len() {
                    exhausted = true;
                    break;
                }
                current[i] += 1;
                if current[i] <= hi[i] {
                    break;
                }
                current[i] = lo[i];
                i += 1;
            }
            if exhausted {
                break;
            }
        }

        let status = match (&best, exhausted) {
            (Some(_), true) => SolverStatus::Optimal,
            (Some(_), false) => SolverStatus::Feasible,
            (None, true) => SolverStatus::Infeasible,
            (None, false) => SolverStatus::Timeout,
        };
        debug!(
            model = %model.name,
            ?status,
            checked,
            "enumeration finished"
        );

        let solve_time_ms = start_time.elapsed().as_millis() as i64;
        match best {
            Some((obj, values)) => MipSolution {
                status,
                objective_value: model.objective.as_ref().map(|_| obj),
                values,
                assignments_checked: checked,
                solve_time_ms,
            },
            None => MipSolution {
                assignments_checked: checked,
                solve_time_ms,
                ..MipSolution::empty(status)
            },
        }
    }
}
