//! Noise-dosage scheduling formulation (Sherali & Smith 2001).

use super::instance::NoiseDosage;
use crate::mip::{Constraint, LinearExpr, MipModel, Objective, VarId, Variable};
use tracing::debug;

/// Symmetry handling for interchangeable workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetryHandling {
    /// Plain model.
    #[default]
    None,
    /// Lexicographic ordering of consecutive workers' assignment vectors,
    /// encoded with a positional base (`lex[j]` rows).
    SheraliSmith,
}

/// Per-machine bound on the work cycles a single worker can perform:
/// `u[i] = min(floor(total_hours / t[i]), d[i])`.
///
/// Machines with zero-length cycles are bounded by `d[i]` alone.
pub fn cycle_upper_bounds(inst: &NoiseDosage) -> Vec<u64> {
    let hours = inst.total_hours() as f64;
    inst.t()
        .iter()
        .zip(inst.d())
        .map(|(&t, &d)| {
            if t > 0.0 {
                ((hours / t).floor() as u64).min(d)
            } else {
                d
            }
        })
        .collect()
}

/// Positional base `M = max(u) + 1` of the lexicographic encoding.
///
/// Since every feasible `x[i,j] <= u[i] < M`, the weighted sum
/// `sum_i M^i x[i,j]` orders assignment vectors lexicographically (with
/// the last machine most significant).
pub fn symmetry_base(inst: &NoiseDosage) -> u64 {
    // u[i] <= d[i] <= MAX_WORK_CYCLES
    cycle_upper_bounds(inst)
        .into_iter()
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Builds the worst-case noise exposure model.
///
/// ```text
/// min  z
/// s.t. z >= sum_i alpha[i] x[i,j]          for every worker j   (dose[j])
///      sum_j x[i,j] == d[i]                for every machine i  (cycles[i])
///      sum_i t[i] x[i,j] <= total_hours    for every worker j   (hours[j])
///      x[i,j] integer >= 0, z >= 0
/// ```
///
/// With [`SymmetryHandling::SheraliSmith`], rows
/// `lex[j]: sum_i M^i x[i,j] - sum_i M^i x[i,j+1] >= 0` are added for
/// consecutive workers.
pub fn build_noise_dosage(inst: &NoiseDosage, symmetry: SymmetryHandling) -> MipModel {
    let (m, n) = (inst.m(), inst.n());
    let mut model = MipModel::new(inst.name());

    // x[i][j]
    let x: Vec<Vec<VarId>> = (0..m)
        .map(|i| {
            (0..n)
                .map(|j| {
                    model.add_var(Variable::integer(format!("x[{i},{j}]"), 0.0, f64::INFINITY))
                })
                .collect()
        })
        .collect();
    let z = model.add_var(Variable::continuous("z", 0.0, f64::INFINITY));

    for j in 0..n {
        let mut expr = LinearExpr::new().with_term(z, 1.0);
        for i in 0..m {
            expr.add_term(x[i][j], -inst.alpha()[i]);
        }
        model.add_constraint(Constraint::greater_equal(format!("dose[{j}]"), expr, 0.0));
    }

    for i in 0..m {
        model.add_constraint(Constraint::equal(
            format!("cycles[{i}]"),
            LinearExpr::sum(x[i].iter().copied()),
            inst.d()[i] as f64,
        ));
    }

    for j in 0..n {
        let expr = LinearExpr::from_terms((0..m).map(|i| (x[i][j], inst.t()[i])));
        model.add_constraint(Constraint::less_equal(
            format!("hours[{j}]"),
            expr,
            inst.total_hours() as f64,
        ));
    }

    if symmetry == SymmetryHandling::SheraliSmith {
        let base = symmetry_base(inst) as f64;
        let weights: Vec<f64> = (0..m).map(|i| base.powi(i as i32)).collect();
        for j in 0..n.saturating_sub(1) {
            let mut expr = LinearExpr::new();
            for i in 0..m {
                expr.add_term(x[i][j], weights[i]);
            }
            for i in 0..m {
                expr.add_term(x[i][j + 1], -weights[i]);
            }
            model.add_constraint(Constraint::greater_equal(format!("lex[{j}]"), expr, 0.0));
        }
    }

    model.set_objective(Objective::Minimize {
        expr: LinearExpr::sum([z]),
    });

    debug!(
        model = %model.name,
        ?symmetry,
        vars = model.variable_count(),
        rows = model.constraint_count(),
        "noise-dosage model built"
    );
    model
}
