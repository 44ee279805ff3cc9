//! Covering-design formulation (Margot 2003).

use super::combinatorics::{combinations, is_sorted_subset};
use super::types::CoveringParams;
use crate::mip::{Constraint, LinearExpr, MipModel, Objective, VarId, Variable};
use tracing::debug;

fn join(entries: &[usize]) -> String {
    entries
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the covering-design integer program.
///
/// ```text
/// min  sum_K x[K]
/// s.t. sum_{K ⊇ T} x[K] >= lambda   for every t-subset T
///      x[K] in {0, .., lambda}      for every k-subset K
/// ```
///
/// Variables are named `x[j:a,b,..]` after the `j`-th `k`-subset, and
/// constraints `cov[i:a,b,..]` after the `i`-th `t`-subset. The model has
/// `C(v, k)` variables and `C(v, t)` constraints.
pub fn build_covering_design(params: &CoveringParams) -> MipModel {
    let lambda = params.lambda() as f64;
    let blocks = combinations(params.v(), params.k());
    let targets = combinations(params.v(), params.t());

    let mut model = MipModel::new(params.name());

    let x: Vec<VarId> = blocks
        .iter()
        .enumerate()
        .map(|(j, block)| {
            model.add_var(Variable::integer(
                format!("x[{j}:{}]", join(block)),
                0.0,
                lambda,
            ))
        })
        .collect();

    for (i, target) in targets.iter().enumerate() {
        let covering = blocks
            .iter()
            .zip(&x)
            .filter(|(block, _)| is_sorted_subset(target.as_slice(), block.as_slice()))
            .map(|(_, &var)| var);
        model.add_constraint(Constraint::greater_equal(
            format!("cov[{i}:{}]", join(target)),
            LinearExpr::sum(covering),
            lambda,
        ));
    }

    model.set_objective(Objective::Minimize {
        expr: LinearExpr::sum(x.iter().copied()),
    });

    debug!(
        model = %model.name,
        blocks = model.variable_count(),
        targets = model.constraint_count(),
        "covering design model built"
    );
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covering::binomial;
    use crate::mip::{EnumerationSolver, MipSolver, SolverConfig, SolverStatus, VarType};

    #[test]
    fn test_counts_match_binomials() {
        for (v, k, t) in [(5, 3, 2), (6, 4, 1), (7, 3, 2), (4, 1, 0)] {
            let params = CoveringParams::new(2, v, k, t).unwrap();
            let model = build_covering_design(&params);
            assert_eq!(model.variable_count() as u64, binomial(v, k));
            assert_eq!(model.constraint_count() as u64, binomial(v, t));
            assert!(model.validate().is_ok());
        }
    }

    #[test]
    fn test_names_and_bounds() {
        let params = CoveringParams::new(3, 4, 2, 1).unwrap();
        let model = build_covering_design(&params);
        assert_eq!(model.name, "cov_3(4,2,1)");
        assert_eq!(model.variables[0].name, "x[0:0,1]");
        assert_eq!(model.variables[5].name, "x[5:2,3]");
        assert!(model
            .variables
            .iter()
            .all(|v| v.vtype == VarType::Integer && v.lower == 0.0 && v.upper == 3.0));

        let c = model.constraint_by_name("cov[2:2]").unwrap();
        assert_eq!(c.rhs, 3.0);
        // blocks containing 2: {0,2}, {1,2}, {2,3}
        let members: Vec<usize> = c.expr.terms.iter().map(|(v, _)| v.index()).collect();
        assert_eq!(members, vec![1, 3, 5]);
    }

    #[test]
    fn test_each_row_has_block_count() {
        // every t-subset lies in C(v-t, k-t) blocks
        let params = CoveringParams::new(2, 6, 3, 2).unwrap();
        let model = build_covering_design(&params);
        for c in &model.constraints {
            assert_eq!(c.expr.len() as u64, binomial(4, 1));
        }
    }

    #[test]
    fn test_t_zero_single_row() {
        let params = CoveringParams::new(2, 4, 2, 0).unwrap();
        let model = build_covering_design(&params);
        assert_eq!(model.constraint_count(), 1);
        assert_eq!(model.constraints[0].name, "cov[0:]");
        assert_eq!(model.constraints[0].expr.len(), 6);
    }

    #[test]
    fn test_small_design_optimum() {
        // C(4,2,1): two disjoint pairs cover all points once
        let params = CoveringParams::new(1, 4, 2, 1).unwrap();
        let model = build_covering_design(&params);
        let sol = EnumerationSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.objective_value, Some(2.0));

        // doubling lambda doubles the optimum
        let params = CoveringParams::new(2, 4, 2, 1).unwrap();
        let model = build_covering_design(&params);
        let sol = EnumerationSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.objective_value, Some(4.0));
    }
}
