//! Multi-constrained knapsack formulation.

use super::types::{KnapsackData, KnapsackError};
use crate::mip::{Constraint, LinearExpr, MipModel, Objective, VarId, Variable};
use tracing::debug;

/// Builds the multi-constrained knapsack model.
///
/// ```text
/// max  sum_j v[j] x[j]
/// s.t. sum_j a[i,j] x[j] <= b[i]   for every dimension i
///      x[j] in {0, 1}
/// ```
///
/// Variables are named `x(j)` and constraints `Capacity(i)`.
pub fn build_knapsack(data: &KnapsackData) -> Result<MipModel, KnapsackError> {
    data.validate()?;

    let mut model = MipModel::new("mkp");
    let x: Vec<(usize, VarId)> = data
        .items()
        .map(|j| (j, model.add_var(Variable::binary(format!("x({j})")))))
        .collect();

    for i in data.dimensions() {
        let mut expr = LinearExpr::new();
        for &(j, var) in &x {
            expr.add_term(var, data.weight(i, j)?);
        }
        model.add_constraint(Constraint::less_equal(
            format!("Capacity({i})"),
            expr,
            data.capacities[&i],
        ));
    }

    let objective = LinearExpr::from_terms(x.iter().map(|&(j, var)| (var, data.values[&j])));
    model.set_objective(Objective::Maximize { expr: objective });

    debug!(
        items = x.len(),
        dimensions = model.constraint_count(),
        "knapsack model built"
    );
    Ok(model)
}
