//! Free-format MPS writer.
//!
//! Sections, in order: `NAME`, `OBJSENSE` (maximization only), `ROWS`,
//! `COLUMNS`, `RHS`, `BOUNDS`, `ENDATA`. Integer and binary columns are
//! wrapped in `MARKER 'MARKER' 'INTORG'` / `'INTEND'` lines. Integer
//! columns without a finite upper bound get an explicit `PL` bound, since
//! some readers default integer columns to `[0, 1]`.

use super::{fmt_num, FormatError};
use crate::mip::{ConstraintSense, MipModel, VarType, Variable};
use std::io::Write;

/// Name of the objective row.
pub const OBJECTIVE_ROW: &str = "OBJ";

const RHS_SET: &str = "RHS";
const BOUND_SET: &str = "BND";

/// Writes `model` as free-format MPS.
///
/// The model is expected to be valid; use [`super::write_to`] to validate
/// first.
pub fn write_mps<W: Write>(model: &MipModel, w: &mut W) -> Result<(), FormatError> {
    if model.constraint_by_name(OBJECTIVE_ROW).is_some() {
        return Err(FormatError::ReservedName(OBJECTIVE_ROW.to_string()));
    }

    writeln!(w, "NAME          {}", model.name)?;
    if model.objective.as_ref().is_some_and(|o| o.is_maximize()) {
        writeln!(w, "OBJSENSE")?;
        writeln!(w, "    MAX")?;
    }

    writeln!(w, "ROWS")?;
    writeln!(w, " N  {OBJECTIVE_ROW}")?;
    for c in &model.constraints {
        let tag = match c.sense {
            ConstraintSense::LessEqual => 'L',
            ConstraintSense::GreaterEqual => 'G',
            ConstraintSense::Equal => 'E',
        };
        writeln!(w, " {tag}  {}", c.name)?;
    }

    // Transpose rows into per-column entries
    let mut columns: Vec<Vec<(&str, f64)>> = vec![Vec::new(); model.variable_count()];
    if let Some(obj) = &model.objective {
        for (v, coef) in obj.expr().compacted().terms {
            columns[v.index()].push((OBJECTIVE_ROW, coef));
        }
    }
    for c in &model.constraints {
        for (v, coef) in c.expr.compacted().terms {
            columns[v.index()].push((c.name.as_str(), coef));
        }
    }

    writeln!(w, "COLUMNS")?;
    let mut in_int_block = false;
    let mut marker = 0usize;
    for (var, entries) in model.variables.iter().zip(&columns) {
        let integral = var.vtype.is_integral();
        if integral != in_int_block {
            let tag = if integral { "INTORG" } else { "INTEND" };
            writeln!(w, "    MARKER{marker:04}  'MARKER'  '{tag}'")?;
            marker += 1;
            in_int_block = integral;
        }
        if entries.is_empty() {
            // keep the column declared
            writeln!(w, "    {}  {OBJECTIVE_ROW}  0", var.name)?;
        }
        for (row, coef) in entries {
            writeln!(w, "    {}  {}  {}", var.name, row, fmt_num(*coef))?;
        }
    }
    if in_int_block {
        writeln!(w, "    MARKER{marker:04}  'MARKER'  'INTEND'")?;
    }

    writeln!(w, "RHS")?;
    for c in model.constraints.iter().filter(|c| c.rhs != 0.0) {
        writeln!(w, "    {RHS_SET}  {}  {}", c.name, fmt_num(c.rhs))?;
    }

    writeln!(w, "BOUNDS")?;
    for var in &model.variables {
        write_bounds(w, var)?;
    }

    writeln!(w, "ENDATA")?;
    Ok(())
}

fn write_bounds<W: Write>(w: &mut W, var: &Variable) -> Result<(), FormatError> {
    let name = &var.name;
    if var.vtype == VarType::Binary {
        writeln!(w, " BV {BOUND_SET}  {name}")?;
        return Ok(());
    }
    if var.lower == var.upper {
        writeln!(w, " FX {BOUND_SET}  {name}  {}", fmt_num(var.lower))?;
        return Ok(());
    }
    if var.lower == f64::NEG_INFINITY && var.upper == f64::INFINITY {
        writeln!(w, " FR {BOUND_SET}  {name}")?;
        return Ok(());
    }

    if var.lower == f64::NEG_INFINITY {
        writeln!(w, " MI {BOUND_SET}  {name}")?;
    } else if var.lower != 0.0 {
        writeln!(w, " LO {BOUND_SET}  {name}  {}", fmt_num(var.lower))?;
    }

    if var.upper.is_finite() {
        writeln!(w, " UP {BOUND_SET}  {name}  {}", fmt_num(var.upper))?;
    } else if var.vtype == VarType::Integer {
        writeln!(w, " PL {BOUND_SET}  {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::{Constraint, LinearExpr, Objective};

    fn render(model: &MipModel) -> String {
        let mut out = Vec::new();
        write_mps(model, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_minimal_mixed_model() {
        let mut model = MipModel::new("mixed");
        let x = model.add_var(Variable::integer("x", 0.0, f64::INFINITY));
        let z = model.add_var(Variable::continuous("z", 0.0, f64::INFINITY));
        model.add_constraint(Constraint::greater_equal(
            "dose",
            LinearExpr::from_terms([(z, 1.0), (x, -2.5)]),
            0.0,
        ));
        model.add_constraint(Constraint::equal("fix", LinearExpr::sum([x]), 3.0));
        model.set_objective(Objective::Minimize {
            expr: LinearExpr::sum([z]),
        });

        let expected = "\
NAME          mixed
ROWS
 N  OBJ
 G  dose
 E  fix
COLUMNS
    MARKER0000  'MARKER'  'INTORG'
    x  dose  -2.5
    x  fix  1
    MARKER0001  'MARKER'  'INTEND'
    z  OBJ  1
    z  dose  1
RHS
    RHS  fix  3
BOUNDS
 PL BND  x
ENDATA
";
        assert_eq!(render(&model), expected);
    }

    #[test]
    fn test_maximize_and_binary_bounds() {
        let mut model = MipModel::new("max");
        let b = model.add_var(Variable::binary("b"));
        model.add_constraint(Constraint::less_equal("cap", LinearExpr::sum([b]), 1.0));
        model.set_objective(Objective::Maximize {
            expr: LinearExpr::from_terms([(b, 16.0)]),
        });

        let text = render(&model);
        assert!(text.contains("OBJSENSE\n    MAX\n"));
        assert!(text.contains(" BV BND  b\n"));
        // integer block closed before RHS
        assert!(text.contains("'INTEND'\nRHS\n"));
    }

    #[test]
    fn test_bound_kinds() {
        let mut model = MipModel::new("bounds");
        model.add_var(Variable::continuous("free", f64::NEG_INFINITY, f64::INFINITY));
        model.add_var(Variable::continuous("neg", f64::NEG_INFINITY, 4.0));
        model.add_var(Variable::continuous("fixed", 2.0, 2.0));
        model.add_var(Variable::integer("shift", 1.0, 6.0));

        let text = render(&model);
        assert!(text.contains(" FR BND  free\n"));
        assert!(text.contains(" MI BND  neg\n UP BND  neg  4\n"));
        assert!(text.contains(" FX BND  fixed  2\n"));
        assert!(text.contains(" LO BND  shift  1\n UP BND  shift  6\n"));
    }

    #[test]
    fn test_empty_column_declared() {
        let mut model = MipModel::new("empty");
        model.add_var(Variable::continuous("lonely", 0.0, 1.0));
        let text = render(&model);
        assert!(text.contains("    lonely  OBJ  0\n"));
    }

    #[test]
    fn test_reserved_objective_row() {
        let mut model = MipModel::new("clash");
        let x = model.add_var(Variable::binary("x"));
        model.add_constraint(Constraint::less_equal("OBJ", LinearExpr::sum([x]), 1.0));
        let mut out = Vec::new();
        assert!(matches!(
            write_mps(&model, &mut out),
            Err(FormatError::ReservedName(_))
        ));
    }
}
