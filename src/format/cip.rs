//! CIP (constraint integer program) listing writer.

use super::{fmt_num, FormatError};
use crate::mip::{ConstraintSense, MipModel, VarType};
use std::io::Write;

fn fmt_bound(x: f64) -> String {
    if x == f64::INFINITY {
        "+inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        fmt_num(x)
    }
}

fn type_tag(vtype: VarType) -> (&'static str, char) {
    match vtype {
        VarType::Binary => ("binary", 'B'),
        VarType::Integer => ("integer", 'I'),
        VarType::Continuous => ("continuous", 'C'),
    }
}

/// Writes `model` as a CIP listing.
///
/// The model is expected to be valid; use [`super::write_to`] to validate
/// first.
pub fn write_cip<W: Write>(model: &MipModel, w: &mut W) -> Result<(), FormatError> {
    let counts = model.count_by_type();
    let ncons = model.constraint_count();

    writeln!(w, "STATISTICS")?;
    writeln!(w, "  Problem name     : {}", model.name)?;
    writeln!(
        w,
        "  Variables        : {} ({} binary, {} integer, 0 implicit integer, {} continuous)",
        model.variable_count(),
        counts.binary,
        counts.integer,
        counts.continuous
    )?;
    writeln!(w, "  Constraints      : {ncons} initial, {ncons} maximal")?;

    writeln!(w, "OBJECTIVE")?;
    let sense = match &model.objective {
        Some(o) if o.is_maximize() => "maximize",
        _ => "minimize",
    };
    writeln!(w, "  Sense            : {sense}")?;

    let mut obj = vec![0.0; model.variable_count()];
    if let Some(o) = &model.objective {
        for (v, coef) in o.expr().compacted().terms {
            obj[v.index()] = coef;
        }
    }

    if !model.variables.is_empty() {
        writeln!(w, "VARIABLES")?;
        for (var, coef) in model.variables.iter().zip(&obj) {
            let (tag, _) = type_tag(var.vtype);
            writeln!(
                w,
                "  [{tag}] <{}>: obj={}, original bounds=[{},{}]",
                var.name,
                fmt_num(*coef),
                fmt_bound(var.lower),
                fmt_bound(var.upper)
            )?;
        }
    }

    if !model.constraints.is_empty() {
        writeln!(w, "CONSTRAINTS")?;
        for c in &model.constraints {
            write!(w, "  [linear] <{}>:", c.name)?;
            let expr = c.expr.compacted();
            if expr.is_empty() {
                write!(w, " 0")?;
            }
            for (v, coef) in expr.terms {
                let var = &model.variables[v.index()];
                let (_, short) = type_tag(var.vtype);
                let sign = if coef < 0.0 { '-' } else { '+' };
                write!(w, " {sign}{}<{}>[{short}]", fmt_num(coef.abs()), var.name)?;
            }
            let op = match c.sense {
                ConstraintSense::LessEqual => "<=",
                ConstraintSense::GreaterEqual => ">=",
                ConstraintSense::Equal => "==",
            };
            writeln!(w, " {op} {};", fmt_num(c.rhs))?;
        }
    }

    writeln!(w, "END")?;
    Ok(())
}
