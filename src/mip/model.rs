//! MIP model definition.

use super::variables::{VarId, VarType, Variable};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural problems detected by [`MipModel::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Names must be non-empty and free of whitespace.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Two variables share a name.
    #[error("duplicate variable: {0}")]
    DuplicateVariable(String),

    /// Two constraints share a name.
    #[error("duplicate constraint: {0}")]
    DuplicateConstraint(String),

    /// An expression references a variable the model does not own.
    #[error("undefined variable index {index} in {context}")]
    UndefinedVariable { index: usize, context: String },

    /// Lower bound exceeds upper bound, or a bound is NaN.
    #[error("invalid bounds [{lower}, {upper}] on variable {name}")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    /// Coefficient or right-hand side is NaN or infinite.
    #[error("non-finite value {value} in {context}")]
    NonFinite { value: f64, context: String },
}

/// A linear combination of variables.
///
/// Terms keep insertion order; repeated variables are allowed and are
/// summed when evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearExpr {
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Creates an expression from (variable, coefficient) pairs.
    pub fn from_terms(terms: impl IntoIterator<Item = (VarId, f64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// Sum of the given variables with unit coefficients.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self::from_terms(vars.into_iter().map(|v| (v, 1.0)))
    }

    /// Appends a term.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn with_term(mut self, var: VarId, coef: f64) -> Self {
        self.terms.push((var, coef));
        self
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression at `values`, indexed by [`VarId::index`].
    ///
    /// # Panics
    /// If a term references an index outside `values`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(v, c)| c * values[v.0]).sum()
    }

    /// Merges repeated variables, dropping zero coefficients.
    ///
    /// The result is ordered by first occurrence.
    pub fn compacted(&self) -> LinearExpr {
        let mut order: Vec<VarId> = Vec::new();
        let mut coefs: HashMap<VarId, f64> = HashMap::new();
        for &(v, c) in &self.terms {
            let entry = coefs.entry(v).or_insert_with(|| {
                order.push(v);
                0.0
            });
            *entry += c;
        }
        LinearExpr::from_terms(
            order
                .into_iter()
                .map(|v| (v, coefs[&v]))
                .filter(|&(_, c)| c != 0.0),
        )
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintSense {
    /// `expr <= rhs`
    LessEqual,
    /// `expr >= rhs`
    GreaterEqual,
    /// `expr == rhs`
    Equal,
}

impl ConstraintSense {
    /// Whether `lhs` satisfies the relation against `rhs` within `tol`.
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            ConstraintSense::LessEqual => lhs <= rhs + tol,
            ConstraintSense::GreaterEqual => lhs >= rhs - tol,
            ConstraintSense::Equal => (lhs - rhs).abs() <= tol,
        }
    }
}

/// A named linear constraint `expr (<=|>=|==) rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constraint {
    /// Constraint name.
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation.
    pub sense: ConstraintSense,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl Constraint {
    /// `expr <= rhs`
    pub fn less_equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// `expr >= rhs`
    pub fn greater_equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// `expr == rhs`
    pub fn equal(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Whether `values` satisfies this constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        self.sense.holds(self.expr.evaluate(values), self.rhs, tol)
    }
}

/// Objective function for the MIP model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Objective {
    /// Minimize a linear expression.
    Minimize {
        /// Objective expression.
        expr: LinearExpr,
    },

    /// Maximize a linear expression.
    Maximize {
        /// Objective expression.
        expr: LinearExpr,
    },
}

impl Objective {
    /// The objective expression regardless of sense.
    pub fn expr(&self) -> &LinearExpr {
        match self {
            Objective::Minimize { expr } | Objective::Maximize { expr } => expr,
        }
    }

    /// Whether this is a maximization objective.
    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize { .. })
    }

    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        if self.is_maximize() {
            candidate > incumbent
        } else {
            candidate < incumbent
        }
    }
}

/// Variable counts per domain type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarCounts {
    /// Number of binary variables.
    pub binary: usize,
    /// Number of general integer variables.
    pub integer: usize,
    /// Number of continuous variables.
    pub continuous: usize,
}

/// A mixed-integer linear model.
///
/// Contains variables, linear constraints, and an optional objective.
/// Variables and constraints keep insertion order, which fixes the
/// column and row order of serialized problem files.
///
/// # Examples
///
/// ```
/// use u_mipgen::mip::{Constraint, LinearExpr, MipModel, Objective, Variable};
///
/// let mut model = MipModel::new("example");
/// let x = model.add_var(Variable::binary("x"));
/// let y = model.add_var(Variable::integer("y", 0.0, 4.0));
/// model.add_constraint(Constraint::less_equal(
///     "cap",
///     LinearExpr::from_terms([(x, 2.0), (y, 1.0)]),
///     5.0,
/// ));
/// model.set_objective(Objective::Maximize { expr: LinearExpr::sum([x, y]) });
/// assert!(model.validate().is_ok());
/// assert_eq!(model.variable_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MipModel {
    /// Model name.
    pub name: String,
    /// Variables, indexed by [`VarId`].
    pub variables: Vec<Variable>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl MipModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a variable and returns its handle.
    pub fn add_var(&mut self, var: Variable) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(var);
        id
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Returns the variable behind a handle.
    pub fn var(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    /// Looks up a variable by name.
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .map(VarId)
    }

    /// Looks up a constraint by name.
    pub fn constraint_by_name(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Counts variables per domain type.
    pub fn count_by_type(&self) -> VarCounts {
        let mut counts = VarCounts::default();
        for v in &self.variables {
            match v.vtype {
                VarType::Binary => counts.binary += 1,
                VarType::Integer => counts.integer += 1,
                VarType::Continuous => counts.continuous += 1,
            }
        }
        counts
    }

    /// Validates the model for consistency.
    ///
    /// Checks names, bounds, coefficients, and that every referenced
    /// variable exists.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_name(&self.name)?;

        let mut seen = HashSet::new();
        for v in &self.variables {
            check_name(&v.name)?;
            if !seen.insert(v.name.as_str()) {
                return Err(ModelError::DuplicateVariable(v.name.clone()));
            }
            let bad_binary =
                v.vtype == VarType::Binary && (v.lower != 0.0 || v.upper != 1.0);
            if v.lower.is_nan() || v.upper.is_nan() || v.lower > v.upper || bad_binary {
                return Err(ModelError::InvalidBounds {
                    name: v.name.clone(),
                    lower: v.lower,
                    upper: v.upper,
                });
            }
        }

        let mut seen = HashSet::new();
        for c in &self.constraints {
            check_name(&c.name)?;
            if !seen.insert(c.name.as_str()) {
                return Err(ModelError::DuplicateConstraint(c.name.clone()));
            }
            self.check_expr(&c.expr, &c.name)?;
            if !c.rhs.is_finite() {
                return Err(ModelError::NonFinite {
                    value: c.rhs,
                    context: format!("rhs of {}", c.name),
                });
            }
        }

        if let Some(obj) = &self.objective {
            self.check_expr(obj.expr(), "objective")?;
        }
        Ok(())
    }

    fn check_expr(&self, expr: &LinearExpr, context: &str) -> Result<(), ModelError> {
        for &(v, c) in &expr.terms {
            if v.0 >= self.variables.len() {
                return Err(ModelError::UndefinedVariable {
                    index: v.0,
                    context: context.to_string(),
                });
            }
            if !c.is_finite() {
                return Err(ModelError::NonFinite {
                    value: c,
                    context: context.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether `values` respects every bound, integrality requirement,
    /// and constraint within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let within_domains = self.variables.iter().zip(values).all(|(v, &x)| {
            x >= v.lower - tol
                && x <= v.upper + tol
                && (!v.vtype.is_integral() || (x - x.round()).abs() <= tol)
        });
        within_domains && self.constraints.iter().all(|c| c.is_satisfied(values, tol))
    }

    /// Objective value at `values`, or `None` without an objective.
    pub fn objective_value(&self, values: &[f64]) -> Option<f64> {
        self.objective.as_ref().map(|o| o.expr().evaluate(values))
    }
}

fn check_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    Ok(())
}
