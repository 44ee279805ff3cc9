//! MIP variable types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Domain type of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VarType {
    /// 0/1 variable.
    Binary,
    /// General integer variable.
    Integer,
    /// Real-valued variable.
    Continuous,
}

impl VarType {
    /// Whether the variable must take integral values.
    pub fn is_integral(self) -> bool {
        !matches!(self, VarType::Continuous)
    }
}

/// Handle to a variable inside a [`MipModel`](super::MipModel).
///
/// Handles are plain indices in insertion order and are only meaningful
/// for the model that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in the model.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A decision variable with a domain `[lower, upper]`.
///
/// Bounds may be infinite. Binary variables always carry `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Domain type.
    pub vtype: VarType,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Variable {
    /// Creates a binary variable.
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vtype: VarType::Binary,
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Creates an integer variable with the given bounds.
    pub fn integer(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            vtype: VarType::Integer,
            lower,
            upper,
        }
    }

    /// Creates a continuous variable with the given bounds.
    pub fn continuous(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            vtype: VarType::Continuous,
            lower,
            upper,
        }
    }

    /// Whether the domain is finite on both sides.
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Number of integral values in the domain, if finite.
    ///
    /// Returns `None` for continuous or unbounded variables.
    pub fn domain_size(&self) -> Option<u64> {
        if !self.vtype.is_integral() || !self.is_bounded() {
            return None;
        }
        let lo = self.lower.ceil();
        let hi = self.upper.floor();
        if hi < lo {
            return Some(0);
        }
        Some((hi - lo) as u64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_var() {
        let b = Variable::binary("flag");
        assert_eq!(b.vtype, VarType::Binary);
        assert_eq!(b.lower, 0.0);
        assert_eq!(b.upper, 1.0);
        assert_eq!(b.domain_size(), Some(2));
    }

    #[test]
    fn test_integer_var() {
        let v = Variable::integer("x", 0.0, 10.0);
        assert!(v.is_bounded());
        assert_eq!(v.domain_size(), Some(11));

        let open = Variable::integer("y", 0.0, f64::INFINITY);
        assert!(!open.is_bounded());
        assert_eq!(open.domain_size(), None);
    }

    #[test]
    fn test_continuous_var() {
        let z = Variable::continuous("z", 0.0, 5.0);
        assert!(!z.vtype.is_integral());
        assert_eq!(z.domain_size(), None);
    }

    #[test]
    fn test_fractional_bounds_domain() {
        let v = Variable::integer("x", 0.5, 2.5);
        assert_eq!(v.domain_size(), Some(2));

        let empty = Variable::integer("e", 0.2, 0.8);
        assert_eq!(empty.domain_size(), Some(0));
    }
}
