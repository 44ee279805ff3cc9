//! Covering-design parameters.

use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rejected covering-design parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoveringError {
    /// The parameters violate `v > k > t`.
    #[error("covering design requires v > k > t, got v={v}, k={k}, t={t}")]
    InvalidOrder { v: usize, k: usize, t: usize },

    /// Zero multiplicity makes every constraint trivial.
    #[error("covering multiplicity must be positive")]
    ZeroMultiplicity,
}

/// Parameters of a `lambda`-fold `(v, k, t)` covering design.
///
/// Every `t`-subset of a `v`-set must be contained in at least `lambda`
/// of the chosen `k`-subsets (blocks, counted with multiplicity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoveringParams {
    lambda: usize,
    v: usize,
    k: usize,
    t: usize,
}

impl CoveringParams {
    /// Validates `v > k > t` and `lambda >= 1`.
    pub fn new(lambda: usize, v: usize, k: usize, t: usize) -> Result<Self, CoveringError> {
        if !(v > k && k > t) {
            return Err(CoveringError::InvalidOrder { v, k, t });
        }
        if lambda == 0 {
            return Err(CoveringError::ZeroMultiplicity);
        }
        Ok(Self { lambda, v, k, t })
    }

    /// Required coverage multiplicity.
    pub fn lambda(&self) -> usize {
        self.lambda
    }

    /// Ground-set size.
    pub fn v(&self) -> usize {
        self.v
    }

    /// Block size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Size of the subsets to cover.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Model and file stem, e.g. `cov_2(7,3,2)`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CoveringParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cov_{}({},{},{})", self.lambda, self.v, self.k, self.t)
    }
}

/// Cartesian grid of covering-design parameters.
///
/// Iterates `lambda`, then `v`, `k`, `t` (innermost), yielding only the
/// tuples that satisfy `v > k > t`.
#[derive(Debug, Clone)]
pub struct CoveringGrid {
    /// Multiplicities to generate.
    pub lambdas: RangeInclusive<usize>,
    /// Shared range for `v`, `k`, and `t`.
    pub sizes: RangeInclusive<usize>,
}

impl Default for CoveringGrid {
    fn default() -> Self {
        Self {
            lambdas: 2..=3,
            sizes: 1..=12,
        }
    }
}

impl CoveringGrid {
    /// Sets the multiplicities to generate.
    pub fn with_lambdas(mut self, lambdas: RangeInclusive<usize>) -> Self {
        self.lambdas = lambdas;
        self
    }

    /// Sets the shared range for `v`, `k`, and `t`.
    pub fn with_sizes(mut self, sizes: RangeInclusive<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Valid parameter tuples in generation order.
    pub fn params(&self) -> Vec<CoveringParams> {
        let mut out = Vec::new();
        for lambda in self.lambdas.clone() {
            for v in self.sizes.clone() {
                for k in self.sizes.clone() {
                    for t in self.sizes.clone() {
                        if let Ok(p) = CoveringParams::new(lambda, v, k, t) {
                            out.push(p);
                        }
                    }
                }
            }
        }
        out
    }
}
