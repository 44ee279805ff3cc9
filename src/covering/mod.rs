//! Covering designs.
//!
//! A `lambda`-fold `(v, k, t)` covering design is a multiset of
//! `k`-subsets (blocks) of a `v`-set such that every `t`-subset lies in at
//! least `lambda` blocks. The smallest such multiset is found by an
//! integer program with one variable per candidate block and one
//! covering row per `t`-subset.
//!
//! # References
//!
//! Margot (2003), "Small covering designs by branch-and-cut"

mod builder;
mod combinatorics;
mod types;

pub use builder::build_covering_design;
pub use combinatorics::{binomial, combinations, is_sorted_subset};
pub use types::{CoveringError, CoveringGrid, CoveringParams};
