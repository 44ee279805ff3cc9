//! Multi-constrained knapsack problem (MKP).
//!
//! Given items with values and per-dimension weights, choose a subset of
//! maximum total value that fits every dimension's capacity.
//!
//! # References
//!
//! Pedroso & Kubo (2012), "Mathematical Optimization: Solving Problems
//! using Python and Gurobi", multi-constrained knapsack model

mod builder;
mod types;

pub use builder::build_knapsack;
pub use types::{example, KnapsackData, KnapsackError, EXAMPLE_OPTIMUM};
