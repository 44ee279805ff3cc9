//! Benchmark MIP instance generation.
//!
//! Builds mixed-integer linear models for classic benchmark families and
//! writes them as solver-readable problem files:
//!
//! - **MIP**: Solver-agnostic modeling layer (variables, linear
//!   constraints, objective) with a [`mip::MipSolver`] seam and a small
//!   exhaustive reference solver.
//! - **Format**: Free MPS and CIP writers.
//! - **Knapsack**: Multi-constrained knapsack formulation.
//! - **Covering**: `lambda`-fold `(v, k, t)` covering designs.
//! - **Noise**: Noise-dosage worker scheduling: instance data format,
//!   seeded random generator, and a formulation with optional
//!   symmetry-breaking rows.
//! - **Batch**: Write-once drivers that fill instance directories.
//!
//! # Architecture
//!
//! Model builders are pure functions from validated parameters to a
//! [`mip::MipModel`]. Solving is out of scope beyond verification: any
//! backend plugs in behind [`mip::MipSolver`], and the file writers are
//! the primary hand-off to external solvers.

pub mod batch;
pub mod covering;
pub mod format;
pub mod knapsack;
pub mod mip;
pub mod noise;
