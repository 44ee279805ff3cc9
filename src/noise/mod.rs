//! Noise-dosage worker scheduling.
//!
//! Workers perform work cycles on noisy machines. Every machine needs a
//! fixed number of cycles, every worker has an hour budget, and the goal
//! is to minimize the largest noise dosage any single worker receives.
//!
//! # Key Components
//!
//! - **Instance**: [`NoiseDosage`]: validated data record with a flat text
//!   format ([`parse_noise_dosage`], [`read_noise_dosage`])
//! - **Generator**: [`generate_instance`]: seeded random instances
//! - **Model**: [`build_noise_dosage`]: MIP formulation, optionally with
//!   lexicographic symmetry-breaking rows
//!
//! # References
//!
//! Sherali & Smith (2001), "Improving discrete model representations via
//! symmetry considerations"

mod builder;
mod config;
mod generator;
mod instance;

pub use builder::{build_noise_dosage, cycle_upper_bounds, symmetry_base, SymmetryHandling};
pub use config::{default_grid, GeneratorConfig, GeneratorParams};
pub use generator::{generate_instance, generate_with_rng, seeded_rng, GeneratorError};
pub use instance::{
    format_sci, parse_noise_dosage, read_noise_dosage, InstanceError, NoiseDosage,
    MAX_WORK_CYCLES,
};
