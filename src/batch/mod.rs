//! Batch drivers that generate instance libraries on disk.
//!
//! Every output file is created exclusively: files that already exist are
//! skipped, so interrupted runs can simply be restarted and concurrent runs
//! never clobber each other.
//!
//! # Drivers
//!
//! - [`generate_covering_designs`]: one CIP file per covering-design tuple
//! - [`generate_noise_data`]: one instance data file per generator tuple
//! - [`generate_noise_models`]: plain and symmetry-broken MPS files for
//!   every instance data file in a directory

mod output;
mod runner;

pub use output::{write_once, BatchError, BatchReport, OutputDir, WriteOutcome};
pub use runner::{
    generate_covering_designs, generate_noise_data, generate_noise_models, instance_files,
};
