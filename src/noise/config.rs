//! Instance generator configuration.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size and seed of one generated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorParams {
    /// Number of machines `m`.
    pub n_machines: usize,
    /// Number of workers `n`.
    pub n_workers: usize,
    /// Hours available per worker.
    pub worker_hours: u64,
    /// Seed of the random source.
    pub seed: u64,
}

impl GeneratorParams {
    pub fn new(n_machines: usize, n_workers: usize, worker_hours: u64, seed: u64) -> Self {
        Self {
            n_machines,
            n_workers,
            worker_hours,
            seed,
        }
    }

    /// Instance name, e.g. `noise3_8_480_s0`.
    pub fn name(&self) -> String {
        format!(
            "noise{}_{}_{}_s{}",
            self.n_machines, self.n_workers, self.worker_hours, self.seed
        )
    }
}

/// Distribution settings for the noise-dosage instance generator.
///
/// # Examples
///
/// ```
/// use u_mipgen::noise::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_job_count_range(2..=6)
///     .with_utilization(0.75)
///     .with_noise_distribution(20.0, 5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Inclusive range of work cycles per machine.
    pub job_count_range: RangeInclusive<u64>,

    /// Fraction of the total worker hours the jobs should consume on
    /// average. Sets the mean cycle duration.
    pub utilization: f64,

    /// Cycle-duration standard deviation as a fraction of its mean.
    pub duration_stdev_ratio: f64,

    /// Mean noise dosage per work cycle.
    pub noise_mean: f64,

    /// Standard deviation of the noise dosage per work cycle.
    pub noise_stdev: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            job_count_range: 4..=10,
            utilization: 0.5,
            duration_stdev_ratio: 0.2,
            noise_mean: 18.0,
            noise_stdev: 4.0,
        }
    }
}

impl GeneratorConfig {
    /// Sets the inclusive range of work cycles per machine.
    pub fn with_job_count_range(mut self, range: RangeInclusive<u64>) -> Self {
        self.job_count_range = range;
        self
    }

    /// Sets the target fraction of worker hours consumed by jobs.
    pub fn with_utilization(mut self, utilization: f64) -> Self {
        self.utilization = utilization;
        self
    }

    /// Sets the cycle-duration spread relative to its mean.
    pub fn with_duration_stdev_ratio(mut self, ratio: f64) -> Self {
        self.duration_stdev_ratio = ratio;
        self
    }

    /// Sets the mean and standard deviation of the noise dosage.
    pub fn with_noise_distribution(mut self, mean: f64, stdev: f64) -> Self {
        self.noise_mean = mean;
        self.noise_stdev = stdev;
        self
    }

    /// Validates the configuration.
    ///
    /// Every draw is resampled until non-negative, so each distribution
    /// must put mass on `[0, inf)`: the means must be positive.
    pub fn validate(&self) -> Result<(), String> {
        if self.job_count_range.is_empty() {
            return Err("job_count_range must not be empty".into());
        }
        if *self.job_count_range.start() == 0 {
            // an all-zero draw leaves no hours to spread over cycles
            return Err(format!(
                "job_count_range must start at 1 or more, got {:?}",
                self.job_count_range
            ));
        }
        if !(self.utilization.is_finite() && self.utilization > 0.0) {
            return Err(format!(
                "utilization must be positive, got {}",
                self.utilization
            ));
        }
        if !(self.duration_stdev_ratio.is_finite() && self.duration_stdev_ratio >= 0.0) {
            return Err(format!(
                "duration_stdev_ratio must be non-negative, got {}",
                self.duration_stdev_ratio
            ));
        }
        if !(self.noise_mean.is_finite() && self.noise_mean > 0.0) {
            return Err(format!("noise_mean must be positive, got {}", self.noise_mean));
        }
        if !(self.noise_stdev.is_finite() && self.noise_stdev >= 0.0) {
            return Err(format!(
                "noise_stdev must be non-negative, got {}",
                self.noise_stdev
            ));
        }
        Ok(())
    }
}

/// Machine/worker grid used by the batch generator.
///
/// Pairs `(k + 3, k + 8)` for `k` in `0..9`, each with seeds `0..5` and
/// 480 hours per worker.
pub fn default_grid() -> Vec<GeneratorParams> {
    let mut out = Vec::new();
    for k in 0..9 {
        for seed in 0..5 {
            out.push(GeneratorParams::new(k + 3, k + 8, 480, seed));
        }
    }
    out
}
