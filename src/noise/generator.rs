//! Randomized noise-dosage instance generation.

use super::config::{GeneratorConfig, GeneratorParams};
use super::instance::{InstanceError, NoiseDosage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;
use tracing::debug;

/// Errors raised by the instance generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The generator configuration failed validation.
    #[error("invalid generator config: {0}")]
    Config(String),

    /// Instance size parameters are unusable.
    #[error("invalid generator params: {0}")]
    Params(String),

    /// A derived distribution could not be constructed.
    #[error("invalid {what} distribution: {message}")]
    Distribution { what: &'static str, message: String },

    /// The generated data violated an instance invariant.
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Random source used for instance generation.
///
/// ChaCha8 output is fixed by its specification, so a seed maps to the
/// same instance on every platform and `rand` release.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws from `dist` until the sample is non-negative.
fn sample_non_negative<R: Rng>(dist: &Normal<f64>, rng: &mut R) -> f64 {
    loop {
        let x = dist.sample(rng);
        if x >= 0.0 {
            return x;
        }
    }
}

fn normal(what: &'static str, mean: f64, stdev: f64) -> Result<Normal<f64>, GeneratorError> {
    Normal::new(mean, stdev).map_err(|e| GeneratorError::Distribution {
        what,
        message: e.to_string(),
    })
}

/// Generates an instance, drawing every random value from `rng`.
///
/// Draw order: all cycle counts `d`, then all durations `t`, then all
/// noise dosages `alpha`.
///
/// - `d[i]` is uniform over `config.job_count_range`
/// - `t[i]` is normal with mean `utilization * n * hours / sum(d)` and
///   standard deviation `duration_stdev_ratio` times that mean
/// - `alpha[i]` is normal with `noise_mean` and `noise_stdev`
///
/// Negative draws of `t` and `alpha` are rejected and resampled.
pub fn generate_with_rng<R: Rng>(
    params: &GeneratorParams,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<NoiseDosage, GeneratorError> {
    config.validate().map_err(GeneratorError::Config)?;
    if params.n_machines == 0 || params.n_workers == 0 || params.worker_hours == 0 {
        return Err(GeneratorError::Params(format!(
            "machines, workers and hours must be positive, got {:?}",
            params
        )));
    }

    let m = params.n_machines;
    let available_hours = params.n_workers as f64 * params.worker_hours as f64;
    let target_hours = available_hours * config.utilization;

    let d: Vec<u64> = (0..m)
        .map(|_| rng.random_range(config.job_count_range.clone()))
        .collect();

    let total_jobs: u64 = d.iter().sum();
    let mean_duration = target_hours / total_jobs as f64;
    let duration = normal(
        "cycle duration",
        mean_duration,
        mean_duration * config.duration_stdev_ratio,
    )?;
    let t: Vec<f64> = (0..m).map(|_| sample_non_negative(&duration, rng)).collect();

    let noise = normal("noise dosage", config.noise_mean, config.noise_stdev)?;
    let alpha: Vec<f64> = (0..m).map(|_| sample_non_negative(&noise, rng)).collect();

    debug!(
        name = %params.name(),
        total_jobs,
        mean_duration,
        "noise-dosage instance generated"
    );

    Ok(NoiseDosage::new(
        params.name(),
        m,
        params.n_workers,
        alpha,
        d,
        t,
        params.worker_hours,
    )?)
}

/// Generates an instance from a fresh generator seeded with `params.seed`.
///
/// Identical `params` and `config` always give identical instances.
pub fn generate_instance(
    params: &GeneratorParams,
    config: &GeneratorConfig,
) -> Result<NoiseDosage, GeneratorError> {
    let mut rng = seeded_rng(params.seed);
    generate_with_rng(params, config, &mut rng)
}
