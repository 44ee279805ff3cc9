//! Batch drivers that fill an instance directory.

use super::output::{write_once, BatchError, BatchReport, OutputDir, WriteOutcome};
use crate::covering::{build_covering_design, CoveringGrid, CoveringParams};
use crate::format::{write_to, ProblemFormat};
use crate::noise::{
    build_noise_dosage, generate_instance, read_noise_dosage, GeneratorConfig, GeneratorError,
    GeneratorParams, SymmetryHandling,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every job and collects the outcomes in job order.
///
/// Stops at the first error. With the `parallel` feature, jobs run on the
/// rayon pool and jobs already in flight may still complete.
fn run_jobs<J, F>(jobs: &[J], run: F) -> Result<BatchReport, BatchError>
where
    J: Sync,
    F: Fn(&J) -> Result<(PathBuf, WriteOutcome), BatchError> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let outcomes: Vec<(PathBuf, WriteOutcome)> =
        jobs.par_iter().map(&run).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<(PathBuf, WriteOutcome)> =
        jobs.iter().map(&run).collect::<Result<_, _>>()?;

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        report.record(path, outcome);
    }
    Ok(report)
}

/// Writes `{name}.cip` for every tuple of `grid` into `out_dir`.
///
/// Models are only built for files that do not exist yet.
pub fn generate_covering_designs(
    out_dir: &OutputDir,
    grid: &CoveringGrid,
) -> Result<BatchReport, BatchError> {
    let jobs: Vec<CoveringParams> = grid.params();
    info!(count = jobs.len(), dir = %out_dir.path().display(), "covering designs");

    let report = run_jobs(&jobs, |params| {
        let path = out_dir.join(format!("{}.{}", params.name(), ProblemFormat::Cip.extension()));
        let outcome = write_once(&path, |w| {
            let model = build_covering_design(params);
            write_to(&model, ProblemFormat::Cip, w)?;
            Ok(())
        })?;
        Ok((path, outcome))
    })?;
    summarize("covering designs", &report);
    Ok(report)
}

/// Writes one instance data file (no extension) per entry of `grid`.
pub fn generate_noise_data(
    out_dir: &OutputDir,
    grid: &[GeneratorParams],
    config: &GeneratorConfig,
) -> Result<BatchReport, BatchError> {
    config.validate().map_err(GeneratorError::Config)?;
    info!(count = grid.len(), dir = %out_dir.path().display(), "noise-dosage data");

    let report = run_jobs(grid, |params| {
        let path = out_dir.join(params.name());
        let outcome = write_once(&path, |w| {
            let inst = generate_instance(params, config)?;
            inst.write(w).map_err(|e| BatchError::io(&path, e))
        })?;
        Ok((path, outcome))
    })?;
    summarize("noise-dosage data", &report);
    Ok(report)
}

struct NoiseJob {
    data: PathBuf,
    output: PathBuf,
    symmetry: SymmetryHandling,
}

/// Instance files in `data_dir`: regular files without an extension,
/// sorted by name.
pub fn instance_files(data_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !data_dir.is_dir() {
        return Err(BatchError::MissingDataDir(data_dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(|e| BatchError::io(data_dir, e))? {
        let entry = entry.map_err(|e| BatchError::io(data_dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_none() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Writes `{stem}.mps` and `{stem}_sym.mps` for every instance file in
/// `data_dir`.
pub fn generate_noise_models(
    data_dir: &Path,
    out_dir: &OutputDir,
) -> Result<BatchReport, BatchError> {
    let mut jobs = Vec::new();
    for data in instance_files(data_dir)? {
        let Some(stem) = data.file_name().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let ext = ProblemFormat::Mps.extension();
        jobs.push(NoiseJob {
            output: out_dir.join(format!("{stem}.{ext}")),
            data: data.clone(),
            symmetry: SymmetryHandling::None,
        });
        jobs.push(NoiseJob {
            output: out_dir.join(format!("{stem}_sym.{ext}")),
            data,
            symmetry: SymmetryHandling::SheraliSmith,
        });
    }
    info!(count = jobs.len(), dir = %out_dir.path().display(), "noise-dosage models");

    let report = run_jobs(&jobs, |job| {
        let outcome = write_once(&job.output, |w| {
            let inst = read_noise_dosage(&job.data)?;
            let model = build_noise_dosage(&inst, job.symmetry);
            write_to(&model, ProblemFormat::Mps, w)?;
            Ok(())
        })?;
        Ok((job.output.clone(), outcome))
    })?;
    summarize("noise-dosage models", &report);
    Ok(report)
}

fn summarize(what: &str, report: &BatchReport) {
    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "{what} done"
    );
}
