use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_mipgen::batch::{self, OutputDir};
use u_mipgen::covering::CoveringGrid;
use u_mipgen::format::write_problem;
use u_mipgen::knapsack::{build_knapsack, example};
use u_mipgen::mip::{EnumerationSolver, MipSolver, SolverConfig};
use u_mipgen::noise::{default_grid, GeneratorConfig};

/// Builds benchmark MIP models and writes them as problem files.
#[derive(Parser, Debug)]
#[command(name = "u-mipgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the multi-constrained knapsack example.
    Knapsack {
        /// Problem file to write; the extension selects the format.
        #[arg(long, default_value = "mkp.mps")]
        output: PathBuf,

        /// Solve the example by enumeration and print the optimum.
        #[arg(long)]
        solve: bool,
    },

    /// Generate the covering-design library into `BASE_DIR/instances`.
    Covering {
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Generate noise-dosage instance data files.
    NoiseData {
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,

        /// Output directory, relative to the base directory.
        #[arg(short = 'd', long, default_value = "data_generated")]
        data_dir: PathBuf,
    },

    /// Build noise-dosage models for every data file into
    /// `BASE_DIR/instances`.
    Noise {
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,

        /// Input directory, relative to the base directory.
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Knapsack { output, solve } => knapsack(output, solve),
        Command::Covering { base_dir } => {
            let out = OutputDir::prepare(base_dir.join("instances"))
                .context("preparing covering output directory")?;
            batch::generate_covering_designs(&out, &CoveringGrid::default())
                .context("generating covering designs")?;
            Ok(())
        }
        Command::NoiseData { base_dir, data_dir } => {
            let out = OutputDir::prepare(base_dir.join(data_dir))
                .context("preparing noise data directory")?;
            batch::generate_noise_data(&out, &default_grid(), &GeneratorConfig::default())
                .context("generating noise-dosage data")?;
            Ok(())
        }
        Command::Noise { base_dir, data_dir } => {
            let out = OutputDir::prepare(base_dir.join("instances"))
                .context("preparing noise model output directory")?;
            batch::generate_noise_models(&base_dir.join(data_dir), &out)
                .context("generating noise-dosage models")?;
            Ok(())
        }
    }
}

fn knapsack(output: PathBuf, solve: bool) -> Result<()> {
    let model = build_knapsack(&example()).context("building knapsack model")?;
    write_problem(&model, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), "knapsack model written");

    if solve {
        let solution = EnumerationSolver::new().solve(&model, &SolverConfig::default());
        let Some(objective) = solution.objective_value else {
            bail!("knapsack example not solved: {:?}", solution.status);
        };
        println!("Optimal value: {objective}");
        for (var, value) in model.variables.iter().zip(&solution.values) {
            if *value > 0.5 {
                println!("  {} = {}", var.name, value);
            }
        }
    }
    Ok(())
}
