//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ising_sim::ModelConfig;

/// Metropolis Monte Carlo for the 2D Ising model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write JSON results here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full-resolution run: record energy and magnetization after every step
    Simulate {
        #[command(flatten)]
        model: ModelArgs,

        /// Number of elementary Metropolis steps
        #[arg(short = 'n', long)]
        steps: usize,

        /// Fraction of leading samples excluded from the summary
        #[arg(long, default_value_t = 0.25)]
        warmup_ratio: f64,
    },

    /// Thinned run with a bounded number of samples and lattice frames
    Sample {
        #[command(flatten)]
        model: ModelArgs,

        /// Total elementary Metropolis steps
        #[arg(short = 'n', long)]
        steps: usize,

        /// Number of recorded samples
        #[arg(long, default_value_t = ising_sim::DEFAULT_SAMPLES)]
        samples: usize,
    },

    /// Independent full-resolution runs over a list of temperatures
    Scan {
        #[command(flatten)]
        model: ModelArgs,

        /// Temperatures to simulate, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        temperatures: Vec<f64>,

        /// Number of elementary Metropolis steps per temperature
        #[arg(short = 'n', long)]
        steps: usize,

        /// Fraction of leading samples excluded from each summary
        #[arg(long, default_value_t = 0.25)]
        warmup_ratio: f64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Lattice side length
    #[arg(short = 'L', long, default_value_t = 50)]
    pub size: usize,

    /// Temperature in kelvin (ignored by `scan`)
    #[arg(short, long, default_value_t = 1.0e23)]
    pub temperature: f64,

    /// Nearest-neighbor coupling J
    #[arg(short = 'J', long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub coupling: f64,

    /// External field h
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub field: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ModelArgs {
    pub fn config(&self) -> ModelConfig {
        ModelConfig {
            size: self.size,
            temperature: self.temperature,
            coupling: self.coupling,
            field: self.field,
            seed: self.seed,
        }
    }
}
