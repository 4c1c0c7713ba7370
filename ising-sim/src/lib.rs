//! Single-spin-flip Metropolis Monte Carlo for the 2D Ising model on a
//! periodic square lattice.
//!
//! ```no_run
//! use ising_sim::{IsingModel, ModelConfig};
//!
//! let mut model = IsingModel::new(ModelConfig::new(32, 1.5e23).with_seed(7))?;
//! let traj = model.simulate(10_000)?;
//! println!("final E = {}", traj.energies[traj.len() - 1]);
//! # Ok::<(), ising_sim::IsingError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod rng;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{ModelConfig, SamplingConfig, BOLTZMANN, DEFAULT_SAMPLES};
pub use error::{IsingError, Result};
pub use geometry::{Direction, Lattice};
pub use mcmc::{acceptance_probability, metropolis_step, StepOutcome};
pub use rng::{RandomSource, ScriptedSource};
pub use simulation::{
    run_temperature_scan, IsingModel, ObservableSummary, SampledRun, ScanPoint, Trajectory,
    TrajectoryState,
};
pub use spins::SpinGrid;
