use std::fmt;

use rand_xoshiro::Xoshiro256StarStar;
use tracing::debug;

use crate::config::{ModelConfig, BOLTZMANN};
use crate::error::{IsingError, Result};
use crate::mcmc::StepOutcome;
use crate::rng::{default_rng, RandomSource};
use crate::spins::energy;
use crate::spins::SpinGrid;

use super::chain::{Couplings, MarkovChain};
use super::trajectory::{SampledRun, Trajectory, TrajectoryState};

/// One 2D Ising model instance: immutable parameters, the Markov-chain state,
/// and explicit caches for the recorded runs.
///
/// The full-resolution trajectory of [`IsingModel::simulate`] and the thinned
/// run of [`IsingModel::sample`] live in separate slots. [`IsingModel::reset`]
/// re-randomizes the lattice and clears both.
pub struct IsingModel<R: RandomSource = Xoshiro256StarStar> {
    pub(crate) config: ModelConfig,
    pub(crate) chain: MarkovChain<R>,
    pub(crate) trajectory: TrajectoryState<Trajectory>,
    pub(crate) sampled: TrajectoryState<SampledRun>,
}

impl IsingModel {
    /// Validate `config` and build a model with a random lattice. The generator
    /// is seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: ModelConfig) -> Result<Self> {
        Self::with_rng(config, default_rng(config.seed))
    }
}

impl<R: RandomSource> IsingModel<R> {
    /// Build with an explicit random source; the lattice is drawn from it.
    pub fn with_rng(config: ModelConfig, rng: R) -> Result<Self> {
        config.check()?;
        let chain = MarkovChain::new(config.size, rng);
        debug!(
            size = config.size,
            temperature = config.temperature,
            coupling = config.coupling,
            field = config.field,
            "ising model constructed"
        );
        Ok(Self::from_chain(config, chain))
    }

    /// Build around a prepared spin configuration.
    pub fn with_grid(config: ModelConfig, grid: SpinGrid, rng: R) -> Result<Self> {
        config.check()?;
        if grid.size() != config.size {
            return Err(IsingError::config(format!(
                "grid is {0}x{0} but size is {1}",
                grid.size(),
                config.size
            )));
        }
        Ok(Self::from_chain(config, MarkovChain::from_grid(grid, rng)))
    }

    fn from_chain(config: ModelConfig, chain: MarkovChain<R>) -> Self {
        Self {
            config,
            chain,
            trajectory: TrajectoryState::default(),
            sampled: TrajectoryState::default(),
        }
    }

    /// Re-draw every spin and discard both recorded runs, so the next
    /// `simulate` recomputes instead of returning stale data.
    pub fn reset(&mut self) {
        self.chain.reset();
        self.trajectory.clear();
        self.sampled.clear();
        debug!(size = self.config.size, "ising model reset");
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn temperature(&self) -> f64 {
        self.config.temperature
    }

    pub fn coupling(&self) -> f64 {
        self.config.coupling
    }

    pub fn field(&self) -> f64 {
        self.config.field
    }

    pub fn grid(&self) -> &SpinGrid {
        &self.chain.grid
    }

    /// Flat row-major spins, values in `{-1, +1}`.
    pub fn spins(&self) -> &[i8] {
        self.chain.grid.as_slice()
    }

    /// Row-per-vector copy of the current lattice.
    pub fn snapshot(&self) -> Vec<Vec<i8>> {
        self.chain.grid.rows()
    }

    pub fn curie_temperature(&self) -> f64 {
        self.config.curie_temperature()
    }

    /// Energy change of flipping `(row, col)`. Panics if the site is outside
    /// the lattice.
    pub fn energy_change(&self, row: usize, col: usize) -> f64 {
        energy::energy_change(
            &self.chain.grid,
            self.config.coupling,
            self.config.field,
            row,
            col,
        )
    }

    pub fn total_energy(&self) -> f64 {
        energy::total_energy(&self.chain.grid, self.config.coupling, self.config.field)
    }

    pub fn total_magnetization(&self) -> f64 {
        energy::total_magnetization(&self.chain.grid)
    }

    pub(crate) fn couplings_at(&self, temperature: f64) -> Couplings {
        Couplings {
            coupling: self.config.coupling,
            field: self.config.field,
            thermal_energy: BOLTZMANN * temperature,
        }
    }

    pub(crate) fn couplings(&self) -> Couplings {
        self.couplings_at(self.config.temperature)
    }

    /// One Metropolis step at the configured temperature.
    pub fn metropolis_step(&mut self) -> StepOutcome {
        let c = self.couplings();
        self.chain.step(&c)
    }

    /// One Metropolis step at an explicit temperature, leaving the configured
    /// one untouched.
    pub fn metropolis_step_at(&mut self, temperature: f64) -> Result<StepOutcome> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(IsingError::config(format!(
                "temperature must be finite and > 0, got {temperature}"
            )));
        }
        let c = self.couplings_at(temperature);
        Ok(self.chain.step(&c))
    }

    /// Advance `steps` elementary steps without recording observables.
    /// Returns the number of accepted flips.
    pub fn run_steps(&mut self, steps: usize) -> Result<usize> {
        if steps == 0 {
            return Err(IsingError::InvalidSteps);
        }
        let c = self.couplings();
        Ok(self.chain.advance(&c, steps))
    }

    /// Steps attempted since construction or the last reset.
    pub fn attempted_steps(&self) -> u64 {
        self.chain.attempted
    }

    pub fn accepted_steps(&self) -> u64 {
        self.chain.accepted
    }

    pub fn acceptance_ratio(&self) -> f64 {
        self.chain.acceptance_ratio()
    }

    /// Full-resolution cache slot.
    pub fn trajectory(&self) -> &TrajectoryState<Trajectory> {
        &self.trajectory
    }

    /// Thinned-run cache slot.
    pub fn sampled_run(&self) -> &TrajectoryState<SampledRun> {
        &self.sampled
    }
}

impl<R: RandomSource> fmt::Display for IsingModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "2D Ising model, {0}x{0} spins", c.size)?;
        writeln!(f, "T = {:.2} K", c.temperature)?;
        writeln!(f, "J = {} J", c.coupling)?;
        writeln!(f, "h = {} J", c.field)?;
        write!(f, "Curie temperature: {:.2} K", self.curie_temperature())
    }
}
