pub mod chain;
pub mod model;
pub mod scan;
pub mod trajectory;

pub use chain::{Couplings, MarkovChain};
pub use model::IsingModel;
pub use scan::{run_temperature_scan, ScanPoint};
pub use trajectory::{ObservableSummary, SampledRun, Trajectory, TrajectoryState};

use tracing::{debug, info};

use crate::config::SamplingConfig;
use crate::error::{IsingError, Result};
use crate::rng::RandomSource;
use crate::spins::SpinGrid;

impl<R: RandomSource> IsingModel<R> {
    /// Full-resolution run of `steps` elementary Metropolis steps.
    ///
    /// Each step is followed by a whole-lattice recomputation of energy and
    /// magnetization, recorded at that step's index. The result is cached: while
    /// a trajectory is recorded, further calls with the same `steps` return it
    /// without stepping, and calls with a different `steps` fail with
    /// [`IsingError::TrajectoryLengthMismatch`]. Call [`IsingModel::reset`] to
    /// force a new run.
    pub fn simulate(&mut self, steps: usize) -> Result<&Trajectory> {
        self.simulate_with(steps, &|| {})
    }

    /// [`IsingModel::simulate`] with `on_step` called once per elementary step
    /// (useful for progress bars).
    pub fn simulate_with(
        &mut self,
        steps: usize,
        on_step: &(dyn Fn() + Sync),
    ) -> Result<&Trajectory> {
        if steps == 0 {
            return Err(IsingError::InvalidSteps);
        }
        if let Some(cached) = self.trajectory.get().map(Trajectory::len) {
            if cached != steps {
                return Err(IsingError::TrajectoryLengthMismatch {
                    cached,
                    requested: steps,
                });
            }
            debug!(steps, "returning cached trajectory");
        } else {
            info!(
                size = self.config.size,
                temperature = self.config.temperature,
                steps,
                "starting full-resolution run"
            );
        }

        let c = self.couplings();
        let chain = &mut self.chain;
        let traj = self
            .trajectory
            .get_or_insert_with(|| chain.record_trajectory(&c, steps, on_step));

        if let (Some(e), Some(m)) = (traj.energies.last(), traj.magnetizations.last()) {
            info!(
                energy = e,
                magnetization = m,
                acceptance = chain.acceptance_ratio(),
                "trajectory ready"
            );
        }
        Ok(traj)
    }

    /// Thinned drive with a bounded sample count, for rendering collaborators.
    ///
    /// Records `sampling.effective_samples()` samples; sample 0 is the current
    /// lattice and every later sample first advances `sampling.stride()`
    /// elementary steps. The run always executes afresh and replaces the
    /// previous sampled run; the full-resolution trajectory is left alone.
    pub fn sample(&mut self, sampling: SamplingConfig) -> Result<&SampledRun> {
        self.sample_with(sampling, &mut |_, _| {})
    }

    /// [`IsingModel::sample`] with `on_sample(k, grid)` called after sample `k`
    /// is recorded, exposing the lattice at that moment.
    pub fn sample_with(
        &mut self,
        sampling: SamplingConfig,
        on_sample: &mut dyn FnMut(usize, &SpinGrid),
    ) -> Result<&SampledRun> {
        sampling.check()?;
        info!(
            size = self.config.size,
            steps = sampling.steps,
            samples = sampling.effective_samples(),
            stride = sampling.stride(),
            "starting sampled run"
        );

        let c = self.couplings();
        let run = self.chain.record_samples(&c, &sampling, on_sample);
        info!(
            acceptance = self.chain.acceptance_ratio(),
            "sampled run finished"
        );
        Ok(self.sampled.insert(run))
    }
}
