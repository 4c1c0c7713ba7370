use crate::config::SamplingConfig;
use crate::mcmc::{metropolis_step, StepOutcome};
use crate::rng::RandomSource;
use crate::spins::energy::{total_energy, total_magnetization};
use crate::spins::SpinGrid;

use super::trajectory::{SampledRun, Trajectory};

/// Hamiltonian parameters and thermal scale for one stretch of driving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Couplings {
    pub coupling: f64,
    pub field: f64,
    /// `kB * T`.
    pub thermal_energy: f64,
}

/// Mutable Markov-chain state of one model instance.
///
/// Holds the spin grid, its private generator, and acceptance counters since
/// the last re-randomization. Every spin mutation during driving goes through
/// [`MarkovChain::step`].
#[derive(Debug, Clone)]
pub struct MarkovChain<R> {
    pub grid: SpinGrid,
    pub rng: R,
    pub attempted: u64,
    pub accepted: u64,
}

impl<R: RandomSource> MarkovChain<R> {
    /// Initialize with a random `size x size` grid drawn from `rng`.
    pub fn new(size: usize, mut rng: R) -> Self {
        let grid = SpinGrid::random(size, &mut rng);
        Self::from_grid(grid, rng)
    }

    pub fn from_grid(grid: SpinGrid, rng: R) -> Self {
        Self {
            grid,
            rng,
            attempted: 0,
            accepted: 0,
        }
    }

    /// Re-draw all spins and zero the counters. The generator keeps its stream.
    pub fn reset(&mut self) {
        self.grid.randomize(&mut self.rng);
        self.attempted = 0;
        self.accepted = 0;
    }

    #[inline]
    pub fn step(&mut self, c: &Couplings) -> StepOutcome {
        let out = metropolis_step(
            &mut self.grid,
            c.coupling,
            c.field,
            c.thermal_energy,
            &mut self.rng,
        );
        self.attempted += 1;
        if out.accepted {
            self.accepted += 1;
        }
        out
    }

    /// Run `n` elementary steps without recording. Returns how many were accepted.
    pub fn advance(&mut self, c: &Couplings, n: usize) -> usize {
        let mut accepted = 0;
        for _ in 0..n {
            if self.step(c).accepted {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn observe(&self, c: &Couplings) -> (f64, f64) {
        (
            total_energy(&self.grid, c.coupling, c.field),
            total_magnetization(&self.grid),
        )
    }

    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempted as f64
    }

    /// One step followed by a full observable recomputation, `steps` times.
    pub fn record_trajectory(
        &mut self,
        c: &Couplings,
        steps: usize,
        on_step: &(dyn Fn() + Sync),
    ) -> Trajectory {
        let mut traj = Trajectory::with_capacity(steps);
        for _ in 0..steps {
            on_step();
            self.step(c);
            let (e, m) = self.observe(c);
            traj.push(e, m);
        }
        traj
    }

    /// Thinned drive: sample 0 records the current state, every later sample
    /// first advances `sampling.stride()` steps.
    pub fn record_samples(
        &mut self,
        c: &Couplings,
        sampling: &SamplingConfig,
        on_sample: &mut dyn FnMut(usize, &SpinGrid),
    ) -> SampledRun {
        let n_samples = sampling.effective_samples();
        let stride = sampling.stride();

        let mut run = SampledRun {
            stride,
            elapsed_steps: Vec::with_capacity(n_samples),
            trajectory: Trajectory::with_capacity(n_samples),
            frames: Vec::with_capacity(n_samples),
        };

        for k in 0..n_samples {
            if k > 0 {
                self.advance(c, stride);
            }
            let (e, m) = self.observe(c);
            run.elapsed_steps.push(k * stride);
            run.trajectory.push(e, m);
            run.frames.push(self.grid.as_slice().to_vec());
            on_sample(k, &self.grid);
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{default_rng, ScriptedSource};

    const HOT: Couplings = Couplings {
        coupling: 1.0,
        field: 0.0,
        thermal_energy: 1e9,
    };

    #[test]
    fn test_counters_track_steps() {
        let mut chain = MarkovChain::new(5, default_rng(Some(2)));
        let accepted = chain.advance(&HOT, 200);
        assert_eq!(chain.attempted, 200);
        assert_eq!(chain.accepted as usize, accepted);
        // At effectively infinite temperature nearly every flip is accepted.
        assert!(chain.acceptance_ratio() > 0.99);

        chain.reset();
        assert_eq!(chain.attempted, 0);
        assert_eq!(chain.acceptance_ratio(), 0.0);
    }

    #[test]
    fn test_record_trajectory_tracks_each_step() {
        let mut chain = MarkovChain::new(4, default_rng(Some(8)));
        let traj = chain.record_trajectory(&HOT, 25, &|| {});
        assert_eq!(traj.len(), 25);
        assert_eq!(traj.magnetizations.len(), 25);
        let (e, m) = chain.observe(&HOT);
        assert_eq!(traj.energies[24], e);
        assert_eq!(traj.magnetizations[24], m);
    }

    #[test]
    fn test_record_samples_first_frame_is_initial_state() {
        let mut chain = MarkovChain::new(6, default_rng(Some(4)));
        let initial = chain.grid.as_slice().to_vec();
        let (e0, m0) = chain.observe(&HOT);

        let sampling = SamplingConfig::new(1000).with_samples(10);
        let mut seen = Vec::new();
        let run = chain.record_samples(&HOT, &sampling, &mut |k, _| seen.push(k));

        assert_eq!(run.len(), 10);
        assert_eq!(run.stride, 100);
        assert_eq!(run.frames[0], initial);
        assert_eq!(run.trajectory.energies[0], e0);
        assert_eq!(run.trajectory.magnetizations[0], m0);
        assert_eq!(run.elapsed_steps, (0..10).map(|k| k * 100).collect::<Vec<_>>());
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        // Nine strides advanced, the first sample advanced nothing.
        assert_eq!(chain.attempted, 900);
    }

    #[test]
    fn test_scripted_chain_flips_chosen_site() {
        let grid = SpinGrid::uniform(3, 1);
        let src = ScriptedSource::new(vec![2, 1], vec![0.0]);
        let mut chain = MarkovChain::from_grid(grid, src);
        let out = chain.step(&HOT);
        assert_eq!((out.row, out.col), (2, 1));
        assert!(out.accepted);
        assert_eq!(chain.grid.get(2, 1), -1);
    }
}
