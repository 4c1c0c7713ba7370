use serde::Serialize;

use crate::statistics::{integrated_time, Moments};

/// Whole-lattice observables recorded at successive sample indices.
///
/// `energies` and `magnetizations` always have equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub energies: Vec<f64>,
    pub magnetizations: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            energies: Vec::with_capacity(n),
            magnetizations: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, energy: f64, magnetization: f64) {
        self.energies.push(energy);
        self.magnetizations.push(magnetization);
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Number of leading samples treated as equilibration for `warmup_ratio`
    /// (clamped to `[0, 1]`). At least one sample is always kept.
    pub fn warmup_len(&self, warmup_ratio: f64) -> usize {
        let ratio = warmup_ratio.clamp(0.0, 1.0);
        let skip = (self.len() as f64 * ratio).round() as usize;
        skip.min(self.len().saturating_sub(1))
    }

    /// Averages over the samples that remain after discarding the warmup.
    pub fn summary(&self, warmup_ratio: f64) -> ObservableSummary {
        let skip = self.warmup_len(warmup_ratio);
        let energies = &self.energies[skip..];
        let mags = &self.magnetizations[skip..];

        let e = Moments::from_slice(energies);
        let m = Moments::from_slice(mags);
        let abs_m = Moments::from_slice(&mags.iter().map(|v| v.abs()).collect::<Vec<_>>());

        ObservableSummary {
            samples: e.count,
            mean_energy: e.mean(),
            energy_variance: e.variance(),
            mean_magnetization: m.mean(),
            mean_abs_magnetization: abs_m.mean(),
            magnetization_variance: m.variance(),
            magnetization_tau: integrated_time(mags),
        }
    }
}

/// Equilibrium estimates from the measured part of a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservableSummary {
    /// Samples averaged over (after warmup).
    pub samples: usize,
    pub mean_energy: f64,
    pub energy_variance: f64,
    pub mean_magnetization: f64,
    pub mean_abs_magnetization: f64,
    pub magnetization_variance: f64,
    /// Integrated autocorrelation time of the magnetization, in samples.
    pub magnetization_tau: f64,
}

/// Result of the thinned, fixed-sample-count drive.
///
/// Sample `k` is taken after `elapsed_steps[k] = k * stride` elementary steps;
/// sample 0 is the state the drive started from. `frames[k]` is the row-major
/// lattice snapshot at sample `k`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledRun {
    pub stride: usize,
    pub elapsed_steps: Vec<usize>,
    pub trajectory: Trajectory,
    pub frames: Vec<Vec<i8>>,
}

impl SampledRun {
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}

/// Explicit cache slot for a recorded run.
///
/// Either holds no trajectory or a recorded one. A recording fills it;
/// `reset()` on the model empties it again.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryState<T> {
    recorded: Option<T>,
}

impl<T> Default for TrajectoryState<T> {
    fn default() -> Self {
        Self { recorded: None }
    }
}

impl<T> TrajectoryState<T> {
    pub fn get(&self) -> Option<&T> {
        self.recorded.as_ref()
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded.is_some()
    }

    pub fn clear(&mut self) {
        self.recorded = None;
    }

    /// Store `value`, replacing anything recorded, and return it.
    pub fn insert(&mut self, value: T) -> &T {
        self.recorded.insert(value)
    }

    /// Return the recorded value, recording it with `f` first if absent.
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &T {
        self.recorded.get_or_insert_with(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Trajectory {
        let mut t = Trajectory::with_capacity(n);
        for i in 0..n {
            t.push(-(i as f64), if i % 2 == 0 { 1.0 } else { -1.0 });
        }
        t
    }

    #[test]
    fn test_warmup_len() {
        let t = ramp(8);
        assert_eq!(t.warmup_len(0.0), 0);
        assert_eq!(t.warmup_len(0.25), 2);
        assert_eq!(t.warmup_len(1.0), 7);
        assert_eq!(t.warmup_len(-3.0), 0);
    }

    #[test]
    fn test_summary_discards_warmup() {
        let t = ramp(8);
        let s = t.summary(0.5);
        assert_eq!(s.samples, 4);
        // energies -4, -5, -6, -7
        assert!((s.mean_energy + 5.5).abs() < 1e-12);
        assert!((s.energy_variance - 1.25).abs() < 1e-12);
        assert_eq!(s.mean_magnetization, 0.0);
        assert_eq!(s.mean_abs_magnetization, 1.0);
        assert_eq!(s.magnetization_variance, 1.0);
    }

    #[test]
    fn test_cache_slot_transitions() {
        let mut slot: TrajectoryState<Trajectory> = TrajectoryState::default();
        assert!(!slot.is_recorded());
        assert!(slot.get().is_none());

        let first = slot.get_or_insert_with(|| ramp(3)).clone();
        assert_eq!(first.len(), 3);
        // A second call keeps the cached value.
        let again = slot.get_or_insert_with(|| ramp(5));
        assert_eq!(again, &first);

        assert_eq!(slot.insert(ramp(5)).len(), 5);
        assert_eq!(slot.get().map(Trajectory::len), Some(5));
        slot.clear();
        assert_eq!(slot, TrajectoryState::default());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_empty_slot_is_filled_exactly_once() {
        let mut slot: TrajectoryState<Trajectory> = TrajectoryState::default();
        let mut calls = 0;
        for _ in 0..3 {
            let t = slot.get_or_insert_with(|| {
                calls += 1;
                ramp(4)
            });
            assert_eq!(t.len(), 4);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_constant_trajectory_summary() {
        let mut t = Trajectory::with_capacity(400);
        for _ in 0..400 {
            t.push(-120.0, 0.3);
        }
        let s = t.summary(0.0);
        assert_eq!(s.energy_variance, 0.0);
        assert_eq!(s.magnetization_variance, 0.0);
        assert_eq!(s.mean_abs_magnetization, 0.3);
        assert_eq!(s.magnetization_tau, 0.5);
    }
}
