use crate::rng::RandomSource;
use crate::spins::energy::energy_change;
use crate::spins::SpinGrid;

/// Result of one proposed single-site flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub row: usize,
    pub col: usize,
    /// Energy change the flip would cause (or caused, if accepted).
    pub delta_e: f64,
    pub accepted: bool,
}

/// Metropolis acceptance probability `min(1, exp(-dE / kT))`.
///
/// Large positive `delta_e` underflows to exactly `0.0`; the result is always
/// a real number in `[0, 1]`.
#[inline]
pub fn acceptance_probability(delta_e: f64, thermal_energy: f64) -> f64 {
    if delta_e <= 0.0 {
        return 1.0;
    }
    let p = (-delta_e / thermal_energy).exp();
    if p.is_nan() {
        0.0
    } else {
        p.min(1.0)
    }
}

/// Propose flipping one uniformly chosen site and apply the Metropolis criterion.
///
/// Draws row then column with `next_index(N)`. A flip with `dE <= 0` is
/// accepted without consuming a uniform draw; otherwise one uniform `u` is drawn
/// and the flip is accepted iff `u < exp(-dE / kT)`. Rejection leaves the grid
/// untouched.
pub fn metropolis_step<R: RandomSource + ?Sized>(
    grid: &mut SpinGrid,
    coupling: f64,
    field: f64,
    thermal_energy: f64,
    rng: &mut R,
) -> StepOutcome {
    let n = grid.size();
    let row = rng.next_index(n);
    let col = rng.next_index(n);
    let delta_e = energy_change(grid, coupling, field, row, col);

    let accepted =
        delta_e <= 0.0 || rng.next_unit() < acceptance_probability(delta_e, thermal_energy);
    if accepted {
        grid.flip(row, col);
    }

    StepOutcome {
        row,
        col,
        delta_e,
        accepted,
    }
}
