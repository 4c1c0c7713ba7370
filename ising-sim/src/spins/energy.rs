use crate::geometry::{Direction, Lattice};
use crate::spins::SpinGrid;

/// Sum of the four periodic neighbors of `(row, col)`.
#[inline]
pub fn neighbor_sum(grid: &SpinGrid, row: usize, col: usize) -> i32 {
    let lattice = grid.lattice();
    let spins = grid.as_slice();
    let flat = lattice.index(row, col);
    Direction::ALL
        .iter()
        .map(|&dir| spins[lattice.neighbor(flat, dir)] as i32)
        .sum()
}

/// Energy difference `E(flipped) - E(current)` for flipping `(row, col)`.
///
/// For `E = -J sum_<kl> s_k s_l - h sum_k s_k` this is exactly
/// `2 J s n + 2 h s`, with `s` the current spin and `n` its neighbor sum.
#[inline]
pub fn energy_change(grid: &SpinGrid, coupling: f64, field: f64, row: usize, col: usize) -> f64 {
    let s = grid.get(row, col) as f64;
    let n = neighbor_sum(grid, row, col) as f64;
    2.0 * coupling * s * n + 2.0 * field * s
}

/// Sum of `s_i * s_j` over every bond, each counted once via the forward
/// neighbor along both axes.
#[allow(clippy::needless_range_loop)]
pub fn bond_sum(lattice: &Lattice, spins: &[i8]) -> i64 {
    let mut total = 0i64;
    for i in 0..lattice.n_spins {
        let si = spins[i] as i64;
        for axis in 0..2 {
            let j = lattice.neighbor(i, Direction::forward(axis));
            total += si * spins[j] as i64;
        }
    }
    total
}

/// Total energy `-J sum_<kl> s_k s_l - h sum_k s_k` of the whole lattice.
pub fn total_energy(grid: &SpinGrid, coupling: f64, field: f64) -> f64 {
    let bonds = bond_sum(grid.lattice(), grid.as_slice());
    -coupling * bonds as f64 - field * grid.spin_sum() as f64
}

/// Net magnetization per spin, `sum(s) / N^2`, in `[-1, 1]`.
pub fn total_magnetization(grid: &SpinGrid) -> f64 {
    grid.spin_sum() as f64 / grid.lattice().n_spins as f64
}
