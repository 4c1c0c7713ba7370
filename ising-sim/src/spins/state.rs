use crate::geometry::Lattice;
use crate::rng::RandomSource;

/// Spin configuration on a periodic square lattice.
///
/// Spins are stored flat in row-major order as `i8` values `+1`/`-1`. The
/// grid dimensions are fixed at construction; the only mutations are
/// [`SpinGrid::flip`] and [`SpinGrid::randomize`], neither of which can
/// produce a value outside `{-1, +1}`. Site accessors panic on coordinates
/// outside the grid.
#[derive(Debug, Clone)]
pub struct SpinGrid {
    lattice: Lattice,
    spins: Vec<i8>,
}

impl SpinGrid {
    /// `size x size` grid of independent, uniformly random spins.
    pub fn random<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Self {
        let lattice = Lattice::square(size);
        let mut grid = Self {
            spins: vec![1i8; lattice.n_spins],
            lattice,
        };
        grid.randomize(rng);
        grid
    }

    /// `size x size` grid with every spin equal to the sign of `value`.
    pub fn uniform(size: usize, value: i8) -> Self {
        let lattice = Lattice::square(size);
        Self {
            spins: vec![sign(value); lattice.n_spins],
            lattice,
        }
    }

    /// Build from explicit rows. Returns `None` if the rows are not square or
    /// contain a value other than `-1`/`+1`.
    pub fn from_rows(rows: &[Vec<i8>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        if rows.iter().flatten().any(|&s| s != 1 && s != -1) {
            return None;
        }
        Some(Self {
            lattice: Lattice::square(size),
            spins: rows.concat(),
        })
    }

    /// Re-draw every spin independently and uniformly.
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for s in self.spins.iter_mut() {
            *s = if rng.next_unit() < 0.5 { -1 } else { 1 };
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.lattice.size
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.spins[self.lattice.index(row, col)]
    }

    /// Spin at `(row + dr, col + dc)` with periodic wraparound.
    #[inline]
    pub fn get_wrapped(&self, row: usize, col: usize, dr: isize, dc: isize) -> i8 {
        let r = self.lattice.wrap(row, dr);
        let c = self.lattice.wrap(col, dc);
        self.get(r, c)
    }

    #[inline]
    pub fn flip(&mut self, row: usize, col: usize) {
        let i = self.lattice.index(row, col);
        self.spins[i] = -self.spins[i];
    }

    /// Flat row-major view of the spins.
    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    /// Row-per-vector copy of the grid.
    pub fn rows(&self) -> Vec<Vec<i8>> {
        self.spins
            .chunks(self.lattice.size)
            .map(|r| r.to_vec())
            .collect()
    }

    /// `sum(s)` over the whole grid.
    pub fn spin_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }
}

#[inline]
fn sign(value: i8) -> i8 {
    if value < 0 {
        -1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{default_rng, ScriptedSource};

    #[test]
    fn random_grid_holds_only_unit_spins() {
        let mut rng = default_rng(Some(3));
        let grid = SpinGrid::random(16, &mut rng);
        assert_eq!(grid.as_slice().len(), 256);
        assert!(grid.as_slice().iter().all(|&s| s == 1 || s == -1));
        // 256 fair draws all landing on one value is not a realistic outcome
        assert!(grid.spin_sum().abs() < 256);
    }

    #[test]
    fn randomize_uses_one_draw_per_site() {
        let mut src = ScriptedSource::new(vec![], vec![0.1, 0.9]);
        let grid = SpinGrid::random(3, &mut src);
        assert_eq!(src.unit_draws(), 9);
        assert_eq!(grid.as_slice(), &[-1, 1, -1, 1, -1, 1, -1, 1, -1]);
    }

    #[test]
    fn flip_toggles_single_site() {
        let mut grid = SpinGrid::uniform(3, 1);
        grid.flip(1, 2);
        assert_eq!(grid.get(1, 2), -1);
        assert_eq!(grid.spin_sum(), 7);
        grid.flip(1, 2);
        assert_eq!(grid.get(1, 2), 1);
    }

    #[test]
    #[should_panic(expected = "outside 4x4 lattice")]
    fn flip_rejects_out_of_range_column() {
        let mut grid = SpinGrid::uniform(4, 1);
        grid.flip(0, 5);
    }

    #[test]
    fn out_of_range_flip_leaves_grid_untouched() {
        let mut grid = SpinGrid::uniform(4, 1);
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| grid.flip(0, 5)));
        assert!(res.is_err());
        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(grid.spin_sum(), 16);
    }

    #[test]
    fn wrapped_reads_cross_the_boundary() {
        let grid = SpinGrid::from_rows(&[vec![1, 1, -1], vec![1, 1, 1], vec![-1, 1, 1]]).unwrap();
        assert_eq!(grid.get_wrapped(0, 0, -1, 0), -1);
        assert_eq!(grid.get_wrapped(0, 0, 0, -1), -1);
        assert_eq!(grid.get_wrapped(2, 2, 1, 0), -1);
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert!(SpinGrid::from_rows(&[]).is_none());
        assert!(SpinGrid::from_rows(&[vec![1, 1], vec![1]]).is_none());
        assert!(SpinGrid::from_rows(&[vec![1, 0], vec![1, 1]]).is_none());
    }

    #[test]
    fn rows_matches_row_major_layout() {
        let rows = vec![vec![1, -1], vec![-1, -1]];
        let grid = SpinGrid::from_rows(&rows).unwrap();
        assert_eq!(grid.rows(), rows);
        assert_eq!(grid.get(0, 1), -1);
    }
}
