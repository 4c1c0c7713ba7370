/// The four nearest-neighbor directions on the square lattice.
///
/// `Up`/`Down` move along axis 0 (rows), `Left`/`Right` along axis 1 (columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` displacement of one step in this direction.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Forward direction along `axis`: `Down` for rows, `Right` for columns.
    #[inline]
    pub fn forward(axis: usize) -> Self {
        if axis == 0 {
            Self::Down
        } else {
            Self::Right
        }
    }
}

/// Periodic `N x N` square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order, `flat = row * N + col`. Wraparound is
/// exact modular arithmetic on both axes, so the lattice is a torus: the site
/// above row 0 is row `N - 1` and the site right of column `N - 1` is column 0.
#[derive(Debug, Clone)]
pub struct Lattice {
    /// Side length `N`.
    pub size: usize,
    /// `N * N`.
    pub n_spins: usize,
    /// Layout: `neighbors[flat * 4 + dir as usize]`, order of [`Direction::ALL`].
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Build the neighbor table for an `size x size` torus. `size` must be positive.
    pub fn square(size: usize) -> Self {
        debug_assert!(size > 0, "lattice size must be positive");
        let n_spins = size * size;
        let mut neighbors = vec![0u32; n_spins * 4];

        for row in 0..size {
            for col in 0..size {
                let flat = row * size + col;
                for (d, dir) in Direction::ALL.iter().enumerate() {
                    let (dr, dc) = dir.offset();
                    let r = wrap(row, dr, size);
                    let c = wrap(col, dc, size);
                    neighbors[flat * 4 + d] = (r * size + c) as u32;
                }
            }
        }

        Self {
            size,
            n_spins,
            neighbors,
        }
    }

    /// Flat index of `(row, col)`.
    ///
    /// Panics if either coordinate is `>= N`; an out-of-range column would
    /// otherwise alias a site on another row.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "site ({row}, {col}) outside {0}x{0} lattice",
            self.size
        );
        row * self.size + col
    }

    #[inline]
    pub fn coords(&self, flat: usize) -> (usize, usize) {
        (flat / self.size, flat % self.size)
    }

    /// `(x + delta) mod N` on either axis.
    #[inline]
    pub fn wrap(&self, x: usize, delta: isize) -> usize {
        wrap(x, delta, self.size)
    }

    /// Flat index of the neighbor of `flat` in direction `dir`.
    #[inline]
    pub fn neighbor(&self, flat: usize, dir: Direction) -> usize {
        self.neighbors[flat * 4 + dir as usize] as usize
    }

    /// Coordinates of the four neighbors of `(row, col)`, in [`Direction::ALL`] order.
    pub fn neighbor_coords(&self, row: usize, col: usize) -> [(usize, usize); 4] {
        let flat = self.index(row, col);
        Direction::ALL.map(|dir| self.coords(self.neighbor(flat, dir)))
    }
}

#[inline]
fn wrap(x: usize, delta: isize, size: usize) -> usize {
    (x as isize + delta).rem_euclid(size as isize) as usize
}
