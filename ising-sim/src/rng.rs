use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Source of the two kinds of draws the engine consumes.
///
/// Every [`rand::Rng`] is a source; [`ScriptedSource`] replays fixed draws so
/// the acceptance rule can be checked exactly.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
    /// Uniform index in `[0, n)`. `n` is always positive.
    fn next_index(&mut self, n: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Default generator: seeded deterministically when a seed is given,
/// from OS entropy otherwise.
pub fn default_rng(seed: Option<u64>) -> Xoshiro256StarStar {
    match seed {
        Some(s) => Xoshiro256StarStar::seed_from_u64(s),
        None => Xoshiro256StarStar::from_entropy(),
    }
}

/// Deterministic source cycling through fixed index and uniform sequences.
///
/// Index draws are reduced modulo the requested bound. Counts of each kind of
/// draw are kept so callers can assert which branches consumed randomness.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    indices: Vec<usize>,
    units: Vec<f64>,
    index_pos: usize,
    unit_pos: usize,
}

impl ScriptedSource {
    /// Empty sequences fall back to index `0` and uniform `0.0`.
    pub fn new(indices: Vec<usize>, units: Vec<f64>) -> Self {
        Self {
            indices,
            units,
            index_pos: 0,
            unit_pos: 0,
        }
    }

    pub fn index_draws(&self) -> usize {
        self.index_pos
    }

    pub fn unit_draws(&self) -> usize {
        self.unit_pos
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let u = if self.units.is_empty() {
            0.0
        } else {
            self.units[self.unit_pos % self.units.len()]
        };
        self.unit_pos += 1;
        u
    }

    fn next_index(&mut self, n: usize) -> usize {
        let i = if self.indices.is_empty() {
            0
        } else {
            self.indices[self.index_pos % self.indices.len()] % n
        };
        self.index_pos += 1;
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_default_rng_is_reproducible() {
        let mut a = default_rng(Some(7));
        let mut b = default_rng(Some(7));
        for _ in 0..32 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
            assert_eq!(a.next_index(13), b.next_index(13));
        }
    }

    #[test]
    fn rng_draws_stay_in_range() {
        let mut rng = default_rng(Some(1));
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
            assert!(rng.next_index(5) < 5);
        }
    }

    #[test]
    fn scripted_source_cycles_and_counts() {
        let mut src = ScriptedSource::new(vec![1, 7], vec![0.25]);
        assert_eq!(src.next_index(4), 1);
        assert_eq!(src.next_index(4), 3);
        assert_eq!(src.next_index(4), 1);
        assert_eq!(src.next_unit(), 0.25);
        assert_eq!(src.next_unit(), 0.25);
        assert_eq!(src.index_draws(), 3);
        assert_eq!(src.unit_draws(), 2);
    }
}
