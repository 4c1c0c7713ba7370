/// Running mean and variance of a scalar observable (Welford update).
#[derive(Debug, Clone, Copy, Default)]
pub struct Moments {
    pub count: usize,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
}

impl Moments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn from_slice(values: &[f64]) -> Self {
        let mut m = Self::new();
        for &v in values {
            m.update(v);
        }
        m
    }

    /// Mean, or `0.0` when nothing was recorded.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, `0.0` when nothing was recorded.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / self.count as f64).max(0.0)
    }
}
