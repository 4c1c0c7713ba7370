use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{IsingError, Result};

/// Boltzmann constant in J/K. Converts temperature into a thermal energy scale.
pub const BOLTZMANN: f64 = 1.380_648_52e-23;

/// Number of samples recorded by the sampled drive unless overridden.
pub const DEFAULT_SAMPLES: usize = 150;

fn validate_model_config(cfg: &ModelConfig) -> std::result::Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    if !cfg.temperature.is_finite() || cfg.temperature <= 0.0 {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling J must be finite"));
    }
    if !cfg.field.is_finite() {
        return Err(ValidationError::new("field h must be finite"));
    }
    Ok(())
}

/// Immutable parameters of one model instance.
///
/// `coupling > 0` favors aligned neighbors (ferromagnet), `coupling < 0`
/// favors anti-aligned neighbors. `seed = None` draws the generator seed from
/// OS entropy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_model_config"))]
pub struct ModelConfig {
    /// Side length `N` of the square lattice.
    pub size: usize,
    /// Temperature `T` in kelvin.
    pub temperature: f64,
    /// Nearest-neighbor coupling `J`.
    pub coupling: f64,
    /// Uniform external field `h`.
    pub field: f64,
    pub seed: Option<u64>,
}

impl ModelConfig {
    /// Configuration with `J = 1`, `h = 0` and an entropy seed.
    pub fn new(size: usize, temperature: f64) -> Self {
        Self {
            size,
            temperature,
            coupling: 1.0,
            field: 0.0,
            seed: None,
        }
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run validation, mapping failures onto [`IsingError::InvalidConfig`].
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(|e| IsingError::config(format!("{e}")))
    }

    /// `kB * T` for the configured temperature.
    pub fn thermal_energy(&self) -> f64 {
        BOLTZMANN * self.temperature
    }

    /// Onsager critical temperature `2J / (kB ln(1 + sqrt 2))` of the square lattice.
    pub fn curie_temperature(&self) -> f64 {
        2.0 * self.coupling / (BOLTZMANN * (1.0 + 2.0f64.sqrt()).ln())
    }
}

fn validate_sampling_config(cfg: &SamplingConfig) -> std::result::Result<(), ValidationError> {
    if cfg.steps < 1 {
        return Err(ValidationError::new("steps must be >= 1"));
    }
    if cfg.n_samples < 1 {
        return Err(ValidationError::new("n_samples must be >= 1"));
    }
    Ok(())
}

/// Parameters of the thinned, fixed-sample-count drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_sampling_config"))]
pub struct SamplingConfig {
    /// Total elementary Metropolis steps budgeted for the whole run.
    pub steps: usize,
    /// Requested number of recorded samples (capped at `steps`).
    pub n_samples: usize,
}

impl SamplingConfig {
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            n_samples: DEFAULT_SAMPLES,
        }
    }

    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(IsingError::InvalidSteps);
        }
        self.validate()
            .map_err(|e| IsingError::InvalidSampling(format!("{e}")))
    }

    /// Effective sample count: never more samples than steps, so every
    /// sample after the first advances the lattice.
    pub fn effective_samples(&self) -> usize {
        self.n_samples.min(self.steps)
    }

    /// Elementary steps between consecutive samples (integer division).
    pub fn stride(&self) -> usize {
        self.steps / self.effective_samples()
    }
}
