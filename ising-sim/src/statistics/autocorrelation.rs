use super::Moments;

/// Relative variance below which a series counts as constant.
const FLAT_TOLERANCE: f64 = 1e3 * f64::EPSILON * f64::EPSILON;

/// Normalized autocorrelation function Γ(δ) of a recorded series for
/// `δ = 0..=max_lag`.
///
/// `max_lag` is capped at `series.len() - 1`. A series whose variance is at
/// rounding level relative to its mean is treated as constant and yields
/// `Γ(0) = 1` and `Γ(δ > 0) = 0`.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Vec<f64> {
    if series.is_empty() {
        return vec![];
    }
    let max_lag = max_lag.min(series.len() - 1);
    let stats = Moments::from_slice(series);
    let mean = stats.mean();
    let var = stats.variance();
    let flat = var <= FLAT_TOLERANCE * mean * mean;

    (0..=max_lag)
        .map(|delta| {
            if flat {
                return if delta == 0 { 1.0 } else { 0.0 };
            }
            let count = (series.len() - delta) as f64;
            let prod: f64 = series[delta..]
                .iter()
                .zip(series.iter())
                .map(|(&a, &b)| (a - mean) * (b - mean))
                .sum();
            prod / count / var
        })
        .collect()
}

/// Integrated autocorrelation time with Sokal's automatic window:
/// sum Γ until the window exceeds five times the running estimate.
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

/// Integrated autocorrelation time of `series`, with lags up to a quarter
/// of its length.
pub fn integrated_time(series: &[f64]) -> f64 {
    let max_lag = (series.len() / 4).max(1);
    sokal_tau(&autocorrelation(series, max_lag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_zero_is_one() {
        let series: Vec<f64> = (0..64).map(|i| ((i * 7) % 5) as f64).collect();
        let g = autocorrelation(&series, 8);
        assert_eq!(g.len(), 9);
        assert!((g[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series() {
        let g = autocorrelation(&[2.0; 10], 3);
        assert_eq!(g, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(sokal_tau(&g), 0.5);
    }

    #[test]
    fn test_constant_trajectory_has_half_tau() {
        let energies = vec![-120.0; 400];
        let mags = vec![0.3; 400];
        assert_eq!(integrated_time(&energies), 0.5);
        assert_eq!(integrated_time(&mags), 0.5);
    }

    #[test]
    fn test_rounding_noise_counts_as_constant() {
        let series: Vec<f64> = (0..64)
            .map(|i| if i % 3 == 0 { 0.3 } else { 0.1 + 0.2 })
            .collect();
        let g = autocorrelation(&series, 4);
        assert_eq!(g, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_alternating_series_anticorrelates() {
        let series: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let g = autocorrelation(&series, 2);
        assert!((g[1] + 1.0).abs() < 1e-12);
        assert!((g[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lag_capped_by_length() {
        assert_eq!(autocorrelation(&[1.0, 2.0, 3.0], 10).len(), 3);
        assert!(autocorrelation(&[], 4).is_empty());
    }

    #[test]
    fn test_slowly_varying_series_has_long_tau() {
        let slow: Vec<f64> = (0..400).map(|i| ((i / 40) % 2) as f64).collect();
        let fast: Vec<f64> = (0..400).map(|i| ((i * 37) % 11) as f64).collect();
        assert!(integrated_time(&slow) > integrated_time(&fast));
    }
}
