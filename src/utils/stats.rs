//! Small statistical helpers shared by the models.

/// Quantile function of the standard normal distribution.
///
/// Uses the Abramowitz and Stegun rational approximation (formula 26.2.23),
/// accurate to about 4.5e-4 which is plenty for interval construction.
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let t = if p < 0.5 {
        (-2.0 * p.ln()).sqrt()
    } else {
        (-2.0 * (1.0 - p).ln()).sqrt()
    };

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;
    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let result = t - (c0 + c1 * t + c2 * t * t) / (1.0 + d1 * t + d2 * t * t + d3 * t * t * t);

    if p < 0.5 {
        -result
    } else {
        result
    }
}

/// Mean of a slice; NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n-1 denominator); zero for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quantile_normal_known_values() {
        assert_relative_eq!(quantile_normal(0.5), 0.0, epsilon = 1e-3);
        assert_relative_eq!(quantile_normal(0.975), 1.96, epsilon = 1e-2);
        assert_relative_eq!(quantile_normal(0.025), -1.96, epsilon = 1e-2);
    }

    #[test]
    fn quantile_normal_extremes() {
        assert_eq!(quantile_normal(0.0), f64::NEG_INFINITY);
        assert_eq!(quantile_normal(1.0), f64::INFINITY);
    }

    #[test]
    fn quantile_normal_is_antisymmetric() {
        for p in [0.6, 0.8, 0.9, 0.99] {
            assert_relative_eq!(quantile_normal(p), -quantile_normal(1.0 - p), epsilon = 1e-6);
        }
    }

    #[test]
    fn mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0, epsilon = 1e-12);
        assert_relative_eq!(variance(&values), 32.0 / 7.0, epsilon = 1e-12);

        assert!(mean(&[]).is_nan());
        assert_eq!(variance(&[1.0]), 0.0);
    }
}
