//! Seasonal ARIMA model fitted by conditional least squares.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::sarima::diff::{
    difference, integrate, seasonal_difference, seasonal_integrate,
};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::quantile_normal;

/// Non-seasonal (p, d, q) specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
}

impl Order {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

/// Seasonal (P, D, Q, period) specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalOrder {
    /// Seasonal AR order.
    pub p: usize,
    /// Seasonal differencing order.
    pub d: usize,
    /// Seasonal MA order.
    pub q: usize,
    /// Length of one seasonal cycle (7 for day-of-week, 12 for month-of-year).
    pub period: usize,
}

impl SeasonalOrder {
    pub fn new(p: usize, d: usize, q: usize, period: usize) -> Self {
        Self { p, d, q, period }
    }

    /// A degenerate seasonal part (no seasonal terms).
    pub fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Seasonal ARIMA(p, d, q)(P, D, Q, s) forecasting model.
///
/// The series is differenced `d` times and seasonally differenced `D` times,
/// then AR/MA terms at ordinary lags and multiples of the period are estimated
/// by minimizing the conditional sum of squares. Stationarity and
/// invertibility of the coefficients are not enforced; ridership data is
/// non-stationary and constrained fits were observed to fail on it.
#[derive(Debug, Clone)]
pub struct Sarima {
    order: Order,
    seasonal: SeasonalOrder,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
    intercept: f64,
    /// Original series, kept for ordinary integration.
    original: Option<Vec<f64>>,
    /// Series after ordinary differencing, kept for seasonal integration.
    regular_diffed: Option<Vec<f64>>,
    /// Fully differenced series the ARMA terms were fitted on.
    diffed: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
    nobs: usize,
}

impl Sarima {
    /// Create a new model with the given orders.
    pub fn new(order: Order, seasonal: SeasonalOrder) -> Self {
        Self {
            order,
            seasonal,
            ar: vec![],
            ma: vec![],
            seasonal_ar: vec![],
            seasonal_ma: vec![],
            intercept: 0.0,
            original: None,
            regular_diffed: None,
            diffed: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            aic: None,
            bic: None,
            nobs: 0,
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn seasonal_order(&self) -> SeasonalOrder {
        self.seasonal
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.seasonal_ar
    }

    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.seasonal_ma
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Number of estimated parameters (AR + MA + seasonal AR/MA + intercept).
    pub fn num_params(&self) -> usize {
        self.order.p + self.order.q + self.seasonal.p + self.seasonal.q + 1
    }

    /// Earliest usable index of the differenced series.
    fn burn_in(&self) -> usize {
        let s = self.seasonal.period;
        (self.order.p.max(self.order.q)).max((self.seasonal.p.max(self.seasonal.q)) * s)
    }

    /// Minimum series length required for a fit.
    pub fn min_observations(&self) -> usize {
        self.order.d + self.seasonal.d * self.seasonal.period + self.burn_in() + 2
    }

    /// One-step prediction on the differenced scale at index `t`.
    fn predict_diffed(
        &self,
        series: &[f64],
        residuals: &[f64],
        t: usize,
        params: &SarimaParams<'_>,
    ) -> f64 {
        let s = self.seasonal.period;
        let mut pred = params.intercept;

        for (i, &phi) in params.ar.iter().enumerate() {
            pred += phi * (series[t - 1 - i] - params.intercept);
        }
        for (j, &phi) in params.seasonal_ar.iter().enumerate() {
            pred += phi * (series[t - (j + 1) * s] - params.intercept);
        }
        for (i, &theta) in params.ma.iter().enumerate() {
            pred += theta * residuals[t - 1 - i];
        }
        for (j, &theta) in params.seasonal_ma.iter().enumerate() {
            pred += theta * residuals[t - (j + 1) * s];
        }
        pred
    }

    /// Conditional sum of squares for a candidate parameter vector.
    fn css(&self, diffed: &[f64], flat: &[f64]) -> f64 {
        let params = SarimaParams::unpack(flat, self.order, self.seasonal);
        let start = self.burn_in();
        let n = diffed.len();

        let mut residuals = vec![0.0; n];
        let mut css = 0.0;
        for t in start..n {
            let pred = self.predict_diffed(diffed, &residuals, t, &params);
            let error = diffed[t] - pred;
            residuals[t] = error;
            css += error * error;
        }
        if css.is_finite() {
            css
        } else {
            f64::MAX
        }
    }

    fn estimate_parameters(&mut self, diffed: &[f64]) -> Result<()> {
        let n_params = self.num_params();
        let mean = diffed.iter().sum::<f64>() / diffed.len() as f64;

        let mut initial = vec![0.0; n_params];
        initial[0] = mean;
        // Small non-zero starts for the ARMA terms
        for value in initial.iter_mut().skip(1) {
            *value = 0.1;
        }

        if n_params == 1 {
            self.intercept = mean;
            return Ok(());
        }

        let config = NelderMeadConfig {
            max_iter: 1000,
            tolerance: 1e-8,
            ..Default::default()
        };
        let result = nelder_mead(|flat| self.css(diffed, flat), &initial, config);

        if !result.optimal_value.is_finite() || result.optimal_value == f64::MAX {
            return Err(ForecastError::FitFailed(format!(
                "conditional sum of squares diverged for {}",
                self.name()
            )));
        }

        let params = SarimaParams::unpack(&result.optimal_point, self.order, self.seasonal);
        self.intercept = params.intercept;
        self.ar = params.ar.to_vec();
        self.ma = params.ma.to_vec();
        self.seasonal_ar = params.seasonal_ar.to_vec();
        self.seasonal_ma = params.seasonal_ma.to_vec();
        Ok(())
    }

    fn calculate_fitted(&mut self, diffed: &[f64]) {
        let start = self.burn_in();
        let n = diffed.len();
        let params = SarimaParams {
            intercept: self.intercept,
            ar: &self.ar,
            ma: &self.ma,
            seasonal_ar: &self.seasonal_ar,
            seasonal_ma: &self.seasonal_ma,
        };

        let mut fitted = vec![f64::NAN; n];
        let mut residuals = vec![0.0; n];
        for t in start..n {
            let pred = self.predict_diffed(diffed, &residuals, t, &params);
            fitted[t] = pred;
            residuals[t] = diffed[t] - pred;
        }

        let effective = &residuals[start..];
        if !effective.is_empty() {
            let variance =
                effective.iter().map(|r| r * r).sum::<f64>() / effective.len() as f64;
            self.residual_variance = Some(variance);

            if variance > 0.0 {
                let n_eff = effective.len() as f64;
                let k = self.num_params() as f64;
                let ll =
                    -0.5 * n_eff * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
                self.aic = Some(-2.0 * ll + 2.0 * k);
                self.bic = Some(-2.0 * ll + k * n_eff.ln());
            }
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
    }

    /// Textual fit summary: orders, coefficients and information criteria.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "SARIMA({},{},{})x({},{},{},{}) on {} observations\n",
            self.order.p,
            self.order.d,
            self.order.q,
            self.seasonal.p,
            self.seasonal.d,
            self.seasonal.q,
            self.seasonal.period,
            self.nobs,
        ));
        out.push_str(&format!("  intercept  {:>14.4}\n", self.intercept));
        for (i, c) in self.ar.iter().enumerate() {
            out.push_str(&format!("  ar.L{:<7}{:>14.4}\n", i + 1, c));
        }
        for (i, c) in self.ma.iter().enumerate() {
            out.push_str(&format!("  ma.L{:<7}{:>14.4}\n", i + 1, c));
        }
        for (i, c) in self.seasonal_ar.iter().enumerate() {
            out.push_str(&format!(
                "  ar.S.L{:<5}{:>14.4}\n",
                (i + 1) * self.seasonal.period,
                c
            ));
        }
        for (i, c) in self.seasonal_ma.iter().enumerate() {
            out.push_str(&format!(
                "  ma.S.L{:<5}{:>14.4}\n",
                (i + 1) * self.seasonal.period,
                c
            ));
        }
        if let Some(v) = self.residual_variance {
            out.push_str(&format!("  sigma2     {:>14.4}\n", v));
        }
        match (self.aic, self.bic) {
            (Some(aic), Some(bic)) => {
                out.push_str(&format!("  AIC        {:>14.2}\n", aic));
                out.push_str(&format!("  BIC        {:>14.2}\n", bic));
            }
            _ => out.push_str("  AIC/BIC not available (zero residual variance)\n"),
        }
        out
    }
}

/// Parameter vector layout: intercept, AR, MA, seasonal AR, seasonal MA.
struct SarimaParams<'a> {
    intercept: f64,
    ar: &'a [f64],
    ma: &'a [f64],
    seasonal_ar: &'a [f64],
    seasonal_ma: &'a [f64],
}

impl<'a> SarimaParams<'a> {
    fn unpack(flat: &'a [f64], order: Order, seasonal: SeasonalOrder) -> Self {
        let ar_end = 1 + order.p;
        let ma_end = ar_end + order.q;
        let sar_end = ma_end + seasonal.p;
        let sma_end = sar_end + seasonal.q;
        Self {
            intercept: flat[0],
            ar: &flat[1..ar_end],
            ma: &flat[ar_end..ma_end],
            seasonal_ar: &flat[ma_end..sar_end],
            seasonal_ma: &flat[sar_end..sma_end],
        }
    }
}

impl Forecaster for Sarima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let min_len = self.min_observations();
        if values.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }

        self.nobs = values.len();
        self.original = Some(values.to_vec());

        let regular = difference(values, self.order.d);
        let diffed = seasonal_difference(&regular, self.seasonal.d, self.seasonal.period);
        self.regular_diffed = Some(regular);

        if diffed.len() <= self.burn_in() {
            return Err(ForecastError::InsufficientData {
                needed: self.burn_in() + 1,
                got: diffed.len(),
            });
        }

        self.estimate_parameters(&diffed)?;
        self.calculate_fitted(&diffed);
        self.diffed = Some(diffed);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let regular = self
            .regular_diffed
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;
        let diffed = self.diffed.as_ref().ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let params = SarimaParams {
            intercept: self.intercept,
            ar: &self.ar,
            ma: &self.ma,
            seasonal_ar: &self.seasonal_ar,
            seasonal_ma: &self.seasonal_ma,
        };

        // Recursive forecast on the fully differenced scale; future residuals
        // are zero by construction.
        let mut extended = diffed.clone();
        let mut extended_residuals = residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let pred = self.predict_diffed(&extended, &extended_residuals, t, &params);
            extended.push(pred);
            extended_residuals.push(0.0);
        }
        let forecast_diff = &extended[diffed.len()..];

        // Undo seasonal differencing, then ordinary differencing.
        let seasonal_level = seasonal_integrate(
            forecast_diff,
            regular,
            self.seasonal.d,
            self.seasonal.period,
        );
        let predictions = integrate(&seasonal_level, original, self.order.d);

        Ok(Forecast::from_values(predictions))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let forecast = self.predict(horizon)?;
        if horizon == 0 {
            return Ok(forecast);
        }

        let variance = self.residual_variance.unwrap_or(0.0);
        let z = quantile_normal((1.0 + level) / 2.0);
        let point = forecast.point();

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &mean) in point.iter().enumerate() {
            // Forecast variance grows with horizon
            let se = (variance * (h + 1) as f64).sqrt();
            lower.push(mean - z * se);
            upper.push(mean + z * se);
        }

        Ok(Forecast::from_values_with_intervals(
            point.to_vec(),
            lower,
            upper,
        ))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SARIMA"
    }
}
