//! Forecaster trait defining the common interface for the models.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for forecasting models.
///
/// Object-safe, so a fallback model can stand in for the primary one behind
/// `Box<dyn Forecaster>` if callers want that.
pub trait Forecaster {
    /// Fit the model to the series.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Generate predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Generate predictions with two-sided confidence intervals.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        // Models without native intervals return point predictions only
        let _ = level;
        self.predict(horizon)
    }

    /// In-sample fitted values, once fitted.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals (actual - fitted), once fitted.
    fn residuals(&self) -> Option<&[f64]>;

    /// Model display name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Naive;
    use chrono::{Duration, NaiveDate};

    fn make_series(values: &[f64]) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new("test", dates, values.to_vec()).unwrap()
    }

    #[test]
    fn boxed_forecaster_fit_predict() {
        let mut model: Box<dyn Forecaster> = Box::new(Naive::new());
        assert!(!model.is_fitted());

        let ts = make_series(&[1.0, 2.0, 3.0, 4.0]);
        model.fit(&ts).unwrap();
        assert!(model.is_fitted());

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.horizon(), 5);
        assert_eq!(model.name(), "Naive");
    }

    #[test]
    fn default_interval_impl_returns_point_predictions() {
        struct PointOnly(Option<Vec<f64>>);
        impl Forecaster for PointOnly {
            fn fit(&mut self, series: &TimeSeries) -> Result<()> {
                self.0 = Some(series.values().to_vec());
                Ok(())
            }
            fn predict(&self, horizon: usize) -> Result<Forecast> {
                Ok(Forecast::from_values(vec![0.0; horizon]))
            }
            fn fitted_values(&self) -> Option<&[f64]> {
                self.0.as_deref()
            }
            fn residuals(&self) -> Option<&[f64]> {
                None
            }
            fn name(&self) -> &str {
                "PointOnly"
            }
        }

        let mut model = PointOnly(None);
        model.fit(&make_series(&[1.0, 2.0])).unwrap();
        let forecast = model.predict_with_intervals(3, 0.95).unwrap();
        assert_eq!(forecast.horizon(), 3);
        assert!(!forecast.has_intervals());
    }
}
