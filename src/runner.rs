//! Forecast runner: per-category daily forecasts with a robust fallback, and
//! the monthly aggregate forecast with confidence intervals.

use crate::core::TimeSeries;
use crate::data::{month_end, RidershipTable, ServiceType};
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, Naive, Order, Sarima, SeasonalOrder};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

/// Hyperparameters for one forecasting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastConfig {
    /// Non-seasonal (p, d, q) degrees.
    pub order: Order,
    /// Seasonal (P, D, Q, period) degrees.
    pub seasonal: SeasonalOrder,
    /// Number of future periods to forecast.
    pub horizon: usize,
    /// Leading observations discarded before fitting, to exclude the
    /// volatile early regime.
    pub warm_up_skip: usize,
}

impl ForecastConfig {
    /// Per-category daily configuration: SARIMA(0,1,0)(1,0,0,7), 7-day
    /// horizon, first 100 days skipped.
    pub fn daily() -> Self {
        Self {
            order: Order::new(0, 1, 0),
            seasonal: SeasonalOrder::new(1, 0, 0, 7),
            horizon: 7,
            warm_up_skip: 100,
        }
    }

    /// Monthly aggregate configuration: SARIMA(1,1,1)(1,1,1,12), 12-month
    /// horizon, no warm-up skip.
    pub fn monthly() -> Self {
        Self {
            order: Order::new(1, 1, 1),
            seasonal: SeasonalOrder::new(1, 1, 1, 12),
            horizon: 12,
            warm_up_skip: 0,
        }
    }
}

/// Terminal state of one series after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesOutcome {
    /// The model fit succeeded (or the series was degenerate and produced a
    /// deterministic all-zero forecast).
    Fitted,
    /// The fit failed and the last observed value was substituted.
    Fallback { reason: String },
}

impl SeriesOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, SeriesOutcome::Fallback { .. })
    }
}

/// Forecast for one series: exactly `horizon` whole-journey values.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesForecast {
    pub label: String,
    pub values: Vec<i64>,
    pub outcome: SeriesOutcome,
}

/// Per-category daily forecast report.
#[derive(Debug, Clone)]
pub struct DailyForecastReport {
    /// Future dates, one per forecast step.
    pub dates: Vec<NaiveDate>,
    /// One forecast column per service category, in declared order.
    pub columns: Vec<SeriesForecast>,
}

/// Monthly aggregate forecast with two-sided interval bounds.
#[derive(Debug, Clone)]
pub struct IntervalForecast {
    /// Month-end dates, one per forecast step.
    pub dates: Vec<NaiveDate>,
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// Textual model fit summary (coefficients, information criteria).
    pub summary: String,
}

/// Forecast one series, never failing.
///
/// The first `warm_up_skip` observations are discarded. A series that is
/// empty or sums to zero after the skip yields `horizon` zeros without any
/// fit attempt. A fit error is recovered by repeating the last observed
/// value, recorded as a [`SeriesOutcome::Fallback`].
pub fn forecast_series(series: &TimeSeries, config: &ForecastConfig) -> SeriesForecast {
    let train = series.skip_leading(config.warm_up_skip);

    if train.is_empty() || train.sum() == 0.0 {
        debug!(series = series.label(), "degenerate series, forecasting zeros");
        return SeriesForecast {
            label: series.label().to_string(),
            values: vec![0; config.horizon],
            outcome: SeriesOutcome::Fitted,
        };
    }

    match fit_and_predict(&train, config) {
        Ok(point) => SeriesForecast {
            label: series.label().to_string(),
            values: point.iter().map(|v| v.round() as i64).collect(),
            outcome: SeriesOutcome::Fitted,
        },
        Err(err) => {
            warn!(
                series = series.label(),
                error = %err,
                "model fit failed, falling back to last observed value"
            );
            SeriesForecast {
                label: series.label().to_string(),
                values: fallback_values(&train, config.horizon),
                outcome: SeriesOutcome::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}

fn fit_and_predict(train: &TimeSeries, config: &ForecastConfig) -> Result<Vec<f64>> {
    let mut model = Sarima::new(config.order, config.seasonal);
    model.fit(train)?;
    let forecast = model.predict(config.horizon)?;
    if forecast.horizon() != config.horizon {
        return Err(ForecastError::DimensionMismatch {
            expected: config.horizon,
            got: forecast.horizon(),
        });
    }
    Ok(forecast.point().to_vec())
}

/// Last-value fallback via the naive model.
fn fallback_values(train: &TimeSeries, horizon: usize) -> Vec<i64> {
    let mut naive = Naive::new();
    let point = naive
        .fit(train)
        .and_then(|_| naive.predict(horizon))
        .map(|f| f.point().to_vec())
        .unwrap_or_else(|_| vec![0.0; horizon]);
    point.iter().map(|v| v.round() as i64).collect()
}

/// Forecast every service category, in declared order.
///
/// Individual fit failures never fail the run; the report always carries one
/// complete column per category.
pub fn run_daily(table: &RidershipTable, config: &ForecastConfig) -> Result<DailyForecastReport> {
    if table.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if config.horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must be positive".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(ServiceType::ALL.len());
    let mut dates = Vec::new();
    for service in ServiceType::ALL {
        let series = table.series(service)?;
        if dates.is_empty() {
            dates = series.future_dates(config.horizon);
        }
        columns.push(forecast_series(&series, config));
    }

    Ok(DailyForecastReport { dates, columns })
}

/// Forecast the monthly aggregate series with 95% confidence intervals.
///
/// Unlike the per-category path there is no fallback here: a fit failure on
/// the single aggregate series terminates the run.
pub fn forecast_total_with_interval(
    series: &TimeSeries,
    config: &ForecastConfig,
) -> Result<IntervalForecast> {
    let train = series.skip_leading(config.warm_up_skip);
    if train.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if config.horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "horizon must be positive".to_string(),
        ));
    }

    let mut model = Sarima::new(config.order, config.seasonal);
    model.fit(&train)?;
    let forecast = model.predict_with_intervals(config.horizon, 0.95)?;

    let lower = forecast
        .lower()
        .ok_or_else(|| ForecastError::FitFailed("no interval bounds produced".to_string()))?
        .to_vec();
    let upper = forecast
        .upper()
        .ok_or_else(|| ForecastError::FitFailed("no interval bounds produced".to_string()))?
        .to_vec();

    let last = train.last_date().ok_or(ForecastError::EmptyData)?;
    Ok(IntervalForecast {
        dates: next_month_ends(last, config.horizon),
        mean: forecast.point().to_vec(),
        lower,
        upper,
        summary: model.summary(),
    })
}

/// Month-end dates for the `horizon` months following `last`.
fn next_month_ends(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(horizon);
    let mut year = last.year();
    let mut month = last.month();
    for _ in 0..horizon {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
        dates.push(month_end(year, month));
    }
    dates
}
