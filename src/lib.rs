//! # ridership-forecast
//!
//! Forecasting toolkit for a daily public-transport ridership dataset.
//!
//! Loads and cleans the daily journey counts, produces 7-day per-category
//! forecasts with a seasonal ARIMA model (falling back to the last observed
//! value when a fit fails), and a 12-month forecast of the aggregated totals
//! with 95% confidence intervals, rendered as a chart.

#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::data::{load_table, RidershipTable, ServiceType};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Forecaster, Naive, Order, Sarima, SeasonalOrder};
    pub use crate::runner::{
        forecast_series, forecast_total_with_interval, run_daily, DailyForecastReport,
        ForecastConfig, IntervalForecast, SeriesForecast, SeriesOutcome,
    };
}
