//! Core data structures for ridership forecasting.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::TimeSeries;
