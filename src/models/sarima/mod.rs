//! Seasonal ARIMA model and its differencing utilities.

pub mod diff;
mod model;

pub use model::{Order, Sarima, SeasonalOrder};
