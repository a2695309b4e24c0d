//! Forecasting models.

mod naive;
pub mod sarima;
mod traits;

pub use naive::Naive;
pub use sarima::{Order, Sarima, SeasonalOrder};
pub use traits::Forecaster;
