//! Date-indexed univariate time series.

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// A labelled daily (or monthly) series of observations.
///
/// Dates are strictly increasing; values are journey counts and therefore
/// non-negative in practice, though this is not validated mechanically.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    label: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating date ordering.
    pub fn new(
        label: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::DateOrder);
            }
        }
        Ok(Self {
            label: label.into(),
            dates,
            values,
        })
    }

    /// Series label (the service-type column it came from).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Last observation date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Last observed value, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Sum of all observed values.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Drop the first `n` observations (the warm-up window).
    ///
    /// Returns an empty series when `n` exceeds the length.
    pub fn skip_leading(&self, n: usize) -> TimeSeries {
        let start = n.min(self.len());
        TimeSeries {
            label: self.label.clone(),
            dates: self.dates[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Consecutive calendar days following the last observation.
    ///
    /// Empty when the series has no observations.
    pub fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        match self.last_date() {
            Some(last) => (1..=horizon as i64)
                .map(|offset| last + Duration::days(offset))
                .collect(),
            None => Vec::new(),
        }
    }
}
