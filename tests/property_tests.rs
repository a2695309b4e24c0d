//! Property-based tests for the forecast runner.
//!
//! These verify invariants that must hold for arbitrary daily series: the
//! runner is total, the horizon is always honored, and degenerate inputs take
//! the deterministic zero path.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use ridership_forecast::core::TimeSeries;
use ridership_forecast::runner::{forecast_series, ForecastConfig, SeriesOutcome};

fn make_series(values: &[f64]) -> TimeSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..values.len())
        .map(|i| base + Duration::days(i as i64))
        .collect();
    TimeSeries::new("Local Route", dates, values.to_vec()).unwrap()
}

/// Nonnegative daily counts of arbitrary length, including lengths shorter
/// than the warm-up skip.
fn counts_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..5_000.0f64, 0..250)
        .prop_map(|v| v.into_iter().map(|x| x.round()).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn forecast_always_honors_the_horizon(values in counts_strategy()) {
        let config = ForecastConfig::daily();
        let forecast = forecast_series(&make_series(&values), &config);
        prop_assert_eq!(forecast.values.len(), config.horizon);
    }

    #[test]
    fn fallback_repeats_the_last_value(
        head in prop::collection::vec(100.0..200.0f64, 100..101),
        tail in prop::collection::vec(1.0..500.0f64, 1..6),
    ) {
        // After the warm-up skip only 1-5 nonzero points remain, so the
        // seasonal fit cannot succeed and the last value is repeated.
        let mut values: Vec<f64> = head.into_iter().map(|x| x.round()).collect();
        values.extend(tail.iter().map(|x| x.round()));
        let config = ForecastConfig::daily();

        let forecast = forecast_series(&make_series(&values), &config);
        prop_assert!(forecast.outcome.is_fallback());
        let last = *values.last().unwrap() as i64;
        prop_assert!(forecast.values.iter().all(|&v| v == last));
    }

    #[test]
    fn degenerate_tail_forecasts_zeros(
        head in prop::collection::vec(1.0..100.0f64, 0..100),
        zeros in 0usize..30,
    ) {
        // Everything after the skip is zero (or absent)
        let mut values = head;
        values.truncate(100);
        values.extend(std::iter::repeat(0.0).take(zeros));
        let config = ForecastConfig::daily();

        let forecast = forecast_series(&make_series(&values), &config);
        prop_assert_eq!(forecast.values, vec![0i64; config.horizon]);
        prop_assert_eq!(forecast.outcome, SeriesOutcome::Fitted);
    }

    #[test]
    fn constant_series_forecasts_stay_near_the_level(
        level in 100.0..2_000.0f64,
    ) {
        let level = level.round();
        let values = vec![level; 160];
        let config = ForecastConfig::daily();

        let forecast = forecast_series(&make_series(&values), &config);
        prop_assert_eq!(forecast.outcome, SeriesOutcome::Fitted);
        for &v in &forecast.values {
            prop_assert!((v as f64 - level).abs() <= 2.0, "forecast {} for level {}", v, level);
        }
    }
}
