//! Differencing and integration utilities for the seasonal ARIMA model.

/// Apply ordinary differencing `d` times.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply seasonal differencing `d` times at the given period.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Reverse ordinary differencing for forecast values.
///
/// `history` is the series as it was before the `d` rounds of differencing;
/// its tail supplies the initial values for each integration level.
pub fn integrate(forecast_diff: &[f64], history: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast_diff.is_empty() {
        return forecast_diff.to_vec();
    }

    let mut result = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let base = difference(history, level);
        let mut cumsum = base.last().copied().unwrap_or(0.0);
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Reverse seasonal differencing for forecast values.
///
/// `history` is the series before the `d` rounds of seasonal differencing;
/// each forecast step adds back the value one period earlier.
pub fn seasonal_integrate(
    forecast_diff: &[f64],
    history: &[f64],
    d: usize,
    period: usize,
) -> Vec<f64> {
    if d == 0 || period == 0 || forecast_diff.is_empty() {
        return forecast_diff.to_vec();
    }

    let mut result = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let base = seasonal_difference(history, level, period);
        let mut integrated: Vec<f64> = Vec::with_capacity(result.len());
        for (i, &value) in result.iter().enumerate() {
            let previous = if i >= period {
                integrated[i - period]
            } else if base.len() + i >= period {
                base[base.len() + i - period]
            } else {
                0.0
            };
            integrated.push(value + previous);
        }
        result = integrated;
    }
    result
}
