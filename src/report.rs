//! Report rendering: the daily forecast table and the monthly forecast chart.

use crate::analysis::WeekdayMonthPivot;
use crate::core::TimeSeries;
use crate::data::{month_name, weekday_name};
use crate::error::{ForecastError, Result};
use crate::runner::{DailyForecastReport, IntervalForecast};
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

const DATE_WIDTH: usize = 12;
const DAY_WIDTH: usize = 11;

/// Render the daily forecast report as a fixed-width text table.
///
/// One row per forecast date, with the day of week and one column per
/// service category, in the report's column order.
pub fn render_daily_table(report: &DailyForecastReport) -> String {
    let widths: Vec<usize> = report
        .columns
        .iter()
        .map(|c| c.label.len().max(8))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{:<DATE_WIDTH$}{:<DAY_WIDTH$}", "Date", "Day"));
    for (column, width) in report.columns.iter().zip(&widths) {
        out.push_str(&format!("{:>w$}  ", column.label, w = *width));
    }
    out.push('\n');

    for (i, date) in report.dates.iter().enumerate() {
        out.push_str(&format!(
            "{:<DATE_WIDTH$}{:<DAY_WIDTH$}",
            date.format("%Y-%m-%d").to_string(),
            weekday_name(date.weekday()),
        ));
        for (column, width) in report.columns.iter().zip(&widths) {
            let value = column.values.get(i).copied().unwrap_or(0);
            out.push_str(&format!("{:>w$}  ", value, w = *width));
        }
        out.push('\n');
    }

    let fallbacks: Vec<&str> = report
        .columns
        .iter()
        .filter(|c| c.outcome.is_fallback())
        .map(|c| c.label.as_str())
        .collect();
    if !fallbacks.is_empty() {
        out.push_str(&format!(
            "\nLast-value fallback used for: {}\n",
            fallbacks.join(", ")
        ));
    }

    out
}

/// Plot the monthly history and forecast with its confidence band to a PNG.
///
/// History is drawn in blue, the forecast mean in red, and the interval as a
/// shaded band around it.
pub fn render_monthly_chart(
    history: &TimeSeries,
    forecast: &IntervalForecast,
    path: &Path,
) -> Result<()> {
    let first = history.dates().first().copied().ok_or(ForecastError::EmptyData)?;
    if forecast.dates.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    // Day offsets from the first observation keep the x axis numeric.
    let to_x = |d: NaiveDate| (d - first).num_days();
    let x_max = to_x(*forecast.dates.last().unwrap_or(&first));

    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;
    for &v in history.values().iter().chain(&forecast.lower).chain(&forecast.upper) {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    let pad = (y_max - y_min).max(1.0) * 0.05;

    let root = BitMapBackend::new(path, (1024, 576)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Total Journeys Forecast", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(0i64..x_max + 1, (y_min - pad)..(y_max + pad))
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| (first + chrono::Duration::days(*x)).format("%Y-%m").to_string())
        .y_desc("Journeys")
        .draw()
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    // Confidence band first so the lines draw over it
    let band: Vec<(i64, f64)> = forecast
        .dates
        .iter()
        .zip(&forecast.upper)
        .map(|(&d, &v)| (to_x(d), v))
        .chain(
            forecast
                .dates
                .iter()
                .zip(&forecast.lower)
                .rev()
                .map(|(&d, &v)| (to_x(d), v)),
        )
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(band, RED.mix(0.15))))
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            history
                .dates()
                .iter()
                .zip(history.values())
                .map(|(&d, &v)| (to_x(d), v)),
            BLUE.stroke_width(2),
        ))
        .map_err(|e| ForecastError::Render(e.to_string()))?
        .label("History")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            forecast
                .dates
                .iter()
                .zip(&forecast.mean)
                .map(|(&d, &v)| (to_x(d), v)),
            RED.stroke_width(2),
        ))
        .map_err(|e| ForecastError::Render(e.to_string()))?
        .label("Forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ForecastError::Render(e.to_string()))?;
    Ok(())
}

/// Plot the weekday-by-month ridership averages as a heatmap PNG.
///
/// Cell shading scales with the average total; unobserved cells stay blank.
pub fn render_weekday_month_heatmap(pivot: &WeekdayMonthPivot, path: &Path) -> Result<()> {
    if pivot.months.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for (_, cells) in &pivot.rows {
        for &v in cells.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo > hi {
        return Err(ForecastError::EmptyData);
    }
    let span = (hi - lo).max(1.0);

    let root = BitMapBackend::new(path, (900, 480)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Daily Total by Weekday and Month", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0i32..pivot.months.len() as i32, 0i32..7i32)
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(pivot.months.len())
        .y_labels(7)
        .x_label_formatter(&|x| {
            pivot
                .months
                .get(*x as usize)
                .map(|&m| month_name(m).to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            pivot
                .rows
                .get(*y as usize)
                .map(|(w, _)| weekday_name(*w).to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    chart
        .draw_series(pivot.rows.iter().enumerate().flat_map(|(row, (_, cells))| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(move |(col, &v)| {
                    let shade = 0.1 + 0.9 * (v - lo) / span;
                    Rectangle::new(
                        [(col as i32, row as i32), (col as i32 + 1, row as i32 + 1)],
                        BLUE.mix(shade).filled(),
                    )
                })
                .collect::<Vec<_>>()
        }))
        .map_err(|e| ForecastError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ForecastError::Render(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{SeriesForecast, SeriesOutcome};
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_report() -> DailyForecastReport {
        // 2024-06-03 is a Monday
        let dates = (0..3).map(|i| day(2024, 6, 3) + Duration::days(i)).collect();
        DailyForecastReport {
            dates,
            columns: vec![
                SeriesForecast {
                    label: "Local Route".to_string(),
                    values: vec![1200, 1150, 1300],
                    outcome: SeriesOutcome::Fitted,
                },
                SeriesForecast {
                    label: "Other".to_string(),
                    values: vec![3, 3, 3],
                    outcome: SeriesOutcome::Fallback {
                        reason: "insufficient data: need at least 10, got 3".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_date() {
        let text = render_daily_table(&sample_report());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Date"));
        assert!(lines[0].contains("Local Route"));
        assert!(lines[0].contains("Other"));
        assert!(lines[1].starts_with("2024-06-03"));
        assert!(lines[1].contains("Monday"));
        assert!(lines[1].contains("1200"));
        assert!(lines[3].starts_with("2024-06-05"));
        assert!(lines[3].contains("Wednesday"));
    }

    #[test]
    fn table_notes_fallback_columns() {
        let text = render_daily_table(&sample_report());
        assert!(text.contains("Last-value fallback used for: Other"));
    }

    #[test]
    fn table_omits_fallback_note_when_all_fitted() {
        let mut report = sample_report();
        report.columns[1].outcome = SeriesOutcome::Fitted;
        let text = render_daily_table(&report);
        assert!(!text.contains("fallback"));
    }

    #[test]
    fn chart_writes_png() {
        let dates: Vec<NaiveDate> = (0..24)
            .map(|i| day(2022 + i / 12, (i % 12) as u32 + 1, 28))
            .collect();
        let values: Vec<f64> = (0..24).map(|i| 200_000.0 + 1_000.0 * i as f64).collect();
        let history = TimeSeries::new("Total Journeys (monthly)", dates, values).unwrap();

        let forecast = IntervalForecast {
            dates: (0..6).map(|i| day(2024, i + 1, 28)).collect(),
            mean: (0..6).map(|i| 225_000.0 + 1_000.0 * i as f64).collect(),
            lower: (0..6).map(|i| 220_000.0 + 1_000.0 * i as f64).collect(),
            upper: (0..6).map(|i| 230_000.0 + 1_000.0 * i as f64).collect(),
            summary: String::new(),
        };

        let path = std::env::temp_dir().join("ridership-report-chart.png");
        render_monthly_chart(&history, &forecast, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn heatmap_writes_png() {
        use chrono::Weekday;

        let pivot = WeekdayMonthPivot {
            months: vec![1, 2],
            rows: vec![
                (Weekday::Mon, vec![1000.0, 900.0]),
                (Weekday::Tue, vec![1100.0, f64::NAN]),
                (Weekday::Wed, vec![1050.0, 980.0]),
                (Weekday::Thu, vec![1020.0, 960.0]),
                (Weekday::Fri, vec![990.0, 940.0]),
                (Weekday::Sat, vec![400.0, 380.0]),
                (Weekday::Sun, vec![350.0, 330.0]),
            ],
        };

        let path = std::env::temp_dir().join("ridership-report-heatmap.png");
        render_weekday_month_heatmap(&pivot, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn heatmap_rejects_empty_pivot() {
        let pivot = WeekdayMonthPivot {
            months: vec![],
            rows: vec![],
        };
        let path = std::env::temp_dir().join("ridership-report-heatmap-none.png");
        assert!(render_weekday_month_heatmap(&pivot, &path).is_err());
    }

    #[test]
    fn chart_rejects_empty_history() {
        let history = TimeSeries::new("empty", vec![], vec![]).unwrap();
        let forecast = IntervalForecast {
            dates: vec![day(2024, 1, 31)],
            mean: vec![1.0],
            lower: vec![0.0],
            upper: vec![2.0],
            summary: String::new(),
        };
        let path = std::env::temp_dir().join("ridership-report-none.png");
        assert!(render_monthly_chart(&history, &forecast, &path).is_err());
    }
}
