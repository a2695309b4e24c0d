//! Summary statistics over the cleaned ridership table.
//!
//! Reproduces the exploratory measures used for operational planning:
//! weekday/weekend split, day-of-week and monthly ridership profiles, and
//! average usage per service category.

use crate::data::{RidershipTable, ServiceType};
use crate::error::{ForecastError, Result};
use crate::utils::stats::mean;
use chrono::{Datelike, Weekday};

/// Week in Monday-first order, for stable profile output.
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Headline operational statistics for the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub weekday_avg: f64,
    pub weekend_avg: f64,
    /// Percentage drop from weekday to weekend ridership.
    pub weekend_drop_pct: f64,
    pub busiest_day: Weekday,
    pub busiest_day_avg: f64,
    pub quietest_day: Weekday,
    pub quietest_day_avg: f64,
    /// 1-based month number with the highest average daily total.
    pub busiest_month: u32,
    pub busiest_month_avg: f64,
    pub quietest_month: u32,
    pub quietest_month_avg: f64,
}

/// Compute the headline statistics. Fails on an empty table.
pub fn summarize(table: &RidershipTable) -> Result<SummaryStats> {
    if table.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let mut weekday_totals = Vec::new();
    let mut weekend_totals = Vec::new();
    for (record, &total) in table.records().iter().zip(table.totals()) {
        if is_weekend(record.date.weekday()) {
            weekend_totals.push(total);
        } else {
            weekday_totals.push(total);
        }
    }

    let weekday_avg = mean(&weekday_totals);
    let weekend_avg = mean(&weekend_totals);
    let weekend_drop_pct = if weekday_avg > 0.0 {
        (1.0 - weekend_avg / weekday_avg) * 100.0
    } else {
        0.0
    };

    let days = day_of_week_averages(table);
    let (busiest_day, busiest_day_avg) = pick_max(days.iter().map(|&(d, v)| (d, v)))?;
    let (quietest_day, quietest_day_avg) = pick_min(days.iter().map(|&(d, v)| (d, v)))?;

    let months = monthly_averages(table);
    let (busiest_month, busiest_month_avg) = pick_max(months.iter().copied())?;
    let (quietest_month, quietest_month_avg) = pick_min(months.iter().copied())?;

    Ok(SummaryStats {
        weekday_avg,
        weekend_avg,
        weekend_drop_pct,
        busiest_day,
        busiest_day_avg,
        quietest_day,
        quietest_day_avg,
        busiest_month,
        busiest_month_avg,
        quietest_month,
        quietest_month_avg,
    })
}

/// Average daily total per day of week, Monday first.
///
/// Days with no observations are omitted.
pub fn day_of_week_averages(table: &RidershipTable) -> Vec<(Weekday, f64)> {
    WEEK.iter()
        .filter_map(|&weekday| {
            let totals: Vec<f64> = table
                .records()
                .iter()
                .zip(table.totals())
                .filter(|(r, _)| r.date.weekday() == weekday)
                .map(|(_, &t)| t)
                .collect();
            if totals.is_empty() {
                None
            } else {
                Some((weekday, mean(&totals)))
            }
        })
        .collect()
}

/// Average daily total per calendar month (1-based), ascending by month.
///
/// Months with no observations are omitted.
pub fn monthly_averages(table: &RidershipTable) -> Vec<(u32, f64)> {
    (1..=12u32)
        .filter_map(|month| {
            let totals: Vec<f64> = table
                .records()
                .iter()
                .zip(table.totals())
                .filter(|(r, _)| r.date.month() == month)
                .map(|(_, &t)| t)
                .collect();
            if totals.is_empty() {
                None
            } else {
                Some((month, mean(&totals)))
            }
        })
        .collect()
}

/// Day-of-week by calendar-month averages of the daily total.
///
/// Backing data for the ridership heatmap: one row per weekday (Monday
/// first), one column per observed month.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayMonthPivot {
    /// Observed calendar months (1-based), ascending.
    pub months: Vec<u32>,
    /// Average total per weekday, aligned with `months`. Cells with no
    /// observations hold NaN.
    pub rows: Vec<(Weekday, Vec<f64>)>,
}

/// Pivot the daily totals into a weekday-by-month average grid.
pub fn weekday_month_pivot(table: &RidershipTable) -> WeekdayMonthPivot {
    let months: Vec<u32> = (1..=12u32)
        .filter(|&m| table.records().iter().any(|r| r.date.month() == m))
        .collect();

    let rows = WEEK
        .iter()
        .map(|&weekday| {
            let cells = months
                .iter()
                .map(|&month| {
                    let totals: Vec<f64> = table
                        .records()
                        .iter()
                        .zip(table.totals())
                        .filter(|(r, _)| {
                            r.date.weekday() == weekday && r.date.month() == month
                        })
                        .map(|(_, &t)| t)
                        .collect();
                    mean(&totals)
                })
                .collect();
            (weekday, cells)
        })
        .collect();

    WeekdayMonthPivot { months, rows }
}

/// Average daily journeys per service category, busiest first.
pub fn service_averages(table: &RidershipTable) -> Vec<(ServiceType, f64)> {
    let mut averages: Vec<(ServiceType, f64)> = ServiceType::ALL
        .iter()
        .enumerate()
        .map(|(i, &service)| {
            let values: Vec<f64> = table.records().iter().map(|r| r.counts[i]).collect();
            (service, mean(&values))
        })
        .collect();
    averages.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    averages
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn pick_max<K: Copy>(items: impl Iterator<Item = (K, f64)>) -> Result<(K, f64)> {
    items
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or(ForecastError::EmptyData)
}

fn pick_min<K: Copy>(items: impl Iterator<Item = (K, f64)>) -> Result<(K, f64)> {
    items
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or(ForecastError::EmptyData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DayRecord;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two weeks starting Monday 2024-01-01: weekdays carry 1000, weekends 400.
    fn two_week_table() -> RidershipTable {
        let records = (0..14)
            .map(|i| {
                let date = day(2024, 1, 1) + Duration::days(i);
                let total = if is_weekend(date.weekday()) { 400.0 } else { 1000.0 };
                DayRecord {
                    date,
                    counts: [total, 0.0, 0.0, 0.0, 0.0, 0.0],
                }
            })
            .collect();
        RidershipTable::new(records)
    }

    #[test]
    fn weekend_drop_is_measured() {
        let stats = summarize(&two_week_table()).unwrap();

        assert_relative_eq!(stats.weekday_avg, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(stats.weekend_avg, 400.0, epsilon = 1e-9);
        assert_relative_eq!(stats.weekend_drop_pct, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn day_profile_covers_observed_days_in_week_order() {
        let profile = day_of_week_averages(&two_week_table());
        assert_eq!(profile.len(), 7);
        assert_eq!(profile[0].0, Weekday::Mon);
        assert_eq!(profile[6].0, Weekday::Sun);
        assert_relative_eq!(profile[0].1, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(profile[5].1, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn peaks_and_troughs_identified() {
        // January heavier than February
        let mut records: Vec<DayRecord> = (0..31)
            .map(|i| DayRecord {
                date: day(2024, 1, 1) + Duration::days(i),
                counts: [900.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            })
            .collect();
        records.extend((0..29).map(|i| DayRecord {
            date: day(2024, 2, 1) + Duration::days(i),
            counts: [300.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        }));
        let stats = summarize(&RidershipTable::new(records)).unwrap();

        assert_eq!(stats.busiest_month, 1);
        assert_relative_eq!(stats.busiest_month_avg, 900.0, epsilon = 1e-9);
        assert_eq!(stats.quietest_month, 2);
        assert_relative_eq!(stats.quietest_month_avg, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn pivot_crosses_weekday_with_month() {
        // Two January weeks plus one February Monday at a different level
        let mut records: Vec<DayRecord> = (0..14)
            .map(|i| {
                let date = day(2024, 1, 1) + Duration::days(i);
                let total = if is_weekend(date.weekday()) { 400.0 } else { 1000.0 };
                DayRecord {
                    date,
                    counts: [total, 0.0, 0.0, 0.0, 0.0, 0.0],
                }
            })
            .collect();
        records.push(DayRecord {
            date: day(2024, 2, 5), // a Monday
            counts: [700.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        });
        let pivot = weekday_month_pivot(&RidershipTable::new(records));

        assert_eq!(pivot.months, vec![1, 2]);
        assert_eq!(pivot.rows.len(), 7);

        let (monday, monday_cells) = &pivot.rows[0];
        assert_eq!(*monday, Weekday::Mon);
        assert_relative_eq!(monday_cells[0], 1000.0, epsilon = 1e-9);
        assert_relative_eq!(monday_cells[1], 700.0, epsilon = 1e-9);

        // No February Tuesdays observed
        let (_, tuesday_cells) = &pivot.rows[1];
        assert!(tuesday_cells[1].is_nan());
    }

    #[test]
    fn service_averages_sorted_descending() {
        let records = vec![DayRecord {
            date: day(2024, 1, 1),
            counts: [100.0, 500.0, 5.0, 300.0, 50.0, 1.0],
        }];
        let averages = service_averages(&RidershipTable::new(records));

        assert_eq!(averages[0].0, ServiceType::LightRail);
        assert_eq!(averages[1].0, ServiceType::RapidRoute);
        assert_eq!(averages[5].0, ServiceType::Other);
    }

    #[test]
    fn empty_table_is_an_error() {
        let empty = RidershipTable::new(vec![]);
        assert!(matches!(summarize(&empty), Err(ForecastError::EmptyData)));
    }
}
