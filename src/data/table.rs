//! Cleaned daily ridership table with derived views.

use crate::core::TimeSeries;
use crate::error::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// The six service categories, in their declared column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    LocalRoute,
    LightRail,
    PeakService,
    RapidRoute,
    School,
    Other,
}

impl ServiceType {
    /// All categories, in the fixed order forecasts are produced.
    pub const ALL: [ServiceType; 6] = [
        ServiceType::LocalRoute,
        ServiceType::LightRail,
        ServiceType::PeakService,
        ServiceType::RapidRoute,
        ServiceType::School,
        ServiceType::Other,
    ];

    /// CSV column header for this category.
    pub fn column_name(&self) -> &'static str {
        match self {
            ServiceType::LocalRoute => "Local Route",
            ServiceType::LightRail => "Light Rail",
            ServiceType::PeakService => "Peak Service",
            ServiceType::RapidRoute => "Rapid Route",
            ServiceType::School => "School",
            ServiceType::Other => "Other",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One cleaned day of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Journey counts indexed by [`ServiceType::ALL`] order.
    pub counts: [f64; 6],
}

impl DayRecord {
    /// Sum of all category counts for the day.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}

/// The cleaned dataset: sorted daily records plus the derived total column.
///
/// Totals are stored separately so that anomaly imputation can adjust a
/// day's total without inventing per-category counts for it.
#[derive(Debug, Clone)]
pub struct RidershipTable {
    records: Vec<DayRecord>,
    totals: Vec<f64>,
}

impl RidershipTable {
    /// Build a table from records, sorting ascending by date.
    ///
    /// Duplicate rows for the same date are summed into one record, so the
    /// derived series always have unique dates.
    pub fn new(mut records: Vec<DayRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        let mut merged: Vec<DayRecord> = Vec::with_capacity(records.len());
        for record in records {
            match merged.last_mut() {
                Some(last) if last.date == record.date => {
                    for (slot, value) in last.counts.iter_mut().zip(record.counts) {
                        *slot += value;
                    }
                }
                _ => merged.push(record),
            }
        }
        let totals = merged.iter().map(|r| r.total()).collect();
        Self {
            records: merged,
            totals,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    /// Derived daily totals, aligned with `records()`.
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Last observation date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Daily series for one service category.
    pub fn series(&self, service: ServiceType) -> Result<TimeSeries> {
        let dates = self.records.iter().map(|r| r.date).collect();
        let values = self
            .records
            .iter()
            .map(|r| r.counts[service.index()])
            .collect();
        TimeSeries::new(service.column_name(), dates, values)
    }

    /// Daily series of total journeys.
    pub fn total_series(&self) -> Result<TimeSeries> {
        let dates = self.records.iter().map(|r| r.date).collect();
        TimeSeries::new("Total Journeys", dates, self.totals.clone())
    }

    /// Replace one day's total with the rounded mean of all other days that
    /// fall on the same weekday. Returns the imputed value, or `None` when
    /// the date is absent or has no peers to average.
    pub fn impute_total_anomaly(&mut self, date: NaiveDate) -> Option<f64> {
        let target = self.records.iter().position(|r| r.date == date)?;
        let weekday = date.weekday();

        let peers: Vec<f64> = self
            .records
            .iter()
            .zip(self.totals.iter())
            .filter(|(r, _)| r.date != date && r.date.weekday() == weekday)
            .map(|(_, &t)| t)
            .collect();
        if peers.is_empty() {
            return None;
        }

        let imputed = (peers.iter().sum::<f64>() / peers.len() as f64).round();
        self.totals[target] = imputed;
        Some(imputed)
    }

    /// Resample daily totals to month-end sums.
    ///
    /// The sum of the monthly values equals the sum of the daily totals.
    pub fn monthly_totals(&self) -> Result<TimeSeries> {
        let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for (record, &total) in self.records.iter().zip(self.totals.iter()) {
            *buckets
                .entry((record.date.year(), record.date.month()))
                .or_insert(0.0) += total;
        }

        let mut dates = Vec::with_capacity(buckets.len());
        let mut values = Vec::with_capacity(buckets.len());
        for ((year, month), sum) in buckets {
            dates.push(month_end(year, month));
            values.push(sum);
        }
        TimeSeries::new("Total Journeys (monthly)", dates, values)
    }
}

/// Last calendar day of the given month.
pub fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Full English name of a weekday, for report output.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a month (1-based), for report output.
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    if month == 0 || month > 12 {
        return "Unknown";
    }
    NAMES[(month - 1) as usize]
}
