use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{TempField, TemperatureRecord, TemperatureTable};

/// Mean over one year's slice of the window's month-day span.
#[derive(Debug, Clone, Serialize)]
pub struct YearlyWindowAverage {
    pub year: i32,
    pub avg_high: f64,
    pub avg_mean: f64,
    pub avg_low: f64,
    pub sample_size: usize,
}

impl YearlyWindowAverage {
    pub fn field(&self, field: TempField) -> f64 {
        match field {
            TempField::High => self.avg_high,
            TempField::Mean => self.avg_mean,
            TempField::Low => self.avg_low,
        }
    }
}

/// Averages over the trailing window plus the distribution of the same
/// window-of-year averages across every historical year.
#[derive(Debug, Clone, Serialize)]
pub struct TrailingWindowStats {
    pub window_days: u32,
    /// Half-open bounds: records with `start <= date < end` are in the
    /// window; the reference date itself is excluded.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub avg_high: f64,
    pub avg_mean: f64,
    pub avg_low: f64,
    pub sample_size: usize,
    pub per_year: Vec<YearlyWindowAverage>,
}

/// Value-based rank of the current window average within the per-year
/// distribution. The percentile is the raw share of years strictly below
/// the current value; any "top X%" inversion belongs to presentation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindowRank {
    pub rank: usize,
    pub percentile: f64,
    pub population: usize,
}

/// Computes averages over the `window_days` calendar days strictly before
/// `reference_date`, and per-year averages over the same month-day span
/// ignoring year.
pub fn trailing_window_stats(
    table: &TemperatureTable,
    reference_date: NaiveDate,
    window_days: u32,
) -> Result<TrailingWindowStats> {
    if window_days == 0 {
        return Err(AnalysisError::InvalidWindow(0));
    }

    let start = reference_date - Duration::days(window_days as i64);
    let in_window: Vec<&TemperatureRecord> =
        table.records_between(start, reference_date).collect();
    if in_window.is_empty() {
        return Err(AnalysisError::EmptySelection(format!(
            "no records in the {} days before {}",
            window_days, reference_date
        )));
    }

    let (avg_high, avg_mean, avg_low) = averages(&in_window);

    // Month-day span of the window, ignoring year. Spans crossing a year
    // boundary or containing Feb 29 fall out naturally.
    let span: HashSet<(u32, u32)> = (1..=window_days as i64)
        .map(|i| {
            let d = reference_date - Duration::days(i);
            (chrono::Datelike::month(&d), chrono::Datelike::day(&d))
        })
        .collect();

    let mut per_year: Vec<YearlyWindowAverage> = Vec::new();
    let mut bucket: Vec<&TemperatureRecord> = Vec::new();
    let mut current_year: Option<i32> = None;

    // Table records are date-sorted, so one pass groups by year.
    for record in table.records() {
        if !span.contains(&record.month_day()) {
            continue;
        }
        if current_year != Some(record.year()) {
            if let Some(year) = current_year {
                per_year.push(yearly_average(year, &bucket));
                bucket.clear();
            }
            current_year = Some(record.year());
        }
        bucket.push(record);
    }
    if let Some(year) = current_year {
        per_year.push(yearly_average(year, &bucket));
    }

    Ok(TrailingWindowStats {
        window_days,
        start,
        end: reference_date,
        avg_high,
        avg_mean,
        avg_low,
        sample_size: in_window.len(),
        per_year,
    })
}

impl TrailingWindowStats {
    pub fn avg(&self, field: TempField) -> f64 {
        match field {
            TempField::High => self.avg_high,
            TempField::Mean => self.avg_mean,
            TempField::Low => self.avg_low,
        }
    }

    /// Mean of the per-year window averages, the "historical same-period
    /// average" figure.
    pub fn historical_avg(&self, field: TempField) -> f64 {
        let sum: f64 = self.per_year.iter().map(|y| y.field(field)).sum();
        sum / self.per_year.len() as f64
    }

    /// Ranks the current window average within the per-year distribution.
    pub fn rank_in_history(&self, field: TempField) -> Result<WindowRank> {
        if self.per_year.is_empty() {
            return Err(AnalysisError::EmptySelection(
                "no historical years cover the window's month-day span".to_string(),
            ));
        }

        let current = self.avg(field);
        let below = self
            .per_year
            .iter()
            .filter(|y| y.field(field) < current)
            .count();
        let above = self
            .per_year
            .iter()
            .filter(|y| y.field(field) > current)
            .count();
        let population = self.per_year.len();

        Ok(WindowRank {
            rank: above + 1,
            percentile: 100.0 * below as f64 / population as f64,
            population,
        })
    }
}

fn averages(records: &[&TemperatureRecord]) -> (f64, f64, f64) {
    let n = records.len() as f64;
    let (mut high, mut mean, mut low) = (0.0, 0.0, 0.0);
    for record in records {
        high += record.high;
        mean += record.mean;
        low += record.low;
    }
    (high / n, mean / n, low / n)
}

fn yearly_average(year: i32, records: &[&TemperatureRecord]) -> YearlyWindowAverage {
    let (avg_high, avg_mean, avg_low) = averages(records);
    YearlyWindowAverage {
        year,
        avg_high,
        avg_mean,
        avg_low,
        sample_size: records.len(),
    }
}
