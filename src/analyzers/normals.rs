use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{TempField, TemperatureTable};

/// Which period a climatological normal was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalSource {
    BasePeriod { start: i32, end: i32 },
    /// The base period had no same-day records; the caller's selected
    /// year range was used instead.
    YearRangeFallback { start: i32, end: i32 },
}

impl NormalSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, NormalSource::YearRangeFallback { .. })
    }

    pub fn years(&self) -> (i32, i32) {
        match *self {
            NormalSource::BasePeriod { start, end } => (start, end),
            NormalSource::YearRangeFallback { start, end } => (start, end),
        }
    }
}

/// Mean high/mean/low over same-day records in a fixed base period.
#[derive(Debug, Clone, Serialize)]
pub struct ClimatologyNormal {
    pub high: f64,
    pub mean: f64,
    pub low: f64,
    pub sample_size: usize,
    pub source: NormalSource,
}

impl ClimatologyNormal {
    pub fn field(&self, field: TempField) -> f64 {
        match field {
            TempField::High => self.high,
            TempField::Mean => self.mean,
            TempField::Low => self.low,
        }
    }
}

/// Computes the climatological normal for `reference_date`'s month-day
/// over `base_years` (commonly 1991-2020). If the base period holds no
/// same-day records the computation falls back to `fallback_years` and
/// tags the result accordingly; only when both are empty does it fail.
pub fn climatology_normal(
    table: &TemperatureTable,
    reference_date: NaiveDate,
    base_years: (i32, i32),
    fallback_years: (i32, i32),
) -> Result<ClimatologyNormal> {
    let base = table.same_day_subset(reference_date, base_years);

    let (subset, source) = if base.is_empty() {
        let fallback = table.same_day_subset(reference_date, fallback_years);
        if fallback.is_empty() {
            return Err(AnalysisError::InsufficientData(format!(
                "no same-day records in base period {}-{} or fallback {}-{}",
                base_years.0, base_years.1, fallback_years.0, fallback_years.1
            )));
        }
        tracing::info!(
            base_start = base_years.0,
            base_end = base_years.1,
            fallback_start = fallback_years.0,
            fallback_end = fallback_years.1,
            "base period empty, normals computed over fallback year range"
        );
        (
            fallback,
            NormalSource::YearRangeFallback {
                start: fallback_years.0,
                end: fallback_years.1,
            },
        )
    } else {
        (
            base,
            NormalSource::BasePeriod {
                start: base_years.0,
                end: base_years.1,
            },
        )
    };

    let n = subset.len() as f64;
    let (mut high, mut mean, mut low) = (0.0, 0.0, 0.0);
    for record in subset.records() {
        high += record.high;
        mean += record.mean;
        low += record.low;
    }

    Ok(ClimatologyNormal {
        high: high / n,
        mean: mean / n,
        low: low / n,
        sample_size: subset.len(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;

    fn record(y: i32, high: f64) -> TemperatureRecord {
        let date = NaiveDate::from_ymd_opt(y, 7, 15).unwrap();
        TemperatureRecord::new(date, high, high - 5.0, high - 10.0)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 7, 15).unwrap()
    }

    #[test]
    fn test_normal_over_base_period() {
        let table = TemperatureTable::from_records(vec![
            record(1995, 28.0),
            record(2005, 30.0),
            record(2015, 32.0),
            record(2021, 35.0),
        ])
        .unwrap();

        let normal = climatology_normal(&table, reference(), (1991, 2020), (1995, 2021)).unwrap();

        assert_eq!(normal.sample_size, 3);
        assert!((normal.high - 30.0).abs() < 1e-9);
        assert!((normal.mean - 25.0).abs() < 1e-9);
        assert!((normal.low - 20.0).abs() < 1e-9);
        assert!(!normal.source.is_fallback());
    }

    #[test]
    fn test_fallback_when_base_period_misses_table() {
        let table = TemperatureTable::from_records(vec![record(2021, 35.0), record(2022, 28.0)])
            .unwrap();

        let normal = climatology_normal(&table, reference(), (1991, 2020), (2021, 2022)).unwrap();

        assert!(normal.source.is_fallback());
        assert_eq!(normal.source.years(), (2021, 2022));
        assert_eq!(normal.sample_size, 2);
        assert!((normal.high - 31.5).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_data_when_both_empty() {
        let table = TemperatureTable::from_records(vec![record(2021, 35.0)]).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let result = climatology_normal(&table, other_day, (1991, 2020), (2021, 2022));
        assert!(matches!(result, Err(AnalysisError::InsufficientData(_))));
    }
}
