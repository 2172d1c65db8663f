use chrono::{Datelike, NaiveDate};

use crate::error::{AnalysisError, Result};
use crate::models::record::TemperatureRecord;
use crate::models::subset::SameDaySubset;

/// The full historical record, sorted by date and immutable after
/// construction. One row per calendar date.
#[derive(Debug, Clone)]
pub struct TemperatureTable {
    records: Vec<TemperatureRecord>,
}

impl TemperatureTable {
    /// Builds a table from loaded rows. Rows are sorted by date; an empty
    /// input or a duplicate date is rejected.
    pub fn from_records(mut records: Vec<TemperatureRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(AnalysisError::InsufficientData(
                "temperature table has no rows".to_string(),
            ));
        }

        records.sort_by_key(|r| r.date);

        for pair in records.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(AnalysisError::InvalidFormat(format!(
                    "duplicate date in table: {}",
                    pair[0].date
                )));
            }
        }

        for record in &records {
            if !record.is_ordered() {
                tracing::debug!(
                    date = %record.date,
                    high = record.high,
                    mean = record.mean,
                    low = record.low,
                    "record violates low <= mean <= high"
                );
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Binary search by exact date.
    pub fn get(&self, date: NaiveDate) -> Option<&TemperatureRecord> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn min_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// Inclusive span of years present in the table.
    pub fn year_range(&self) -> (i32, i32) {
        (self.min_date().year(), self.max_date().year())
    }

    /// Records with `start <= date < end`.
    pub fn records_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &TemperatureRecord> {
        let lo = self.records.partition_point(|r| r.date < start);
        let hi = self.records.partition_point(|r| r.date < end);
        self.records[lo..hi].iter()
    }

    /// All records sharing `reference_date`'s month and day whose year
    /// falls in the inclusive `year_range`. An empty result is a valid
    /// subset, not an error.
    pub fn same_day_subset(
        &self,
        reference_date: NaiveDate,
        year_range: (i32, i32),
    ) -> SameDaySubset<'_> {
        SameDaySubset::build(&self.records, reference_date, year_range)
    }
}
