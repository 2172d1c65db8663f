use chrono::{Datelike, NaiveDate};

use crate::models::record::TemperatureRecord;

/// Non-owning view of every record matching one month-day across a year
/// range. Recomputed per query and discarded after rendering.
#[derive(Debug, Clone)]
pub struct SameDaySubset<'a> {
    month: u32,
    day: u32,
    year_range: (i32, i32),
    records: Vec<&'a TemperatureRecord>,
}

impl<'a> SameDaySubset<'a> {
    pub(crate) fn build(
        all: &'a [TemperatureRecord],
        reference_date: NaiveDate,
        year_range: (i32, i32),
    ) -> Self {
        let month = reference_date.month();
        let day = reference_date.day();
        let records = all
            .iter()
            .filter(|r| matches(r, month, day, year_range))
            .collect();

        Self {
            month,
            day,
            year_range,
            records,
        }
    }

    pub fn records(&self) -> &[&'a TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    /// Human-readable label for error messages, e.g. "07-15 (2020-2022)".
    pub fn describe(&self) -> String {
        format!(
            "{:02}-{:02} ({}-{})",
            self.month, self.day, self.year_range.0, self.year_range.1
        )
    }

    /// Re-applies the month-day filter with a (possibly narrower) year
    /// range. Refining with the same range returns an identical subset.
    pub fn refine(&self, year_range: (i32, i32)) -> SameDaySubset<'a> {
        let records = self
            .records
            .iter()
            .copied()
            .filter(|r| matches(r, self.month, self.day, year_range))
            .collect();

        SameDaySubset {
            month: self.month,
            day: self.day,
            year_range,
            records,
        }
    }
}

fn matches(record: &TemperatureRecord, month: u32, day: u32, year_range: (i32, i32)) -> bool {
    let (m, d) = record.month_day();
    m == month && d == day && record.year() >= year_range.0 && record.year() <= year_range.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::TemperatureTable;

    fn record(y: i32, m: u32, d: u32) -> TemperatureRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        TemperatureRecord::new(date, 30.0, 25.0, 20.0)
    }

    fn table() -> TemperatureTable {
        TemperatureTable::from_records(vec![
            record(2020, 7, 15),
            record(2020, 7, 16),
            record(2021, 7, 15),
            record(2022, 7, 15),
        ])
        .unwrap()
    }

    #[test]
    fn test_selects_month_day_and_year_range() {
        let table = table();
        let reference = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();

        let subset = table.same_day_subset(reference, (2020, 2021));
        let years: Vec<i32> = subset.records().iter().map(|r| r.year()).collect();

        assert_eq!(years, vec![2020, 2021]);
        assert_eq!(subset.month(), 7);
        assert_eq!(subset.day(), 15);
    }

    #[test]
    fn test_empty_subset_is_a_value() {
        let table = table();
        let reference = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let subset = table.same_day_subset(reference, (2020, 2022));
        assert!(subset.is_empty());
        assert_eq!(subset.len(), 0);
    }

    #[test]
    fn test_refine_is_idempotent() {
        let table = table();
        let reference = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();

        let subset = table.same_day_subset(reference, (2020, 2022));
        let refined = subset.refine((2020, 2022));

        let original: Vec<NaiveDate> = subset.records().iter().map(|r| r.date).collect();
        let repeated: Vec<NaiveDate> = refined.records().iter().map(|r| r.date).collect();
        assert_eq!(original, repeated);
    }

    #[test]
    fn test_refine_narrows() {
        let table = table();
        let reference = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();

        let subset = table.same_day_subset(reference, (2020, 2022));
        let narrowed = subset.refine((2021, 2022));

        let years: Vec<i32> = narrowed.records().iter().map(|r| r.year()).collect();
        assert_eq!(years, vec![2021, 2022]);
    }
}
