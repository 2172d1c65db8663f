use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar day of observations. The date is the unique key of the
/// table; `low <= mean <= high` is assumed from the source but not
/// enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub date: NaiveDate,
    pub high: f64,
    pub mean: f64,
    pub low: f64,
}

impl TemperatureRecord {
    pub fn new(date: NaiveDate, high: f64, mean: f64, low: f64) -> Self {
        Self {
            date,
            high,
            mean,
            low,
        }
    }

    pub fn field(&self, field: TempField) -> f64 {
        match field {
            TempField::High => self.high,
            TempField::Mean => self.mean,
            TempField::Low => self.low,
        }
    }

    pub fn month_day(&self) -> (u32, u32) {
        (self.date.month(), self.date.day())
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn is_ordered(&self) -> bool {
        self.low <= self.mean && self.mean <= self.high
    }
}

/// Selector for the three daily temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempField {
    High,
    Mean,
    Low,
}

impl TempField {
    pub fn label(&self) -> &'static str {
        match self {
            TempField::High => "high temperature",
            TempField::Mean => "mean temperature",
            TempField::Low => "low temperature",
        }
    }

    /// Sort direction under which "more extreme" sorts first: ascending
    /// for lows (colder is more extreme), descending otherwise.
    pub fn extreme_ascending(&self) -> bool {
        matches!(self, TempField::Low)
    }
}
