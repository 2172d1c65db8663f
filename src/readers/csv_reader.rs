use std::path::Path;

use chrono::NaiveDate;
use encoding_rs::{Encoding, EUC_KR, UTF_8};

use crate::error::{AnalysisError, Result};
use crate::models::{TemperatureRecord, TemperatureTable};
use crate::utils::constants::PREAMBLE_LINES;

/// Encodings tried in fixed preference order. The agency exports are
/// CP949; re-saved files are usually UTF-8 with a BOM.
const ENCODINGS: [&Encoding; 2] = [EUC_KR, UTF_8];

/// Loads a daily temperature CSV into a validated `TemperatureTable`.
///
/// The expected layout is a fixed-length descriptive preamble followed by
/// a header row with a date column and the three temperature columns.
/// Column names are matched by substring so both the Korean agency
/// headers and English equivalents work.
pub struct TemperatureCsvReader {
    preamble_lines: usize,
}

impl TemperatureCsvReader {
    pub fn new() -> Self {
        Self {
            preamble_lines: PREAMBLE_LINES,
        }
    }

    pub fn with_preamble_lines(preamble_lines: usize) -> Self {
        Self { preamble_lines }
    }

    pub fn read_table(&self, path: &Path) -> Result<TemperatureTable> {
        let bytes = std::fs::read(path)?;
        let text = decode(&bytes)?;
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> Result<TemperatureTable> {
        let body = text
            .lines()
            .skip(self.preamble_lines)
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if let Some(record) = parse_row(&row, &columns)? {
                records.push(record);
            }
        }

        TemperatureTable::from_records(records)
    }
}

impl Default for TemperatureCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &[u8]) -> Result<String> {
    for encoding in ENCODINGS {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }
    }

    let tried: Vec<&str> = ENCODINGS.iter().map(|e| e.name()).collect();
    Err(AnalysisError::Encoding(tried.join(", ")))
}

struct ColumnMap {
    date: usize,
    high: usize,
    mean: usize,
    low: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h.contains(n))
            })
        };

        let date = find(&["날짜", "date"]).ok_or_else(|| {
            AnalysisError::Schema("date column ('날짜') not found".to_string())
        })?;
        let high = find(&["최고", "high"]).ok_or_else(|| {
            AnalysisError::Schema("high temperature column not found".to_string())
        })?;
        let mean = find(&["평균", "mean", "avg"]).ok_or_else(|| {
            AnalysisError::Schema("mean temperature column not found".to_string())
        })?;
        let low = find(&["최저", "low"]).ok_or_else(|| {
            AnalysisError::Schema("low temperature column not found".to_string())
        })?;

        Ok(Self {
            date,
            high,
            mean,
            low,
        })
    }
}

/// Parses one body row. Rows with an empty temperature cell are skipped;
/// malformed dates or numerics are hard errors.
fn parse_row(row: &csv::StringRecord, columns: &ColumnMap) -> Result<Option<TemperatureRecord>> {
    let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

    let date_str = cell(columns.date);
    if date_str.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?;

    let high = cell(columns.high);
    let mean = cell(columns.mean);
    let low = cell(columns.low);
    if high.is_empty() || mean.is_empty() || low.is_empty() {
        tracing::debug!(date = %date, "skipping row with missing temperature values");
        return Ok(None);
    }

    Ok(Some(TemperatureRecord::new(
        date,
        parse_temp(high)?,
        parse_temp(mean)?,
        parse_temp(low)?,
    )))
}

fn parse_temp(value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| AnalysisError::InvalidFormat(format!("invalid temperature: '{}'", value)))
}
