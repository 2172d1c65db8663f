use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzers::{
    apparent_temperature, climatology_normal, rank_and_percentile, top_n, trailing_window_stats,
    ClimatologyNormal, RankResult, TrailingWindowStats, WindowRank,
};
use crate::error::{AnalysisError, Result};
use crate::models::{TempField, TemperatureRecord, TemperatureTable};
use crate::utils::constants::{BASE_PERIOD_END, BASE_PERIOD_START};

/// One analysis run's inputs, validated by the caller.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub reference_date: NaiveDate,
    /// Inclusive year range; must lie within the years present.
    pub year_range: (i32, i32),
    pub window_days: u32,
    pub humidity_pct: f64,
    pub top_n: usize,
}

/// Explicit layout configuration for text rendering. Passed in by the
/// caller; nothing here is read from ambient state.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Cards only, no tables or per-year listing.
    pub compact: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { compact: false }
    }
}

/// Ranking of the selected day's value in one temperature series.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRanking {
    pub field: TempField,
    pub observed: f64,
    #[serde(flatten)]
    pub rank: RankResult,
    /// Record holder's value minus the observed value.
    pub delta_from_record: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub reference_date: NaiveDate,
    pub year_range: (i32, i32),
    pub selected: TemperatureRecord,
    pub high: FieldRanking,
    pub mean: FieldRanking,
    pub low: FieldRanking,
    pub normal: ClimatologyNormal,
    /// Observed minus normal, per field.
    pub delta_vs_normal: DeltaVsNormal,
    pub humidity_pct: f64,
    pub apparent_high: f64,
    pub window: TrailingWindowStats,
    pub window_rank: WindowRank,
    pub hottest: Vec<TemperatureRecord>,
    pub coldest: Vec<TemperatureRecord>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeltaVsNormal {
    pub high: f64,
    pub mean: f64,
    pub low: f64,
}

/// Runs the full comparison pipeline for one selected day.
///
/// Fails with `EmptySelection` when the reference date itself has no
/// record; every other error propagates from the individual analyzers.
pub fn build_report(table: &TemperatureTable, params: &AnalysisParams) -> Result<AnalysisReport> {
    let selected = table
        .get(params.reference_date)
        .ok_or_else(|| {
            AnalysisError::EmptySelection(format!(
                "no record for the reference date {}",
                params.reference_date
            ))
        })?
        .clone();

    let subset = table.same_day_subset(params.reference_date, params.year_range);

    let rank_field = |field: TempField| -> Result<FieldRanking> {
        let observed = selected.field(field);
        let rank =
            rank_and_percentile(&subset, field, observed, field.extreme_ascending())?;
        let delta_from_record = rank.record_holder.field(field) - observed;
        Ok(FieldRanking {
            field,
            observed,
            rank,
            delta_from_record,
        })
    };

    let high = rank_field(TempField::High)?;
    let mean = rank_field(TempField::Mean)?;
    let low = rank_field(TempField::Low)?;

    let normal = climatology_normal(
        table,
        params.reference_date,
        (BASE_PERIOD_START, BASE_PERIOD_END),
        params.year_range,
    )?;
    let delta_vs_normal = DeltaVsNormal {
        high: selected.high - normal.high,
        mean: selected.mean - normal.mean,
        low: selected.low - normal.low,
    };

    let apparent_high = apparent_temperature(selected.high, params.humidity_pct);

    let window = trailing_window_stats(table, params.reference_date, params.window_days)?;
    let window_rank = window.rank_in_history(TempField::Mean)?;

    let hottest = top_n(&subset, TempField::High, false, params.top_n);
    let coldest = top_n(&subset, TempField::Low, true, params.top_n);

    Ok(AnalysisReport {
        reference_date: params.reference_date,
        year_range: params.year_range,
        selected,
        high,
        mean,
        low,
        normal,
        delta_vs_normal,
        humidity_pct: params.humidity_pct,
        apparent_high,
        window,
        window_rank,
        hottest,
        coldest,
    })
}

impl AnalysisReport {
    pub fn render_text(&self, options: &RenderOptions) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Reference date: {} (compared against {}-{})\n\n",
            self.reference_date, self.year_range.0, self.year_range.1
        ));

        for ranking in [&self.high, &self.mean, &self.low] {
            out.push_str(&ranking.card());
            out.push('\n');
        }

        out.push_str(&format!(
            "\nApparent high at {:.0}% humidity: {:.1}°C\n",
            self.humidity_pct, self.apparent_high
        ));

        let (normal_start, normal_end) = self.normal.source.years();
        out.push_str(&format!(
            "\nClimatological normal {}-{} ({} days): high {:.1}°C / mean {:.1}°C / low {:.1}°C\n",
            normal_start,
            normal_end,
            self.normal.sample_size,
            self.normal.high,
            self.normal.mean,
            self.normal.low
        ));
        out.push_str(&format!(
            "Selected day vs normal: {:+.1}°C / {:+.1}°C / {:+.1}°C\n",
            self.delta_vs_normal.high, self.delta_vs_normal.mean, self.delta_vs_normal.low
        ));
        if self.normal.source.is_fallback() {
            out.push_str(
                "Note: base period holds no data for this day; normals use the selected year range\n",
            );
        }

        out.push_str(&format!(
            "\nTrailing {}-day window ({} to {}, {} days of data):\n",
            self.window.window_days,
            self.window.start,
            self.window.end.pred_opt().unwrap_or(self.window.start),
            self.window.sample_size
        ));
        out.push_str(&format!(
            "  Window average (high/mean/low): {:.2} / {:.2} / {:.2}°C\n",
            self.window.avg_high, self.window.avg_mean, self.window.avg_low
        ));
        out.push_str(&format!(
            "  Historical same-period average: {:.2} / {:.2} / {:.2}°C\n",
            self.window.historical_avg(TempField::High),
            self.window.historical_avg(TempField::Mean),
            self.window.historical_avg(TempField::Low)
        ));
        out.push_str(&format!(
            "  Window mean ranks top {:.1}% ({} of {} years)\n",
            100.0 - self.window_rank.percentile,
            self.window_rank.rank,
            self.window_rank.population
        ));

        if !options.compact {
            out.push_str(&render_table("\nHottest same-day records:\n", &self.hottest, TempField::High));
            out.push_str(&render_table("\nColdest same-day records:\n", &self.coldest, TempField::Low));
        }

        out
    }
}

impl FieldRanking {
    fn card(&self) -> String {
        format!(
            "{}: {:.1}°C — top {:.1}% (rank {} of {} days); record {:.1}°C on {} ({:+.1}°C vs selected)",
            capitalize(self.field.label()),
            self.observed,
            self.rank.percentile,
            self.rank.rank,
            self.rank.population,
            self.rank.record_holder.field(self.field),
            self.rank.record_holder.date,
            self.delta_from_record
        )
    }
}

fn render_table(title: &str, records: &[TemperatureRecord], field: TempField) -> String {
    let mut out = String::from(title);
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}  {:.1}°C\n",
            i + 1,
            record.date,
            record.field(field)
        ));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;

    fn record(y: i32, m: u32, d: u32, mean: f64) -> TemperatureRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        TemperatureRecord::new(date, mean + 5.0, mean, mean - 5.0)
    }

    /// Two weeks of July for 2019-2022, warming year over year.
    fn table() -> TemperatureTable {
        let mut records = Vec::new();
        for year in 2019..=2022 {
            for day in 1..=20 {
                records.push(record(year, 7, day, 22.0 + (year - 2019) as f64));
            }
        }
        TemperatureTable::from_records(records).unwrap()
    }

    fn params() -> AnalysisParams {
        AnalysisParams {
            reference_date: NaiveDate::from_ymd_opt(2022, 7, 15).unwrap(),
            year_range: (2019, 2022),
            window_days: 7,
            humidity_pct: 60.0,
            top_n: 3,
        }
    }

    #[test]
    fn test_build_report_end_to_end() {
        let table = table();
        let report = build_report(&table, &params()).unwrap();

        // 2022 is the warmest year, so the selected day leads every series.
        assert_eq!(report.high.rank.rank, 1);
        assert_eq!(report.high.rank.population, 4);
        assert_eq!(report.high.rank.percentile, 0.0);
        assert_eq!(report.low.rank.rank, 4); // warmest low is least extreme ascending
        assert_eq!(report.window_rank.rank, 1);
        assert_eq!(report.hottest.len(), 3);
        assert_eq!(report.hottest[0].year(), 2022);

        // 2019 and 2020 fall inside the 1991-2020 base period.
        assert!(!report.normal.source.is_fallback());
        assert_eq!(report.normal.sample_size, 2);
        assert!((report.normal.mean - 22.5).abs() < 1e-9);
        assert!((report.delta_vs_normal.mean - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_reference_date_is_empty_selection() {
        let table = table();
        let mut p = params();
        p.reference_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();

        assert!(matches!(
            build_report(&table, &p),
            Err(AnalysisError::EmptySelection(_))
        ));
    }

    #[test]
    fn test_render_text_sections() {
        let table = table();
        let report = build_report(&table, &params()).unwrap();

        let full = report.render_text(&RenderOptions::default());
        assert!(full.contains("Reference date: 2022-07-15"));
        assert!(full.contains("High temperature"));
        assert!(full.contains("Climatological normal 1991-2020"));
        assert!(full.contains("Hottest same-day records"));

        let compact = report.render_text(&RenderOptions { compact: true });
        assert!(!compact.contains("Hottest same-day records"));
    }

    #[test]
    fn test_fallback_note_is_rendered() {
        let mut records = Vec::new();
        for year in 2021..=2022 {
            for day in 1..=20 {
                records.push(record(year, 7, day, 24.0));
            }
        }
        let table = TemperatureTable::from_records(records).unwrap();

        let mut p = params();
        p.year_range = (2021, 2022);
        let report = build_report(&table, &p).unwrap();

        assert!(report.normal.source.is_fallback());
        let text = report.render_text(&RenderOptions::default());
        assert!(text.contains("base period holds no data"));
        assert!(text.contains("Climatological normal 2021-2022"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let table = table();
        let report = build_report(&table, &params()).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"reference_date\":\"2022-07-15\""));
        assert!(json.contains("\"record_holder\""));
    }
}
