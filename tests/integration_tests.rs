use std::io::Write;

use chrono::NaiveDate;
use climate_index::analyzers::{extreme_record, rank_and_percentile};
use climate_index::error::AnalysisError;
use climate_index::models::{TempField, TemperatureRecord, TemperatureTable};
use climate_index::readers::TemperatureCsvReader;
use climate_index::report::{build_report, AnalysisParams, RenderOptions};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn fixture_csv() -> String {
    let mut csv = String::new();
    for i in 1..=7 {
        csv.push_str(&format!("설명 {}\n", i));
    }
    csv.push_str("날짜,지점,평균기온(℃),최저기온(℃),최고기온(℃)\n");
    // Two weeks around July 15 for 2020-2022, warming each year.
    for year in 2020..=2022 {
        for day in 8..=16 {
            let mean = 24.0 + (year - 2020) as f64 + (day as f64) * 0.1;
            csv.push_str(&format!(
                "{}-07-{:02},108,{:.1},{:.1},{:.1}\n",
                year,
                day,
                mean,
                mean - 5.0,
                mean + 5.0
            ));
        }
    }
    csv
}

#[test]
fn test_load_euc_kr_file_and_analyze() {
    let mut file = NamedTempFile::new().unwrap();
    let csv_data = fixture_csv();
    let (encoded, _, _) = encoding_rs::EUC_KR.encode(&csv_data);
    file.write_all(&encoded).unwrap();

    let reader = TemperatureCsvReader::new();
    let table = reader.read_table(file.path()).unwrap();
    assert_eq!(table.len(), 27);

    let params = AnalysisParams {
        reference_date: NaiveDate::from_ymd_opt(2022, 7, 15).unwrap(),
        year_range: (2020, 2022),
        window_days: 5,
        humidity_pct: 60.0,
        top_n: 5,
    };
    let report = build_report(&table, &params).unwrap();

    // 2022 is the warmest year in the fixture.
    assert_eq!(report.high.rank.rank, 1);
    assert_eq!(report.high.rank.population, 3);
    assert_eq!(report.window_rank.rank, 1);

    let text = report.render_text(&RenderOptions::default());
    assert!(text.contains("Reference date: 2022-07-15"));
    assert!(text.contains("Hottest same-day records"));
}

#[test]
fn test_same_day_ranking_end_to_end() {
    // The canonical three-record case: 07-15 highs of 30, 35 and 28.
    let records = vec![
        record(2020, 30.0),
        record(2021, 35.0),
        record(2022, 28.0),
    ];
    let table = TemperatureTable::from_records(records).unwrap();
    let reference = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();
    let subset = table.same_day_subset(reference, (2020, 2022));

    let result = rank_and_percentile(&subset, TempField::High, 35.0, false).unwrap();
    assert_eq!(result.rank, 1);
    assert_eq!(result.percentile, 0.0);
    assert_eq!(result.population, 3);
    assert_eq!(result.record_holder.date, reference);

    let extreme = extreme_record(&subset, TempField::High, false).unwrap();
    assert_eq!(extreme.date, reference);
}

#[test]
fn test_unsupported_schema_fails_loudly() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "a,b,c\n1,2,3\n").unwrap();

    let reader = TemperatureCsvReader::with_preamble_lines(0);
    let result = reader.read_table(file.path());
    assert!(matches!(result, Err(AnalysisError::Schema(_))));
}

fn record(year: i32, high: f64) -> TemperatureRecord {
    let date = NaiveDate::from_ymd_opt(year, 7, 15).unwrap();
    TemperatureRecord::new(date, high, high - 5.0, high - 10.0)
}
