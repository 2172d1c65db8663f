use crate::cli::args::{Cli, Commands};
use crate::error::{AnalysisError, Result};
use crate::models::TemperatureTable;
use crate::readers::TemperatureCsvReader;
use crate::report::{build_report, AnalysisParams, RenderOptions};
use crate::utils::constants::{
    MAX_HUMIDITY_PCT, MAX_WINDOW_DAYS, MIN_HUMIDITY_PCT, MIN_WINDOW_DAYS,
};
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            file,
            date,
            years,
            window,
            humidity,
            top,
            skip,
            format,
            compact,
        } => {
            let progress = ProgressReporter::new_spinner("Loading temperature table...", false);
            let reader = TemperatureCsvReader::with_preamble_lines(skip);
            let table = reader.read_table(&file)?;
            progress.finish_with_message(&format!(
                "Loaded {} records ({} to {})",
                table.len(),
                table.min_date(),
                table.max_date()
            ));

            let reference_date = date.unwrap_or_else(|| table.max_date());
            if reference_date < table.min_date() || reference_date > table.max_date() {
                return Err(AnalysisError::Config(format!(
                    "reference date {} is outside the table's range {} to {}",
                    reference_date,
                    table.min_date(),
                    table.max_date()
                )));
            }

            let year_range = resolve_year_range(&table, years.as_deref())?;

            if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&window) {
                return Err(AnalysisError::Config(format!(
                    "window must be between {} and {} days, got {}",
                    MIN_WINDOW_DAYS, MAX_WINDOW_DAYS, window
                )));
            }
            if !(MIN_HUMIDITY_PCT..=MAX_HUMIDITY_PCT).contains(&humidity) {
                return Err(AnalysisError::Config(format!(
                    "humidity must be between {}% and {}%, got {}",
                    MIN_HUMIDITY_PCT, MAX_HUMIDITY_PCT, humidity
                )));
            }

            let params = AnalysisParams {
                reference_date,
                year_range,
                window_days: window,
                humidity_pct: humidity,
                top_n: top,
            };
            let report = build_report(&table, &params)?;

            match format.as_str() {
                "text" => print!("{}", report.render_text(&RenderOptions { compact })),
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                other => {
                    return Err(AnalysisError::Config(format!(
                        "unknown output format: '{}' (expected 'text' or 'json')",
                        other
                    )))
                }
            }
        }

        Commands::Info { file, skip } => {
            let reader = TemperatureCsvReader::with_preamble_lines(skip);
            let table = reader.read_table(&file)?;

            let (year_min, year_max) = table.year_range();
            println!("Records: {}", table.len());
            println!(
                "Date range: {} to {} ({} years)",
                table.min_date(),
                table.max_date(),
                year_max - year_min + 1
            );

            if let Some(hottest) = table
                .records()
                .iter()
                .max_by(|a, b| a.high.total_cmp(&b.high))
            {
                println!("Hottest day: {:.1}°C on {}", hottest.high, hottest.date);
            }
            if let Some(coldest) = table
                .records()
                .iter()
                .min_by(|a, b| a.low.total_cmp(&b.low))
            {
                println!("Coldest day: {:.1}°C on {}", coldest.low, coldest.date);
            }

            let overall_mean: f64 =
                table.records().iter().map(|r| r.mean).sum::<f64>() / table.len() as f64;
            println!("Overall mean temperature: {:.2}°C", overall_mean);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Parses "MIN:MAX" and clamps it to the years present in the table.
/// Without an argument the full span of years is used.
fn resolve_year_range(table: &TemperatureTable, years: Option<&str>) -> Result<(i32, i32)> {
    let (present_min, present_max) = table.year_range();

    let requested = match years {
        None => return Ok((present_min, present_max)),
        Some(s) => s,
    };

    let (lo, hi) = requested.split_once(':').ok_or_else(|| {
        AnalysisError::Config(format!(
            "year range must look like 1990:2020, got '{}'",
            requested
        ))
    })?;
    let lo: i32 = lo
        .trim()
        .parse()
        .map_err(|_| AnalysisError::Config(format!("invalid year: '{}'", lo)))?;
    let hi: i32 = hi
        .trim()
        .parse()
        .map_err(|_| AnalysisError::Config(format!("invalid year: '{}'", hi)))?;

    let clamped = (lo.max(present_min), hi.min(present_max));
    if clamped.0 > clamped.1 {
        return Err(AnalysisError::Config(format!(
            "year range {}:{} does not overlap the years present ({}-{})",
            lo, hi, present_min, present_max
        )));
    }

    Ok(clamped)
}
