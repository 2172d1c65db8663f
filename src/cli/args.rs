use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_HUMIDITY_PCT, DEFAULT_TOP_N, DEFAULT_WINDOW_DAYS, PREAMBLE_LINES,
};

#[derive(Parser)]
#[command(name = "climate-index")]
#[command(about = "Same-day historical temperature ranking and climatology analyzer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare one calendar day against the full historical record
    Analyze {
        #[arg(short, long, help = "Input CSV file (CP949 or UTF-8)")]
        file: PathBuf,

        #[arg(
            short,
            long,
            help = "Reference date (YYYY-MM-DD) [default: latest date in the file]"
        )]
        date: Option<NaiveDate>,

        #[arg(
            long,
            help = "Inclusive year range to compare against, e.g. 1990:2020 [default: all years present]"
        )]
        years: Option<String>,

        #[arg(
            short,
            long,
            default_value_t = DEFAULT_WINDOW_DAYS,
            help = "Trailing window length in days (3-30)"
        )]
        window: u32,

        #[arg(
            long,
            default_value_t = DEFAULT_HUMIDITY_PCT,
            help = "Relative humidity (%) for apparent temperature (10-100)"
        )]
        humidity: f64,

        #[arg(long, default_value_t = DEFAULT_TOP_N, help = "Rows in the hottest/coldest tables")]
        top: usize,

        #[arg(
            long,
            default_value_t = PREAMBLE_LINES,
            help = "Preamble lines to skip before the header row"
        )]
        skip: usize,

        #[arg(long, default_value = "text", help = "Output format: text or json")]
        format: String,

        #[arg(long, default_value = "false", help = "Cards only, no tables")]
        compact: bool,
    },

    /// Display information about a temperature CSV file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(
            long,
            default_value_t = PREAMBLE_LINES,
            help = "Preamble lines to skip before the header row"
        )]
        skip: usize,
    },
}
