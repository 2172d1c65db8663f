/// Descriptive preamble lines before the CSV header row
pub const PREAMBLE_LINES: usize = 7;

/// WMO climatological normal base period
pub const BASE_PERIOD_START: i32 = 1991;
pub const BASE_PERIOD_END: i32 = 2020;

/// Trailing window bounds (days)
pub const MIN_WINDOW_DAYS: u32 = 3;
pub const MAX_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Relative humidity bounds for apparent temperature (%)
pub const MIN_HUMIDITY_PCT: f64 = 10.0;
pub const MAX_HUMIDITY_PCT: f64 = 100.0;
pub const DEFAULT_HUMIDITY_PCT: f64 = 60.0;

/// Rothfusz regression validity thresholds
pub const HEAT_INDEX_MIN_TEMP_F: f64 = 80.0;
pub const HEAT_INDEX_MIN_HUMIDITY_PCT: f64 = 40.0;

/// Default number of rows in the hottest/coldest tables
pub const DEFAULT_TOP_N: usize = 5;
