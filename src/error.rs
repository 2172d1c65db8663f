use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("No supported text encoding could decode the file (tried {0})")]
    Encoding(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Empty selection: {0}")]
    EmptySelection(String),

    #[error("Value {value} not found in the {field} series")]
    ValueNotFound { field: String, value: f64 },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid trailing window length: {0} days (minimum is 1)")]
    InvalidWindow(u32),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
