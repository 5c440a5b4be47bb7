/// Error types for the HydroAI core library
use thiserror::Error;

/// Main error type for HydroAI operations
#[derive(Error, Debug)]
pub enum HydroError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {status} for {endpoint}")]
    BadStatus { endpoint: String, status: u16 },

    /// Failed to parse a backend response body
    #[error("Failed to parse backend response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// Failed to parse the reservoir CSV
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required CSV column was missing
    #[error("Missing column `{column}` in reservoir row {row}")]
    MissingColumn { column: &'static str, row: usize },

    /// Backend is not configured or was never reachable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for Results using HydroError
pub type Result<T> = std::result::Result<T, HydroError>;
