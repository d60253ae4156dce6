/*!
 * Error types for the erashape application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the stats API
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The response body was not the expected JSON
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Non-success status returned by the API
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body, or a placeholder if it could not be read
        message: String,
    },

    /// The configured endpoint could not be turned into a URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Errors found while validating the configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("At least one era must be configured")]
    NoEras,

    #[error("Era label must not be empty (year {0})")]
    EmptyEraLabel(i32),

    #[error("Duplicate era label: {0}")]
    DuplicateEraLabel(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Output path must not be empty")]
    EmptyOutputPath,

    #[error("Invalid era specification '{0}', expected LABEL=YEAR")]
    InvalidEraSpec(String),
}

/// Errors that can occur while writing the difference report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the stats API
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from report output
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
