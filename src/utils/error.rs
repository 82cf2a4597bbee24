// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Company page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Table has no rows; extractor '{0}' needs at least a header row")]
    EmptyTable(&'static str),

    #[error("Header row carries no column labels beyond the first cell")]
    MissingColumnLabels,

    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching company page failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
