use thiserror::Error;

/// Custom error types for the world-clock application
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when an API request returns a non-success status code
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// Error when a datetime string from the time API cannot be parsed
    #[error("Failed to parse datetime: {0}")]
    DatetimeParseError(#[from] chrono::ParseError),

    /// Wrapper for reqwest errors
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
