/*!
 * Error types for the blogcast application.
 *
 * This module contains custom error types for the extraction, configuration
 * and synthesis stages, using the thiserror crate for ergonomic error
 * definitions. Every variant is terminal for a run: nothing is retried.
 */

use thiserror::Error;

/// Errors that can occur when talking to the text-to-speech API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or the response could not be read
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The credential was rejected
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code, or the service's own status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The response JSON did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The response carried no usable audio
    #[error("Empty audio response: {0}")]
    EmptyResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Wrong command line arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// The document produced no narratable text
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Missing credential or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the synthesis provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
