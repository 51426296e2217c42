/*!
 * Tests for error types and conversions
 */

use blogcast::errors::{AppError, ProviderError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_providerError_parseAndEmpty_shouldDisplayCorrectly() {
    let parse = ProviderError::ParseError("No audio data in response".to_string());
    assert!(format!("{}", parse).contains("Failed to parse API response"));

    let empty = ProviderError::EmptyResponse("zero bytes".to_string());
    assert!(format!("{}", empty).contains("Empty audio response"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Network down".to_string());
    let app_error: AppError = provider_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Provider error"));
    assert!(display.contains("Network down"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_everyKind_shouldExitWithOne() {
    let errors = vec![
        AppError::Usage("missing output".to_string()),
        AppError::Extraction("no text".to_string()),
        AppError::Config("MINIMAX_API_KEY environment variable not set".to_string()),
        AppError::Provider(ProviderError::EmptyResponse("none".to_string())),
        AppError::File("disk full".to_string()),
    ];
    for error in errors {
        assert_eq!(error.exit_code(), 1, "{} should map to exit code 1", error);
    }
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::Extraction("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("Extraction"));
}
