/*!
 * Tests for error types and conversions
 */

use erashape::errors::{AppError, ConfigError, FetchError};

#[test]
fn test_fetch_error_request_failed_should_display_correctly() {
    let error = FetchError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_fetch_error_api_error_should_display_status_and_message() {
    let error = FetchError::ApiError {
        status_code: 503,
        message: "Service Unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service Unavailable"));
}

#[test]
fn test_config_error_should_name_offending_value() {
    let error = ConfigError::DuplicateEraLabel("Statcast".to_string());
    assert_eq!(error.to_string(), "Duplicate era label: Statcast");

    let error = ConfigError::InvalidEraSpec("Statcast".to_string());
    assert!(error.to_string().contains("LABEL=YEAR"));
}

#[test]
fn test_app_error_from_fetch_error_should_wrap() {
    let app_error: AppError = FetchError::ParseError("Invalid JSON".to_string()).into();
    assert!(matches!(app_error, AppError::Fetch(_)));
    assert!(app_error.to_string().contains("Invalid JSON"));
}

#[test]
fn test_app_error_from_anyhow_should_keep_message() {
    let app_error: AppError = anyhow::anyhow!("something broke").into();
    assert!(matches!(app_error, AppError::Unknown(ref msg) if msg == "something broke"));
}
