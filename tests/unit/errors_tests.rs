/*!
 * Tests for error types
 */

use std::io;
use std::path::PathBuf;
use subcensor::errors::{AppError, FilterError, SubtitleError};

/// Test subtitle error messages carry the path
#[test]
fn test_subtitle_error_display_shouldIncludePathAndMessage() {
    let error = SubtitleError::WriteFailed {
        path: PathBuf::from("out/film_SL.srt"),
        message: "permission denied".to_string(),
    };

    let text = error.to_string();
    assert!(text.contains("out/film_SL.srt"));
    assert!(text.contains("permission denied"));
}

/// Test filter error messages carry the pattern
#[test]
fn test_filter_error_display_shouldIncludePattern() {
    let error = FilterError::InvalidPattern {
        pattern: "(unclosed".to_string(),
        message: "unclosed group".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid regex pattern '(unclosed': unclosed group");
}

/// Test conversions into the application error
#[test]
fn test_app_error_from_withModuleErrors_shouldWrap() {
    let from_filter: AppError = FilterError::ConfigLoad("bad json".to_string()).into();
    assert!(matches!(from_filter, AppError::Filter(_)));

    let from_io: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(ref message) if message == "gone"));

    let from_anyhow: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(from_anyhow.to_string(), "Unknown error: boom");
}
