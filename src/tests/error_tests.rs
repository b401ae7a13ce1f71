//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::{HashTree, HashTreeError};
use crate::error::config::ConfigError;
use crate::error::{report, ErrorContext, ErrorReporter, LalaError, TracingErrorReporter};
use serde_json::json;

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = LalaError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let lala_error = LalaError::Io(io_error);
    assert!(lala_error.to_string().contains("file not found"));

    let config_error: LalaError = ConfigError::ValueOutOfRange {
        key: "render.indent".to_string(),
        message: "must be between 1 and 16, got 0".to_string(),
    }
    .into();
    assert_eq!(
        config_error.to_string(),
        "Configuration error: Configuration value render.indent is out of valid range: must be between 1 and 16, got 0"
    );
}

/// A tree rejected by `put_all` surfaces as a tree error.
#[test]
fn test_tree_error_conversion() {
    let mut tree = HashTree::new();
    let err: LalaError = tree.put_all(&json!("just a string")).unwrap_err().into();

    assert!(matches!(err, LalaError::Tree(HashTreeError::InvalidArgument(_))));
    assert_eq!(
        err.to_string(),
        "Tree error: Invalid argument: expected a JSON object, found string"
    );
}

/// Test that the default tracing error reporter can be used directly.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = LalaError::Custom("test error".to_string());

    // Just make sure this doesn't panic
    reporter.report(ErrorContext::new(error, "test_component"));
}

/// Reporting without an installed reporter falls back to stderr.
#[test]
fn test_report_without_reporter() {
    report(ErrorContext::new(
        LalaError::Custom("fallback".to_string()),
        "test_component",
    ));
}
