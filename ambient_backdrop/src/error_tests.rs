//! Unit tests for error.rs
//!
//! Tests all Error variants and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("context lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("context lost"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("material already disposed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("material already disposed"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("no draw context".to_string());
    assert!(format!("{}", err).starts_with("Initialization failed"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("material_count must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("material_count"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::BackendError("x".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::OutOfMemory);
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when(flag: bool) -> Result<u32> {
    if flag {
        crate::backdrop_bail!("backdrop::test", "bailed with {}", 7);
    }
    Ok(1)
}

#[test]
fn test_backdrop_err_builds_backend_error() {
    let err = crate::backdrop_err!("backdrop::test", "value {}", 42);
    assert_eq!(err, Error::BackendError("value 42".to_string()));
}

#[test]
fn test_backdrop_bail_returns_early() {
    assert_eq!(bail_when(false), Ok(1));
    assert_eq!(bail_when(true), Err(Error::BackendError("bailed with 7".to_string())));
}
