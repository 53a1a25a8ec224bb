//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger and the global slot.
//! Tests touching the global logger are #[serial].

use crate::log::{self, DefaultLogger, LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Test logger that captures log entries for verification
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// DEFAULT LOGGER FORMAT
// ============================================================================

#[test]
#[serial]
fn test_format_entry_without_location() {
    colored::control::set_override(false);
    let entry = LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "backdrop::Lifecycle".to_string(),
        message: "mounted".to_string(),
        file: None,
        line: None,
    };

    let line = DefaultLogger::format_entry(&entry);
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[backdrop::Lifecycle]"));
    assert!(line.ends_with("mounted"));
    colored::control::unset_override();
}

#[test]
#[serial]
fn test_format_entry_with_location() {
    colored::control::set_override(false);
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "backdrop::Renderer".to_string(),
        message: "render failed".to_string(),
        file: Some("renderer.rs"),
        line: Some(12),
    };

    let line = DefaultLogger::format_entry(&entry);
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("render failed (renderer.rs:12)"));
    colored::control::unset_override();
}

// ============================================================================
// GLOBAL LOGGER
// ============================================================================

#[test]
#[serial]
fn test_macros_route_to_custom_logger() {
    let entries = install_capture();

    crate::backdrop_debug!("backdrop::test", "debug {}", 1);
    crate::backdrop_warn!("backdrop::test", "warn {}", 2);
    crate::backdrop_error!("backdrop::test", "error {}", 3);

    // Other unit tests may log concurrently; keep only ours
    let captured: Vec<LogEntry> = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "backdrop::test")
        .cloned()
        .collect();
    log::reset_logger();

    assert_eq!(captured.len(), 3);
    assert_eq!(captured[0].severity, LogSeverity::Debug);
    assert_eq!(captured[0].message, "debug 1");
    assert!(captured[0].file.is_none());
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[2].severity, LogSeverity::Error);
    assert!(captured[2].file.is_some());
    assert!(captured[2].line.is_some());
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install_capture();
    log::reset_logger();

    crate::backdrop_info!("backdrop::test", "goes to stdout");

    assert!(entries.lock().unwrap().iter().all(|e| e.source != "backdrop::test"));
}
