//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, and DefaultLogger.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

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
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "multipass::MultipassScene".to_string(),
        message: "scene built".to_string(),
        file,
        line,
    }
}

#[test]
fn test_log_entry_without_location() {
    let e = entry(LogSeverity::Info, None, None);
    assert_eq!(e.severity, LogSeverity::Info);
    assert_eq!(e.source, "multipass::MultipassScene");
    assert!(e.file.is_none());
    assert!(e.line.is_none());
}

#[test]
fn test_log_entry_with_location() {
    let e = entry(LogSeverity::Error, Some("multipass_scene.rs"), Some(42));
    let cloned = e.clone();
    assert_eq!(cloned.file, Some("multipass_scene.rs"));
    assert_eq!(cloned.line, Some(42));
    assert_eq!(cloned.message, e.message);
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CaptureLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.messages.lock().unwrap().push(entry.message.clone());
    }
}

#[test]
fn test_custom_logger_receives_entries() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let logger = CaptureLogger { messages: messages.clone() };

    logger.log(&entry(LogSeverity::Debug, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));

    assert_eq!(messages.lock().unwrap().len(), 2);
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
    ] {
        logger.log(&entry(severity, None, None));
    }
    logger.log(&entry(LogSeverity::Error, Some("log_tests.rs"), Some(7)));
}

#[test]
fn test_logger_is_object_safe() {
    let boxed: Box<dyn Logger> = Box::new(DefaultLogger);
    boxed.log(&entry(LogSeverity::Info, None, None));
}
