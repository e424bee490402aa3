//! Logger module
//!
//! Provides logging utilities for the responder including:
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support
//!
//! Every line goes to stderr or a log file; stdout carries the response.

mod format;
pub mod writer;

pub use format::RequestLogEntry;

use crate::config::LoggingConfig;
use crate::error::TransmissionFault;

/// Initialize the logger with configuration
///
/// Should be called once at process startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_transmission_fault(fault: &TransmissionFault) {
    if fault.headers_committed() {
        log_error(&format!("{fault} (response already committed)"));
    } else {
        log_error(&fault.to_string());
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &RequestLogEntry, format: &str) {
    write_access(&entry.format(format));
}
