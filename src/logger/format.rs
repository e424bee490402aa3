//! Access log format module
//!
//! Supports multiple log formats:
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;

/// One served request, as recorded in the access log
#[derive(Debug, Clone)]
pub struct RequestLogEntry {
    /// Client address from `REMOTE_ADDR`
    pub remote_addr: Option<String>,
    /// Invocation timestamp
    pub time: chrono::DateTime<Local>,
    /// Method from `REQUEST_METHOD`
    pub method: Option<String>,
    /// Raw `REQUEST_URI` (empty when the variable was missing)
    pub request_uri: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl RequestLogEntry {
    /// Create a new entry stamped with the current time
    pub fn new(request_uri: String) -> Self {
        Self {
            remote_addr: None,
            time: Local::now(),
            method: None,
            request_uri,
            status: 200,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn remote_addr_or_dash(&self) -> &str {
        self.remote_addr.as_deref().unwrap_or("-")
    }

    fn method_or_dash(&self) -> &str {
        self.method.as_deref().unwrap_or("-")
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request_method $request_uri" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {} {}",
            self.remote_addr_or_dash(),
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method_or_dash(),
            self.request_uri,
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "request_uri": self.request_uri,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr` - Client address
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$request_method` - HTTP method
    /// - `$request_uri` - Raw request URI
    /// - `$status` - Response status code
    /// - `$body_bytes_sent` - Response body size
    /// - `$request_time` - Processing time in seconds (3 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        pattern
            .replace("$remote_addr", self.remote_addr_or_dash())
            .replace(
                "$time_local",
                &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            )
            .replace("$time_iso8601", &self.time.to_rfc3339())
            .replace("$request_time", &format!("{request_time:.3}"))
            .replace("$request_method", self.method_or_dash())
            .replace("$request_uri", &self.request_uri)
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
    }
}
