// Configuration types module
// Defines the responder's tunables; request inputs live in `crate::request`

use serde::Deserialize;

/// Main settings structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Script mount point searched for in `REQUEST_URI`
    pub mount_marker: String,
    /// File served for the root logical path
    pub index_file: String,
    /// Drop the `?query` portion before interpreting the request URI
    pub strip_query: bool,
    /// Resolve symbolic links and re-check containment before opening
    pub confine_symlinks: bool,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (common, json, or custom pattern)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: false,
            format: default_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mount_marker: "/index.cgi".to_string(),
            index_file: "index.html".to_string(),
            strip_query: false,
            confine_symlinks: true,
            logging: LoggingConfig::default(),
        }
    }
}
