// Configuration module entry point
// Loads responder settings from `CGI_STATIC_*` environment variables (no config file)

mod types;

pub use types::{LoggingConfig, Settings};

/// Environment variable prefix for responder settings
pub const ENV_PREFIX: &str = "CGI_STATIC";

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit environment source
    ///
    /// Nested keys use `__`, e.g. `CGI_STATIC_LOGGING__FORMAT=json`.
    pub fn load_from(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .add_source(env.prefix_separator("_").separator("__"))
            .set_default("mount_marker", defaults.mount_marker)?
            .set_default("index_file", defaults.index_file)?
            .set_default("strip_query", defaults.strip_query)?
            .set_default("confine_symlinks", defaults.confine_symlinks)?
            .set_default("logging.access_log", defaults.logging.access_log)?
            .set_default("logging.format", defaults.logging.format)?
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings, falling back to defaults when the environment is malformed
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                crate::logger::log_warning(&format!(
                    "Invalid {ENV_PREFIX}_* settings, using defaults: {e}"
                ));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<Settings, config::ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Settings::load_from(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    #[test]
    fn test_defaults() {
        let settings = load_with(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.mount_marker, "/index.cgi");
        assert_eq!(settings.index_file, "index.html");
        assert!(!settings.strip_query);
        assert!(settings.confine_symlinks);
        assert!(!settings.logging.access_log);
        assert_eq!(settings.logging.format, "common");
    }

    #[test]
    fn test_overrides() {
        let settings = load_with(&[
            ("CGI_STATIC_MOUNT_MARKER", "/app.cgi"),
            ("CGI_STATIC_STRIP_QUERY", "true"),
            ("CGI_STATIC_LOGGING__ACCESS_LOG", "true"),
            ("CGI_STATIC_LOGGING__FORMAT", "json"),
            ("CGI_STATIC_LOGGING__ERROR_LOG_FILE", "/tmp/cgi-error.log"),
        ])
        .unwrap();
        assert_eq!(settings.mount_marker, "/app.cgi");
        assert!(settings.strip_query);
        assert!(settings.logging.access_log);
        assert_eq!(settings.logging.format, "json");
        assert_eq!(
            settings.logging.error_log_file.as_deref(),
            Some("/tmp/cgi-error.log")
        );
        assert_eq!(settings.logging.access_log_file, None);
    }

    #[test]
    fn test_unrelated_variables_ignored() {
        let settings = load_with(&[
            ("REQUEST_URI", "/index.cgi/about.html"),
            ("SCRIPT_FILENAME", "/srv/site/index.cgi"),
        ])
        .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_bool_is_error() {
        assert!(load_with(&[("CGI_STATIC_CONFINE_SYMLINKS", "maybe")]).is_err());
    }
}
