use std::env;

/// Default console filter when RUST_LOG is not set
pub const DEFAULT_CONSOLE_FILTER: &str = "cardinal_normalizer=info,tower_http=warn";

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Custom log directory path (overrides auto-detection)
    pub custom_log_dir: Option<String>,

    /// Filter for console output (default: DEFAULT_CONSOLE_FILTER)
    pub console_log_level: String,

    /// Filter for file output (default: "debug")
    pub file_log_level: String,

    /// Write JSON log files in addition to the console (default: false)
    pub file_enabled: bool,

    /// Console format: "json", "pretty", or "compact" (default: "compact")
    pub format: LogFormat,

    /// Requests slower than this are logged as warnings (default: 1000)
    pub slow_request_threshold_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            custom_log_dir: None,
            console_log_level: DEFAULT_CONSOLE_FILTER.to_string(),
            file_log_level: "debug".to_string(),
            file_enabled: false,
            format: LogFormat::Compact,
            slow_request_threshold_ms: 1000,
        }
    }
}

impl LogConfig {
    /// Load logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Custom log directory (setting one also turns file logging on)
        if let Some(dir) = lookup("CARDINAL_LOG_DIR") {
            config.custom_log_dir = Some(dir);
            config.file_enabled = true;
        }

        if let Some(level) = lookup("RUST_LOG") {
            config.console_log_level = level;
        }

        if let Some(level) = lookup("CARDINAL_FILE_LOG_LEVEL") {
            config.file_log_level = level;
        }

        if let Some(val) = lookup("LOG_FILE_ENABLED") {
            config.file_enabled = val.to_lowercase() == "true";
        }

        if let Some(format_str) = lookup("LOG_FORMAT") {
            config.format = match format_str.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Compact,
            };
        }

        if let Some(threshold) = lookup("LOG_SLOW_REQUEST_THRESHOLD_MS").and_then(|v| v.parse().ok()) {
            config.slow_request_threshold_ms = threshold;
        }

        config
    }
}
