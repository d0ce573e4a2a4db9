use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    DEFAULT_GRAMMAR_NAME, DEFAULT_MAX_COMPOSE_STATES, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Runtime configuration for grammar loading and the HTTP surface
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// Explicit grammar archive path (overrides the search path)
    pub grammar_path: Option<PathBuf>,

    /// Transducer key inside the archive (default: "cardinal_0_to_1000")
    pub grammar_name: String,

    /// Composition state budget per numeral (default: 4096)
    pub max_compose_states: usize,

    /// HTTP request timeout (default: 30 seconds)
    pub request_timeout: Duration,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            grammar_path: None,
            grammar_name: DEFAULT_GRAMMAR_NAME.to_string(),
            max_compose_states: DEFAULT_MAX_COMPOSE_STATES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unparseable values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("CARDINAL_GRAMMAR_PATH").filter(|p| !p.trim().is_empty()) {
            config.grammar_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("CARDINAL_GRAMMAR_NAME").filter(|n| !n.trim().is_empty()) {
            config.grammar_name = name;
        }

        if let Some(states) = lookup("CARDINAL_MAX_COMPOSE_STATES")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            config.max_compose_states = states;
        }

        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse::<u64>().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }
}
