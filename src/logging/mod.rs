pub mod config;
pub mod middleware;
pub mod paths;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use config::{LogConfig, LogFormat};
pub use middleware::{access_log_middleware, request_id_middleware, RequestId, SlowRequestThreshold};

/// Keeps the non-blocking file writers alive. Dropping it flushes and closes
/// the log files, so hold it for the lifetime of the process.
#[must_use]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initialize logging
///
/// Console output always goes to stderr so normalized text on stdout stays
/// clean. When file logging is enabled two daily-rotated JSON files are
/// written: `access.log` (HTTP requests only) and `application.log`
/// (everything else).
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    let console_filter = EnvFilter::try_new(&config.console_log_level)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_CONSOLE_FILTER));

    let console_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed(),
    };

    let mut guards = Vec::new();

    let (access_layer, app_layer, log_dir) = if config.file_enabled {
        let dir = paths::get_log_directory(config.custom_log_dir.as_deref())?;

        let access_appender = tracing_appender::rolling::daily(&dir, "access.log");
        let app_appender = tracing_appender::rolling::daily(&dir, "application.log");
        let (access_writer, access_guard) = tracing_appender::non_blocking(access_appender);
        let (app_writer, app_guard) = tracing_appender::non_blocking(app_appender);
        guards.push(access_guard);
        guards.push(app_guard);

        // Access log layer - only events with target "access_log"
        let access_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(access_writer)
            .with_filter(EnvFilter::new("access_log=info"));

        // Application log layer - everything except access logs
        let app_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(app_writer)
            .with_filter(
                EnvFilter::try_new(&config.file_log_level)
                    .unwrap_or_else(|_| EnvFilter::new("debug"))
                    .add_directive("access_log=off".parse()?),
            );

        (Some(access_layer), Some(app_layer), Some(dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(access_layer)
        .with(app_layer)
        .try_init()?;

    match log_dir {
        Some(dir) => tracing::info!(
            log_dir = %dir.display(),
            "Logging initialized - access: access.log, application: application.log"
        ),
        None => tracing::debug!("Logging initialized (console only)"),
    }

    Ok(LoggingGuard { _guards: guards })
}

/// Log platform-specific information on startup
pub fn log_platform_info() {
    tracing::info!(
        platform = std::env::consts::OS,
        architecture = std::env::consts::ARCH,
        version = env!("CARGO_PKG_VERSION"),
        "Cardinal normalizer starting"
    );
}
