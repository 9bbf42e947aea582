//! Structured Logger
//!
//! Wraps `tracing` with a console layer and a daily-rolling NDJSON file layer.
//! `RUST_LOG` wins over the configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the global logger. Writes `folio.log.YYYY-MM-DD` under `log_dir`.
///
/// With `json_console` the console layer emits JSON lines too, which suits
/// container log collectors. Calling this twice is a no-op.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str, json_console: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "folio.log");

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = if json_console {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
