//! Structured logging for hc-core.
//!
//! - stdout is reserved for command payloads (JSON or human text)
//! - stderr receives all log output, human-readable or JSON lines
//! - every command runs inside a span carrying a run id

pub mod config;

pub use config::{LogConfig, LogFilter, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 3] = ["hc_core", "hc_report", "hc_client"];

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(&config.filter);

    match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Invalid `RUST_LOG` directives fall back to the `info` level filter.
fn build_filter(filter: &LogFilter) -> EnvFilter {
    match filter {
        LogFilter::Level(level) => default_filter(*level),
        LogFilter::Directives(directives) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| default_filter(LogLevel::Info))
        }
    }
}

fn default_filter(level: LogLevel) -> EnvFilter {
    let directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    EnvFilter::new(directives.join(","))
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are enough to correlate one run
    format!("run-{}", &uuid.simple().to_string()[..12])
}
