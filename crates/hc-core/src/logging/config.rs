//! Logging configuration.
//!
//! The stderr filter is picked from the first source that sets it:
//! `-v`/`-q`, then `HC_LOG`, then raw `RUST_LOG` directives, then `info`.
//! `--log-format` beats `HC_LOG_FORMAT`.

use std::fmt;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(LogFormat::Human),
            "jsonl" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {} (expected human or jsonl)", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        })
    }
}

/// Level applied to every workspace crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    const NAMES: [(&'static str, LogLevel); 6] = [
        ("trace", LogLevel::Trace),
        ("debug", LogLevel::Debug),
        ("info", LogLevel::Info),
        ("warn", LogLevel::Warn),
        ("error", LogLevel::Error),
        ("off", LogLevel::Off),
    ];
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::NAMES
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, level)| *level)
            .ok_or_else(|| format!("unknown log level: {}", s))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = LogLevel::NAMES
            .iter()
            .find(|(_, level)| level == self)
            .map_or("info", |(name, _)| *name);
        f.write_str(name)
    }
}

/// Source of the stderr event filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    Level(LogLevel),
    /// `RUST_LOG` directives, used verbatim.
    Directives(String),
}

impl Default for LogFilter {
    fn default() -> Self {
        LogFilter::Level(LogLevel::default())
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub filter: LogFilter,
}

impl LogConfig {
    /// Resolve from the process environment plus CLI flags.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_values(
            std::env::var("HC_LOG").ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
            std::env::var("HC_LOG_FORMAT").ok().as_deref(),
            cli_level,
            cli_format,
        )
    }

    /// Resolve from raw variable values. Unparseable `HC_LOG` and
    /// `HC_LOG_FORMAT` values are ignored.
    pub fn from_values(
        hc_log: Option<&str>,
        rust_log: Option<&str>,
        hc_log_format: Option<&str>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let filter = cli_level
            .or_else(|| hc_log.and_then(|value| value.parse().ok()))
            .map(LogFilter::Level)
            .or_else(|| {
                rust_log
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(|value| LogFilter::Directives(value.to_string()))
            })
            .unwrap_or_default();

        let format = cli_format
            .or_else(|| hc_log_format.and_then(|value| value.parse().ok()))
            .unwrap_or_default();

        LogConfig { format, filter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("jsonl".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert!("json".parse::<LogFormat>().is_err());
        assert!("pretty".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        for (name, level) in LogLevel::NAMES {
            assert_eq!(name.parse::<LogLevel>().unwrap(), level);
            assert_eq!(level.to_string(), name);
        }
        assert!("warning".parse::<LogLevel>().is_err());
        assert!("quiet".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_is_info_human() {
        let config = LogConfig::from_values(None, None, None, None, None);
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.filter, LogFilter::Level(LogLevel::Info));
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_hc_log_beats_rust_log() {
        let config = LogConfig::from_values(Some("error"), Some("debug"), None, None, None);
        assert_eq!(config.filter, LogFilter::Level(LogLevel::Error));
    }

    #[test]
    fn test_rust_log_kept_as_directives() {
        let config = LogConfig::from_values(None, Some("hc_report=debug"), None, None, None);
        assert_eq!(config.filter, LogFilter::Directives("hc_report=debug".to_string()));

        let config = LogConfig::from_values(Some("loud"), Some(" "), None, None, None);
        assert_eq!(config.filter, LogFilter::Level(LogLevel::Info));
    }

    #[test]
    fn test_quiet_flag_beats_rust_log() {
        let config = LogConfig::from_values(
            None,
            Some("hc_report=trace"),
            None,
            Some(LogLevel::Error),
            None,
        );
        assert_eq!(config.filter, LogFilter::Level(LogLevel::Error));
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = LogConfig::from_values(
            Some("error"),
            None,
            Some("human"),
            Some(LogLevel::Trace),
            Some(LogFormat::Jsonl),
        );
        assert_eq!(config.filter, LogFilter::Level(LogLevel::Trace));
        assert_eq!(config.format, LogFormat::Jsonl);

        let config = LogConfig::from_values(None, None, Some("jsonl"), None, None);
        assert_eq!(config.format, LogFormat::Jsonl);
    }
}
