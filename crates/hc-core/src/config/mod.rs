//! Configuration loading for hc-core.
//!
//! Resolution order for the file (first hit wins):
//! 1. `--config <path>`
//! 2. `HC_CONFIG`
//! 3. `<config dir>/healthcheck/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides (`HC_API_HOST`, `HC_API_PORT`, `HC_TOKEN`,
//! `HC_REPORT_DIR`, `HC_TEMPLATE_DIR`) apply on top of the file, and CLI flags
//! on top of those.

use hc_client::ClientConfig;
use hc_report::{ReportConfig, ReportError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "healthcheck";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HcConfig {
    /// Resource API connection.
    #[serde(default)]
    pub api: ClientConfig,
    /// Templates, report store, layout.
    #[serde(default)]
    pub report: ReportConfig,
}

impl HcConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the config file came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    UserDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Flag(path) | ConfigSource::Env(path) | ConfigSource::UserDir(path) => {
                Some(path)
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Values that replace file settings when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_host: Option<String>,
    pub api_port: Option<u16>,
    pub token: Option<String>,
    pub report_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
}

impl Overrides {
    /// Read the `HC_*` override variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let api_port = match get("HC_API_PORT") {
            Some(value) => Some(parse_port("HC_API_PORT", &value)?),
            None => None,
        };
        Ok(Self {
            api_host: get("HC_API_HOST"),
            api_port,
            token: get("HC_TOKEN"),
            report_dir: get("HC_REPORT_DIR").map(PathBuf::from),
            template_dir: get("HC_TEMPLATE_DIR").map(PathBuf::from),
        })
    }

    fn apply(&self, config: &mut HcConfig) {
        if let Some(host) = &self.api_host {
            config.api.host = host.clone();
        }
        if let Some(port) = self.api_port {
            config.api.port = port;
        }
        if let Some(token) = &self.token {
            config.api = config.api.clone().with_bearer_token(token.clone());
        }
        if let Some(dir) = &self.report_dir {
            config.report.output_dir = dir.clone();
        }
        if let Some(dir) = &self.template_dir {
            config.report.templates.dir = dir.clone();
        }
    }
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
    /// Value of `HC_CONFIG`.
    pub env_config_path: Option<PathBuf>,
    /// Platform config directory; `None` skips the user-dir lookup.
    pub user_config_dir: Option<PathBuf>,
    /// Environment overrides.
    pub env: Overrides,
    /// Command-line overrides.
    pub cli: Overrides,
}

impl ConfigOptions {
    /// Options for the running process: environment and platform dirs.
    pub fn from_env(config_path: Option<PathBuf>, cli: Overrides) -> Result<Self, ConfigError> {
        Ok(Self {
            config_path,
            env_config_path: std::env::var_os("HC_CONFIG")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            user_config_dir: dirs::config_dir(),
            env: Overrides::from_env()?,
            cli,
        })
    }
}

/// Loaded configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: HcConfig,
    pub source: ConfigSource,
}

/// Resolve, parse, override, and validate the configuration.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let source = resolve_source(options)?;
    let mut config = match source.path() {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
                path: path.to_path_buf(),
                source,
            })?;
            HcConfig::from_toml(&text, path)?
        }
        None => HcConfig::default(),
    };

    options.env.apply(&mut config);
    options.cli.apply(&mut config);
    config.report.validate()?;

    debug!(source = ?source, host = %config.api.host, port = config.api.port, "configuration loaded");
    Ok(ResolvedConfig { config, source })
}

fn resolve_source(options: &ConfigOptions) -> Result<ConfigSource, ConfigError> {
    // Explicitly named files must exist
    if let Some(path) = &options.config_path {
        return require(path).map(ConfigSource::Flag);
    }
    if let Some(path) = &options.env_config_path {
        return require(path).map(ConfigSource::Env);
    }
    if let Some(dir) = &options.user_config_dir {
        let path = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if path.is_file() {
            return Ok(ConfigSource::UserDir(path));
        }
    }
    Ok(ConfigSource::Defaults)
}

fn require(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn options() -> ConfigOptions {
        ConfigOptions::default()
    }

    #[test]
    fn test_defaults_without_files() {
        let resolved = load_config(&options()).unwrap();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.config.api.port, 9090);
        assert_eq!(resolved.config.report.output_dir, PathBuf::from("/tmp/pdf"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[api]
host = "dashboard.local"

[report]
output_dir = "/srv/reports"

[report.layout]
font_size = 10.0
"#,
        )
        .unwrap();

        let resolved = load_config(&ConfigOptions {
            config_path: Some(path.clone()),
            ..options()
        })
        .unwrap();
        assert_eq!(resolved.source, ConfigSource::Flag(path));
        assert_eq!(resolved.config.api.host, "dashboard.local");
        assert_eq!(resolved.config.api.port, 9090);
        assert_eq!(resolved.config.report.output_dir, PathBuf::from("/srv/reports"));
        assert_eq!(resolved.config.report.layout.font_size, 10.0);
        assert_eq!(resolved.config.report.layout.line_step_mm, 5.0);
    }

    #[test]
    fn test_user_dir_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healthcheck").join("config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[api]\nport = 8001\n").unwrap();

        let resolved = load_config(&ConfigOptions {
            user_config_dir: Some(dir.path().to_path_buf()),
            ..options()
        })
        .unwrap();
        assert_eq!(resolved.source, ConfigSource::UserDir(path));
        assert_eq!(resolved.config.api.port, 8001);
    }

    #[test]
    fn test_flag_beats_env_path() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("flag.toml");
        let env = dir.path().join("env.toml");
        fs::write(&flag, "[api]\nport = 1111\n").unwrap();
        fs::write(&env, "[api]\nport = 2222\n").unwrap();

        let resolved = load_config(&ConfigOptions {
            config_path: Some(flag),
            env_config_path: Some(env.clone()),
            ..options()
        })
        .unwrap();
        assert_eq!(resolved.config.api.port, 1111);

        let resolved = load_config(&ConfigOptions {
            env_config_path: Some(env),
            ..options()
        })
        .unwrap();
        assert_eq!(resolved.config.api.port, 2222);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(&ConfigOptions {
            config_path: Some(PathBuf::from("/nonexistent/hc.toml")),
            ..options()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nport = ").unwrap();
        let err = load_config(&ConfigOptions {
            config_path: Some(path),
            ..options()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_env_then_cli_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HC_API_HOST", "env-host"),
            ("HC_API_PORT", "7000"),
            ("HC_TOKEN", "env-token"),
            ("HC_REPORT_DIR", "/env/reports"),
            ("HC_TEMPLATE_DIR", ""),
        ]
        .into_iter()
        .collect();
        let env = Overrides::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(env.template_dir, None);

        let cli = Overrides {
            api_host: Some("cli-host".to_string()),
            ..Overrides::default()
        };
        let resolved = load_config(&ConfigOptions {
            env,
            cli,
            ..options()
        })
        .unwrap();
        let config = resolved.config;
        assert_eq!(config.api.host, "cli-host");
        assert_eq!(config.api.port, 7000);
        assert_eq!(config.api.bearer_token.as_deref(), Some("env-token"));
        assert_eq!(config.report.output_dir, PathBuf::from("/env/reports"));
        assert_eq!(config.report.templates.dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = Overrides::from_lookup(|name| {
            (name == "HC_API_PORT").then(|| "ninety".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "HC_API_PORT", .. }));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[report.layout]\nline_step_mm = 0.0\n").unwrap();
        let err = load_config(&ConfigOptions {
            config_path: Some(path),
            ..options()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Report(ReportError::InvalidConfig(_))));
    }
}
